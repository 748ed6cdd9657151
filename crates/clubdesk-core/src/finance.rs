use crate::ids::ids_match;
use crate::member::Member;
use crate::payment::{Payment, PaymentStatus};
use chrono::{Datelike, Local};

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    MONTHS[((month.clamp(1, 12)) - 1) as usize]
}

/// (month name, year) for today, in local time.
pub fn current_period() -> (&'static str, i32) {
    let now = Local::now();
    (month_name(now.month()), now.year())
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DuesStatus {
    Current,
    Overdue,
}

/// A member is current for a period iff some payment for that member,
/// month and year is marked PAID. Pending or missing both mean overdue.
pub fn dues_status(member: &Member, payments: &[Payment], month: &str, year: i32) -> DuesStatus {
    let paid = payments.iter().any(|p| {
        ids_match(&p.member_id, &member.id)
            && p.month == month
            && p.year == year
            && p.status == PaymentStatus::Paid
    });
    if paid {
        DuesStatus::Current
    } else {
        DuesStatus::Overdue
    }
}

/// Members without a PAID payment for the period, in registry order.
pub fn overdue_members<'a>(
    members: &'a [Member],
    payments: &[Payment],
    month: &str,
    year: i32,
) -> Vec<&'a Member> {
    members
        .iter()
        .filter(|m| dues_status(m, payments, month, year) == DuesStatus::Overdue)
        .collect()
}

/// Headline numbers for the dashboard tiles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub total_members: usize,
    pub active_members: usize,
    pub overdue_count: usize,
    pub total_collected: f64,
}

impl DashboardStats {
    pub fn compute(members: &[Member], payments: &[Payment], month: &str, year: i32) -> Self {
        let overdue = overdue_members(members, payments, month, year);
        let total_collected = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| p.amount)
            .sum();
        Self {
            total_members: members.len(),
            active_members: members.iter().filter(|m| m.active).count(),
            overdue_count: overdue.len(),
            total_collected,
        }
    }
}
