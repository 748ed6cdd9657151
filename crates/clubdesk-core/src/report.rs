//! Monthly attendance summary: a pure transformation of fetched members
//! and attendance rows into a printable table, one row per member and one
//! column per date that saw any attendance for the category.

use crate::attendance::AttendanceRecord;
use crate::category::Category;
use crate::ids::ids_match;
use crate::member::Member;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct MemberAttendanceRow {
    pub member_id: String,
    pub member_name: String,
    /// Presence per active date, aligned with `MonthlyReport::active_dates`.
    pub presences: Vec<bool>,
    pub present_count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub category: Category,
    pub year: i32,
    pub month: u32,
    pub active_dates: Vec<NaiveDate>,
    pub rows: Vec<MemberAttendanceRow>,
}

/// Build the report for one (category, year, month).
///
/// Returns `None` when the month has no attendance dates at all for the
/// category; callers render that as an explicit "no data" notice instead
/// of a table of zero columns.
pub fn monthly_attendance(
    members: &[Member],
    records: &[AttendanceRecord],
    category: Category,
    year: i32,
    month: u32,
) -> Option<MonthlyReport> {
    let in_scope: Vec<(&AttendanceRecord, NaiveDate)> = records
        .iter()
        .filter(|r| r.category.trim() == category.label())
        .filter_map(|r| {
            let date = NaiveDate::parse_from_str(r.date.trim(), "%Y-%m-%d").ok()?;
            (date.year() == year && date.month() == month).then_some((r, date))
        })
        .collect();

    let mut active_dates: Vec<NaiveDate> = in_scope.iter().map(|(_, d)| *d).collect();
    active_dates.sort_unstable();
    active_dates.dedup();

    if active_dates.is_empty() {
        return None;
    }

    let rows = members
        .iter()
        .filter(|m| m.category == category)
        .map(|m| {
            let presences: Vec<bool> = active_dates
                .iter()
                .map(|date| {
                    in_scope
                        .iter()
                        .any(|(r, d)| d == date && r.present && ids_match(&r.member_id, &m.id))
                })
                .collect();
            let present_count = presences.iter().filter(|p| **p).count();
            let percent = (present_count as f64 / active_dates.len() as f64) * 100.0;
            MemberAttendanceRow {
                member_id: m.id.clone(),
                member_name: m.full_name(),
                presences,
                present_count,
                percent,
            }
        })
        .collect();

    Some(MonthlyReport {
        category,
        year,
        month,
        active_dates,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, first: &str, category: Category) -> Member {
        Member {
            id: id.into(),
            first_name: first.into(),
            last_name: "Test".into(),
            category,
            guardian_name: String::new(),
            guardian_phone: String::new(),
            active: true,
            enrolled_at: None,
        }
    }

    fn record(member_id: &str, date: &str, present: bool) -> AttendanceRecord {
        AttendanceRecord::mark(member_id, date, Category::Decima.label(), present)
    }

    #[test]
    fn percentages_over_active_dates() {
        let members = vec![
            member("a", "Ana", Category::Decima),
            member("b", "Bruno", Category::Decima),
        ];
        let records = vec![
            record("a", "2025-03-03", true),
            record("a", "2025-03-10", true),
            record("a", "2025-03-17", true),
            record("a", "2025-03-24", false),
            record("b", "2025-03-03", false),
            record("b", "2025-03-10", false),
            record("b", "2025-03-17", false),
            record("b", "2025-03-24", false),
        ];

        let report = monthly_attendance(&members, &records, Category::Decima, 2025, 3).unwrap();
        assert_eq!(report.active_dates.len(), 4);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].present_count, 3);
        assert_eq!(report.rows[0].percent, 75.0);
        assert_eq!(report.rows[1].present_count, 0);
        assert_eq!(report.rows[1].percent, 0.0);
    }

    #[test]
    fn no_active_dates_is_explicit_no_data() {
        let members = vec![member("a", "Ana", Category::Decima)];
        assert!(monthly_attendance(&members, &[], Category::Decima, 2025, 3).is_none());
        // Records exist, but for another month.
        let other_month = vec![record("a", "2025-04-07", true)];
        assert!(monthly_attendance(&members, &other_month, Category::Decima, 2025, 3).is_none());
    }

    #[test]
    fn ignores_other_categories_and_unparseable_dates() {
        let members = vec![member("a", "Ana", Category::Decima)];
        let mut stray = record("a", "2025-03-03", true);
        stray.category = Category::Infantil.label().into();
        let records = vec![
            stray,
            AttendanceRecord::mark("a", "yesterday", Category::Decima.label(), true),
            record("a", "2025-03-10", true),
        ];
        let report = monthly_attendance(&members, &records, Category::Decima, 2025, 3).unwrap();
        assert_eq!(report.active_dates.len(), 1);
        assert_eq!(report.rows[0].percent, 100.0);
    }

    #[test]
    fn members_without_records_still_get_rows() {
        let members = vec![
            member("a", "Ana", Category::Decima),
            member("c", "Caro", Category::Decima),
        ];
        let records = vec![record("a", "2025-03-03", true)];
        let report = monthly_attendance(&members, &records, Category::Decima, 2025, 3).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[1].present_count, 0);
        assert_eq!(report.rows[1].percent, 0.0);
    }
}
