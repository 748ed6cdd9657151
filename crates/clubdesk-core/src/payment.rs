use crate::coerce;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "PAID")]
    Paid,
    #[serde(rename = "PENDING")]
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Pending => "PENDING",
        }
    }

    pub fn toggled(&self) -> PaymentStatus {
        match self {
            PaymentStatus::Paid => PaymentStatus::Pending,
            PaymentStatus::Pending => PaymentStatus::Paid,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One monthly fee charge for one member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, deserialize_with = "coerce::loose_string")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::loose_string")]
    pub member_id: String,
    pub month: String,
    #[serde(default, deserialize_with = "coerce::loose_i32")]
    pub year: i32,
    #[serde(default, deserialize_with = "coerce::loose_f64")]
    pub amount: f64,
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            "\"PAID\""
        );
        assert_eq!(PaymentStatus::Pending.toggled(), PaymentStatus::Paid);
    }

    #[test]
    fn deserializes_quoted_numbers() {
        let p: Payment = serde_json::from_str(
            r#"{"id": 3, "memberId": "member-1", "month": "March", "year": "2025",
                "amount": "8500", "status": "PENDING"}"#,
        )
        .unwrap();
        assert_eq!(p.id, "3");
        assert_eq!(p.year, 2025);
        assert_eq!(p.amount, 8500.0);
        assert_eq!(p.status, PaymentStatus::Pending);
    }
}
