use crate::coerce;
use serde::{Deserialize, Serialize};

/// One presence mark for one member on one date.
///
/// The category is kept as raw text: historical rows predate the current
/// bracket labels and must not break deserialization of the whole sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(
        default,
        deserialize_with = "coerce::loose_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "coerce::loose_string")]
    pub member_id: String,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "coerce::loose_string")]
    pub date: String,
    #[serde(default, deserialize_with = "coerce::loose_bool")]
    pub present: bool,
    #[serde(default, deserialize_with = "coerce::loose_string")]
    pub category: String,
}

impl AttendanceRecord {
    pub fn mark(member_id: &str, date: &str, category: &str, present: bool) -> Self {
        Self {
            id: None,
            member_id: member_id.to_string(),
            date: date.to_string(),
            present,
            category: category.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_coerced_from_text() {
        let r: AttendanceRecord = serde_json::from_str(
            r#"{"memberId": 12, "date": "2025-03-10", "present": "TRUE",
                "category": "Décima (9-10)"}"#,
        )
        .unwrap();
        assert_eq!(r.member_id, "12");
        assert!(r.present);
        assert_eq!(r.id, None);
    }

    #[test]
    fn batch_mark_has_no_id() {
        let r = AttendanceRecord::mark("member-1", "2025-03-10", "Cebollitas (5-6)", false);
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["present"], serde_json::json!(false));
    }
}
