use crate::category::Category;
use crate::coerce;
use serde::{Deserialize, Serialize};

/// A registered player. One row in the registry sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, deserialize_with = "coerce::loose_string")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub category: Category,
    pub guardian_name: String,
    #[serde(default, deserialize_with = "coerce::loose_string")]
    pub guardian_phone: String,
    #[serde(default, deserialize_with = "coerce::loose_bool")]
    pub active: bool,
    #[serde(
        default,
        deserialize_with = "coerce::loose_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub enrolled_at: Option<String>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match against the full name. Drives live search.
    pub fn name_matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty() || self.full_name().to_lowercase().contains(&term)
    }
}
