use crate::category::Category;
use crate::coerce;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "Training")]
    Training,
    #[serde(rename = "Match")]
    Match,
    #[serde(rename = "Special Event")]
    SpecialEvent,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Training => "Training",
            EventKind::Match => "Match",
            EventKind::SpecialEvent => "Special Event",
        }
    }

    pub fn all() -> [EventKind; 3] {
        [EventKind::Training, EventKind::Match, EventKind::SpecialEvent]
    }

    pub fn next(&self) -> EventKind {
        match self {
            EventKind::Training => EventKind::Match,
            EventKind::Match => EventKind::SpecialEvent,
            EventKind::SpecialEvent => EventKind::Training,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the training/match calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingEvent {
    #[serde(default, deserialize_with = "coerce::loose_string")]
    pub id: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Free-text day label, e.g. "Sábado 15".
    pub day: String,
    #[serde(
        default,
        deserialize_with = "coerce::loose_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "coerce::loose_string")]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub plan: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_uses_display_labels() {
        let json = serde_json::to_string(&EventKind::SpecialEvent).unwrap();
        assert_eq!(json, "\"Special Event\"");
    }

    #[test]
    fn deserializes_with_missing_optionals() {
        let e: TrainingEvent = serde_json::from_str(
            r#"{"id": "event-1", "category": "Cebollitas (5-6)", "type": "Match",
                "day": "Sábado 15", "time": "10:00"}"#,
        )
        .unwrap();
        assert_eq!(e.kind, EventKind::Match);
        assert_eq!(e.date, None);
        assert!(e.instructor.is_empty());
    }
}
