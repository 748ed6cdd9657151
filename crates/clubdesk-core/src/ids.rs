use chrono::Utc;

pub const MEMBER_ID_PREFIX: &str = "member";
pub const PAYMENT_ID_PREFIX: &str = "payment";
pub const EVENT_ID_PREFIX: &str = "event";

/// Mint a `<prefix>-<epoch-millis>` identifier.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}

/// Keep an existing identifier, otherwise mint one.
pub fn assign_id(existing: Option<&str>, prefix: &str) -> String {
    match existing {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => generate_id(prefix),
    }
}

/// Identifier equality across backend type drift: the sheet hands back
/// numeric ids for rows it created and strings for ours, so compare the
/// trimmed textual forms.
pub fn ids_match(a: &str, b: &str) -> bool {
    a.trim() == b.trim() && !a.trim().is_empty()
}
