use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level. Owner sees everything; staff is restricted to the
/// registry, attendance and calendar views.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "owner")]
    Owner,
    #[serde(rename = "staff")]
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Staff => "staff",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Role::Owner => "Sporting Director",
            Role::Staff => "Coach",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity. Persisted verbatim as the session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub rol: Role,
}

impl SessionUser {
    pub fn new(email: impl Into<String>, rol: Role) -> Self {
        Self {
            email: email.into(),
            rol,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.rol == Role::Owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_serializes_with_rol_key() {
        let user = SessionUser::new("admin@club.com", Role::Owner);
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"email":"admin@club.com","rol":"owner"}"#);
        let back: SessionUser = serde_json::from_str(&json).unwrap();
        assert!(back.is_owner());
    }
}
