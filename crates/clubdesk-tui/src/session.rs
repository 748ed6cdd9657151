use clubdesk_core::{Role, SessionUser};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Identities recognized without asking the backend.
pub const OWNER_EMAIL: &str = "admin@club.com";
pub const STAFF_EMAIL: &str = "staff@club.com";

pub fn builtin_role(email: &str) -> Option<Role> {
    match email.trim() {
        OWNER_EMAIL => Some(Role::Owner),
        STAFF_EMAIL => Some(Role::Staff),
        _ => None,
    }
}

/// The persisted `{email, rol}` JSON file. Absence means unauthenticated;
/// a corrupt file is treated the same and overwritten on next login.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Option<SessionUser> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring corrupt session file");
                None
            }
        }
    }

    pub fn save(&self, user: &SessionUser) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(user)?)?;
        Ok(())
    }

    pub fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %err, "could not clear session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_identities() {
        assert_eq!(builtin_role("admin@club.com"), Some(Role::Owner));
        assert_eq!(builtin_role(" staff@club.com "), Some(Role::Staff));
        assert_eq!(builtin_role("coach@club.com"), None);
    }

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().is_none());

        let user = SessionUser::new("admin@club.com", Role::Owner);
        store.save(&user).unwrap();
        assert_eq!(store.load(), Some(user));

        store.clear();
        assert!(store.load().is_none());
        // Clearing twice is fine.
        store.clear();
    }

    #[test]
    fn corrupt_file_reads_as_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let store = SessionStore::new(path);
        assert!(store.load().is_none());
    }
}
