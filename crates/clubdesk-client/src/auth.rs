use crate::error::GatewayError;
use crate::gateway::{SheetGateway, VALIDATE_USER_ACTION};
use clubdesk_core::Role;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

/// Backend's answer to the authorization check.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UserValidation {
    #[serde(default)]
    pub autorizado: bool,
    #[serde(default)]
    pub rol: Option<Role>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SheetGateway {
    /// Ask the backend whether an identity may sign in and with which
    /// role. Works without a session token; a malformed answer denies.
    pub async fn validate_user(&self, email: &str) -> Result<UserValidation, GatewayError> {
        let value = self
            .invoke(VALIDATE_USER_ACTION, Some(json!({ "email": email })))
            .await?;
        match serde_json::from_value(value) {
            Ok(validation) => Ok(validation),
            Err(err) => {
                warn!(error = %err, "unexpected validation response; denying");
                Ok(UserValidation::default())
            }
        }
    }
}
