use crate::error::GatewayError;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Read actions are named by convention; everything else is a write.
pub const READ_ACTION_PREFIX: &str = "obtain-";
pub const VALIDATE_USER_ACTION: &str = "validate-user";

pub fn is_read_action(action: &str) -> bool {
    action.starts_with(READ_ACTION_PREFIX) || action == VALIDATE_USER_ACTION
}

/// Thin transport over the spreadsheet-backed endpoint: one URL, reads as
/// GET with query parameters, writes as POST with a JSON envelope.
///
/// Constructed with the identity it acts as; nothing here reads ambient
/// session state. No retries, no deduplication, one shared timeout.
#[derive(Clone)]
pub struct SheetGateway {
    http: Client,
    base_url: String,
    user_token: Option<String>,
}

/// POST body shape the endpoint expects. `id`, `estado` and `sheet` are
/// lifted out of the payload because the backend script reads them at the
/// top level.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteEnvelope<'a> {
    action: &'a str,
    user_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sheet: Option<String>,
}

impl SheetGateway {
    pub fn new(base_url: impl Into<String>, user_token: Option<String>, timeout: Duration) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
            user_token,
        }
    }

    /// Same endpoint, acting as a different identity.
    pub fn with_token(&self, user_token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            user_token: Some(user_token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatch one logical action. Reads require a session token except
    /// for the authorization check, which carries the candidate email in
    /// the token slot instead.
    pub async fn invoke(&self, action: &str, payload: Option<Value>) -> Result<Value, GatewayError> {
        if is_read_action(action) {
            let token = if action == VALIDATE_USER_ACTION {
                payload
                    .as_ref()
                    .and_then(|p| p.get("email"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or_else(|| self.user_token.clone())
                    .ok_or(GatewayError::MissingToken)?
            } else {
                self.user_token.clone().ok_or(GatewayError::MissingToken)?
            };
            self.get_json(action, &token).await
        } else {
            let token = self.user_token.clone().ok_or(GatewayError::MissingToken)?;
            self.post_json(action, &token, payload).await
        }
    }

    async fn get_json(&self, action: &str, token: &str) -> Result<Value, GatewayError> {
        debug!(action, "gateway read");
        let response = self
            .http
            .get(self.base_url.as_str())
            .query(&[("action", action), ("userToken", token)])
            .send()
            .await?;
        self.check_and_parse(action, response).await
    }

    async fn post_json(
        &self,
        action: &str,
        token: &str,
        payload: Option<Value>,
    ) -> Result<Value, GatewayError> {
        debug!(action, "gateway write");
        let envelope = WriteEnvelope {
            action,
            user_token: token,
            data: payload.as_ref(),
            id: top_level_string(payload.as_ref(), "id"),
            estado: top_level_string(payload.as_ref(), "estado"),
            sheet: top_level_string(payload.as_ref(), "sheet"),
        };
        let response = self
            .http
            .post(self.base_url.as_str())
            .json(&envelope)
            .send()
            .await?;
        self.check_and_parse(action, response).await
    }

    /// Non-2xx becomes `GatewayError::Status`; a 2xx body that is empty
    /// or not JSON parses to `Value::Null` rather than failing, because
    /// the endpoint routinely answers writes with opaque bodies.
    async fn check_and_parse(
        &self,
        action: &str,
        response: reqwest::Response,
    ) -> Result<Value, GatewayError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let value: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

        if !status.is_success() {
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("server error ({})", status.as_u16()));
            warn!(action, status = status.as_u16(), %message, "gateway call rejected");
            return Err(GatewayError::Status {
                action: action.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(value)
    }
}

fn top_level_string(payload: Option<&Value>, key: &str) -> Option<String> {
    payload?
        .get(key)
        .and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_classification() {
        assert!(is_read_action("obtain-members"));
        assert!(is_read_action("validate-user"));
        assert!(!is_read_action("save-member"));
        assert!(!is_read_action("delete-row"));
    }

    #[test]
    fn envelope_lifts_top_level_keys() {
        let payload = serde_json::json!({"sheet": "Pagos", "id": 17, "estado": "PAID"});
        assert_eq!(
            top_level_string(Some(&payload), "id").as_deref(),
            Some("17")
        );
        assert_eq!(
            top_level_string(Some(&payload), "sheet").as_deref(),
            Some("Pagos")
        );
        assert_eq!(top_level_string(Some(&payload), "missing"), None);
        // Arrays (attendance batches) have no top-level keys to lift.
        let batch = serde_json::json!([{"id": "x"}]);
        assert_eq!(top_level_string(Some(&batch), "id"), None);
    }
}
