use crate::error::InsightsError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Shown whenever the generative call cannot produce a summary. The
/// dashboard never surfaces an insights failure as an error.
pub const INSIGHTS_PLACEHOLDER: &str =
    "Strategic insights will be available once the AI connection is configured.";

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsConfig {
    /// OpenAI-compatible chat-completions endpoint.
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

/// The small snapshot the summarizer sees. Nothing member-identifying
/// leaves the process.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSnapshot {
    pub club_name: String,
    pub member_count: usize,
    pub overdue_count: usize,
    pub total_collected: f64,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Clone)]
pub struct InsightsClient {
    http: Client,
    config: InsightsConfig,
}

impl InsightsClient {
    pub fn new(config: InsightsConfig) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    /// Three analytical sentences for the club director, or an error the
    /// caller turns into [`INSIGHTS_PLACEHOLDER`].
    pub async fn club_summary(&self, snapshot: &ClubSnapshot) -> Result<String, InsightsError> {
        if self.config.api_key.trim().is_empty() {
            return Err(InsightsError::Disabled);
        }

        let data = serde_json::to_string(snapshot).unwrap_or_default();
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: format!(
                        "You are the strategic consultant of \"{}\", a grassroots football club. \
                         Speak with sporting authority, keep a professional tone and mention the \
                         club by name.",
                        snapshot.club_name
                    ),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!(
                        "Analyze this club data: {data}. Give the club director a summary of \
                         three motivating, analytical sentences about the state of the players \
                         and the finances."
                    ),
                },
            ],
            stream: false,
            temperature: 0.8,
        };

        debug!(model = %self.config.model, "requesting club summary");
        let response = self
            .http
            .post(self.config.base_url.as_str())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InsightsError::Api { status, body });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(InsightsError::Transport)?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(InsightsError::Empty)
    }

    /// Degrading wrapper the dashboard calls.
    pub async fn summary_or_placeholder(&self, snapshot: &ClubSnapshot) -> String {
        match self.club_summary(snapshot).await {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, "club summary unavailable");
                INSIGHTS_PLACEHOLDER.to_string()
            }
        }
    }
}
