use anyhow::Result;
use clubdesk_client::InsightsConfig;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub endpoint: EndpointConfig,
    pub club: ClubConfig,
    pub insights: InsightsConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    /// The spreadsheet-backed web app URL.
    pub url: String,
    pub timeout_seconds: u64,
}

impl EndpointConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClubConfig {
    pub name: String,
    /// Default amount pre-filled in the new-charge form.
    pub fee_amount: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub file: PathBuf,
}

impl Settings {
    /// Defaults, overridden by an optional settings file, overridden by
    /// `CLUBDESK__`-prefixed environment variables.
    pub fn load(file: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let default_session = dirs_fallback().join(".clubdesk").join("session.json");

        let config = Config::builder()
            .set_default("endpoint.url", "")?
            .set_default("endpoint.timeout_seconds", 30_i64)?
            .set_default("club.name", "Famaillá IF")?
            .set_default("club.fee_amount", 8500.0)?
            .set_default(
                "insights.base_url",
                "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
            )?
            .set_default("insights.model", "gemini-1.5-flash")?
            .set_default("insights.api_key", "")?
            .set_default(
                "session.file",
                default_session.to_string_lossy().to_string(),
            )?
            .add_source(File::with_name(file.unwrap_or("config/settings")).required(false))
            .add_source(
                Environment::with_prefix("CLUBDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}

fn dirs_fallback() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
