use thiserror::Error;

/// Failure of one gateway call. The gateway never panics and never
/// returns ad hoc sentinels: every call site gets exactly this.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no session token; sign in again")]
    MissingToken,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{action}: {message} (HTTP {status})")]
    Status {
        action: String,
        status: u16,
        message: String,
    },
}

/// Failure of the generative summary call. Callers map every variant to
/// a static placeholder; none of these reaches the user as an error.
#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("insights disabled: no API key configured")]
    Disabled,

    #[error("insights request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("insights API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("insights API returned no text")]
    Empty,
}
