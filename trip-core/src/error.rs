use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::ServiceId;

/// Structured failure reason returned by every fetcher.
///
/// Fetchers never print or display errors themselves; the presentation layer
/// decides whether a given failure becomes a per-section notice or aborts
/// the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(
        "No API key configured for {service}.\n\
         Hint: run `trip configure {service}` and enter your API key."
    )]
    MissingCredential { service: ServiceId },

    #[error("Request to {service} failed: {source}")]
    Transport {
        service: ServiceId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: ServiceId,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to decode {service} response: {message}")]
    Decode { service: ServiceId, message: String },
}

impl FetchError {
    /// Non-success HTTP status, keeping a truncated slice of the body for
    /// diagnostics.
    pub fn status(service: ServiceId, status: StatusCode, body: &str) -> Self {
        FetchError::Status { service, status, body: truncate_body(body) }
    }

    pub fn decode(service: ServiceId, message: impl std::fmt::Display) -> Self {
        FetchError::Decode { service, message: message.to_string() }
    }

    /// Which upstream service produced this failure.
    pub fn service(&self) -> ServiceId {
        match self {
            FetchError::MissingCredential { service }
            | FetchError::Transport { service, .. }
            | FetchError::Status { service, .. }
            | FetchError::Decode { service, .. } => *service,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
