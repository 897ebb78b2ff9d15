// src/error.rs

use thiserror::Error;

/// Errors surfaced by the adapter.
///
/// The validation messages are part of the adapter's contract: callers match
/// on the rendered text for the first-slot short-circuit case, so the Display
/// output of `MissingParam` / `InvalidParam` must not change.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Missing {label} param {name}")]
    MissingParam {
        label: &'static str,
        name: &'static str,
    },

    #[error("Invalid {label} param {value}")]
    InvalidParam { label: &'static str, value: String },

    /// Every slot in the request failed validation (or none were supplied).
    #[error("No valid impressions in bid request")]
    NoValidImpressions,

    #[error("platformio call failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller-supplied deadline elapsed before the exchange answered.
    #[error("platformio call timed out")]
    Timeout,

    /// Anything other than 200 or the no-bid 204.
    #[error("HTTP status {0} from platformio")]
    BadStatus(reqwest::StatusCode),

    #[error("unexpected platformio response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AdapterError {
    pub fn missing(label: &'static str, name: &'static str) -> Self {
        AdapterError::MissingParam { label, name }
    }

    pub fn invalid(label: &'static str, value: impl Into<String>) -> Self {
        AdapterError::InvalidParam {
            label,
            value: value.into(),
        }
    }
}
