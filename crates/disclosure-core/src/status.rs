//! Upstream status code classification.
//!
//! Every registry response carries a three-digit status string. [`classify`] is the only
//! place those strings are interpreted; everything else matches on [`Status`].

use serde::{Deserialize, Serialize};

/// Status code for a successful response.
pub const STATUS_OK: &str = "000";

/// Status code for "no data matched the query".
pub const STATUS_NO_DATA: &str = "013";

/// Message used when a rejection carries no message of its own.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Classified upstream status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The request succeeded. Whether any records came back is checked separately.
    Success,
    /// No data matched the query or scope.
    EmptyResult,
    /// The upstream rejected the request.
    FatalError {
        /// Raw status code.
        code: String,
        /// Upstream message, or [`UNKNOWN_ERROR`].
        message: String,
    },
}

impl Status {
    /// Returns true for [`Status::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Classifies a raw upstream status code and its optional message.
#[must_use]
pub fn classify(code: &str, message: Option<&str>) -> Status {
    match code {
        STATUS_OK => Status::Success,
        STATUS_NO_DATA => Status::EmptyResult,
        other => Status::FatalError {
            code: other.to_string(),
            message: message
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(UNKNOWN_ERROR)
                .to_string(),
        },
    }
}

/// Returns a human-readable description of a known upstream status code.
#[must_use]
pub fn describe(code: &str) -> Option<&'static str> {
    match code {
        "000" => Some("normal"),
        "010" => Some("unregistered key"),
        "011" => Some("key not permitted"),
        "012" => Some("IP address not permitted"),
        "013" => Some("no data matched the query"),
        "014" => Some("file does not exist"),
        "020" => Some("request limit exceeded"),
        "021" => Some("too many companies in one request"),
        "100" => Some("invalid field value"),
        "101" => Some("unauthorized access"),
        "800" => Some("system maintenance"),
        "900" => Some("undefined upstream error"),
        "901" => Some("key expired"),
        _ => None,
    }
}
