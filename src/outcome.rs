//! Structured result returned by every operation on a `FileManager`.
//!
//! Exactly one `Outcome` per call. The front end only displays `message`;
//! `payload` carries the name the operation settled on (e.g. the
//! destination picked by the conflict resolver).

use std::fmt;

use crate::errors::FmError;

/// Outcome taxonomy. Maps 1:1 onto `FmError` variants plus `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Conflict,
    NotFound,
    PermissionDenied,
    InvalidInput,
    Unexpected,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Conflict => "conflict",
            Outcome::NotFound => "not_found",
            Outcome::PermissionDenied => "permission_denied",
            Outcome::InvalidInput => "invalid_input",
            Outcome::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub outcome: Outcome,
    pub message: String,
    pub payload: Option<String>,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            message: message.into(),
            payload: None,
        }
    }

    /// Attach the name the operation settled on.
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

impl From<FmError> for OperationResult {
    fn from(err: FmError) -> Self {
        Self {
            outcome: err.outcome(),
            message: err.to_string(),
            payload: None,
        }
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
