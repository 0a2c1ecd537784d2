use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Required parameter is missing: {0}")]
    MissingParameter(String),

    #[error("{0}")]
    DataNotFound(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    #[error("Library error: {0}")]
    Library(#[from] core_library::LibraryError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] bridge_traits::BridgeError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error codes of the client-facing protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ErrorCode {
    Generic,
    MissingParameter,
    DataNotFound,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Generic => 0,
            Self::MissingParameter => 10,
            Self::DataNotFound => 70,
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.as_u16()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Generic),
            10 => Ok(Self::MissingParameter),
            70 => Ok(Self::DataNotFound),
            other => Err(format!("Unknown error code: {}", other)),
        }
    }
}

/// Structured error body sent back to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl ServiceError {
    /// Protocol code this error is reported under.
    ///
    /// Absence reported by a collaborator counts as "data not found" no
    /// matter which layer it came from.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingParameter(_) => ErrorCode::MissingParameter,
            Self::DataNotFound(_) => ErrorCode::DataNotFound,
            Self::Library(err) if err.is_not_found() => ErrorCode::DataNotFound,
            Self::Bridge(err) if err.is_not_found() => ErrorCode::DataNotFound,
            _ => ErrorCode::Generic,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == ErrorCode::DataNotFound
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
