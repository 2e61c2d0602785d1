//! Shared gateway error kinds and error value helpers.
//!
//! ```rust
//! use qgateway::GatewayError;
//!
//! let rejected = GatewayError::rejected("No input provided");
//! assert!(!rejected.is_unreachable());
//!
//! let timeout = GatewayError::timeout("timeout of 30000ms exceeded");
//! assert!(timeout.is_unreachable());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// The gateway could not be reached.
    Network,
    Timeout,
    /// The gateway answered with a structured error payload.
    Rejected,
    InvalidRequest,
    /// The gateway answered, but the payload could not be decoded.
    Decode,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Timeout, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Rejected, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidRequest, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Decode, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Other, message)
    }

    /// The request never got an answer, either because the connection failed or it timed out.
    pub fn is_unreachable(&self) -> bool {
        matches!(self.kind, GatewayErrorKind::Network | GatewayErrorKind::Timeout)
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for GatewayError {}

impl From<serde_json::Error> for GatewayError {
    fn from(value: serde_json::Error) -> Self {
        GatewayError::decode(value.to_string())
    }
}
