//! Chat-layer errors and classification.
//!
//! ```rust
//! use qchat::{ChatError, ChatErrorKind};
//! use qgateway::GatewayError;
//!
//! let err = ChatError::from(GatewayError::timeout("timeout of 30000ms exceeded"));
//! assert_eq!(err.kind, ChatErrorKind::Network);
//! assert_eq!(err.message, "timeout of 30000ms exceeded");
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use qgateway::{GatewayError, GatewayErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    /// Rejected locally before any state change.
    Validation,
    /// The gateway was unreachable or timed out.
    Network,
    /// The gateway answered with a structured error.
    Gateway,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Network, message)
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Gateway, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Unexpected, message)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<GatewayError> for ChatError {
    fn from(value: GatewayError) -> Self {
        let kind = if value.is_unreachable() {
            ChatErrorKind::Network
        } else {
            match value.kind {
                GatewayErrorKind::Rejected | GatewayErrorKind::InvalidRequest => {
                    ChatErrorKind::Gateway
                }
                _ => ChatErrorKind::Unexpected,
            }
        };

        ChatError::new(kind, value.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_errors_collapse_into_three_turn_failure_kinds() {
        let cases = [
            (GatewayError::network("refused"), ChatErrorKind::Network),
            (GatewayError::timeout("slow"), ChatErrorKind::Network),
            (GatewayError::rejected("bad"), ChatErrorKind::Gateway),
            (GatewayError::invalid_request("empty"), ChatErrorKind::Gateway),
            (GatewayError::decode("html"), ChatErrorKind::Unexpected),
            (GatewayError::other("?"), ChatErrorKind::Unexpected),
        ];

        for (source, expected) in cases {
            let message = source.message.clone();
            let mapped = ChatError::from(source);
            assert_eq!(mapped.kind, expected);
            assert_eq!(mapped.message, message);
        }
    }
}
