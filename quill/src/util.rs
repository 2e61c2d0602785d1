//! Small convenience constructors and parsers for common types.

use crate::{
    DestinationHint, FileRef, GatewayMode, Message, TurnRequest, Upload, format_timestamp_now,
};

pub fn file(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> FileRef {
    FileRef::new(name, mime_type, bytes)
}

pub fn text_turn(text: impl Into<String>) -> TurnRequest {
    TurnRequest::text(text)
}

pub fn upload_turn(text: Option<&str>, uploads: Vec<Upload>) -> TurnRequest {
    let request = TurnRequest::new().with_uploads(uploads);
    match text {
        Some(text) => request.with_text(text),
        None => request,
    }
}

pub fn destination(notebook: impl Into<String>, section: impl Into<String>) -> DestinationHint {
    DestinationHint::new(notebook, section)
}

pub fn parse_gateway_mode(value: &str) -> Option<GatewayMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" | "txt" | "file" | "document" => Some(GatewayMode::Text),
        "image" | "img" | "photo" | "picture" => Some(GatewayMode::Image),
        "audio" | "voice" | "sound" | "recording" => Some(GatewayMode::Audio),
        _ => None,
    }
}

/// Relative timestamp for chat bubbles, such as `5m ago`.
pub fn message_age(message: &Message) -> String {
    format_timestamp_now(message.timestamp)
}

#[cfg(test)]
mod tests {
    use crate::{GatewayMode, Message, MessageType, Role};

    use super::{destination, message_age, parse_gateway_mode, upload_turn};

    #[test]
    fn parse_gateway_mode_supports_aliases() {
        assert_eq!(parse_gateway_mode("text"), Some(GatewayMode::Text));
        assert_eq!(parse_gateway_mode(" File "), Some(GatewayMode::Text));
        assert_eq!(parse_gateway_mode("Photo"), Some(GatewayMode::Image));
        assert_eq!(parse_gateway_mode("voice"), Some(GatewayMode::Audio));
        assert_eq!(parse_gateway_mode("video"), None);
    }

    #[test]
    fn turn_and_destination_helpers_apply_expected_defaults() {
        assert!(upload_turn(None, Vec::new()).is_empty());
        assert_eq!(upload_turn(Some(" hi "), Vec::new()).trimmed_text(), Some("hi"));

        let hint = destination("Work", "");
        assert_eq!(hint.notebook.as_deref(), Some("Work"));
        assert_eq!(hint.section, None);
    }

    #[test]
    fn fresh_messages_read_as_just_now() {
        let message = Message::new(Role::User, MessageType::Text, "hello");
        assert_eq!(message_age(&message), "Just now");
    }
}
