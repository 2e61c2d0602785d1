//! Unified facade over the quill workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core quill crates and provides convenience utilities
//! and macros for wiring a chat session to a backend gateway.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use quill::prelude::*;
//!
//! struct Offline;
//!
//! impl BackendGateway for Offline {
//!     fn send<'a>(
//!         &'a self,
//!         _request: GatewayRequest,
//!     ) -> GatewayFuture<'a, Result<GatewayResponse, GatewayError>> {
//!         Box::pin(async { Err(GatewayError::network("connection refused")) })
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread()
//! #     .enable_all()
//! #     .build()
//! #     .expect("runtime")
//! #     .block_on(async {
//! let chat = chat_service(Arc::new(Offline));
//! let outcome = chat.send_turn(quill_turn!("hello")).await;
//!
//! assert_eq!(outcome.error().map(|error| error.kind), Some(ChatErrorKind::Network));
//! assert_eq!(chat.state().error.as_deref(), Some("connection refused"));
//! # });
//! ```

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use qchat;
pub use qcommon;
pub use qgateway;
pub use qobserve;

pub use qchat::{
    ChatAction, ChatError, ChatErrorKind, ChatPolicy, ChatService, ChatServiceBuilder,
    ConversationState, ConversationStore, DestinationCatalog, DestinationHint, DestinationHolder,
    FAILURE_PREFIX, Message, MessageMetadata, MessageType, NoopSessionHooks, PreviewError,
    ProcessingStatus, Role, SUCCESS_PREAMBLE, SessionHooks, TurnOutcome, TurnRequest, Upload,
    UploadManager, UploadPatch, UploadPolicy, UploadStatus, classify, derive_preview,
    failure_message, reduce, reduce_all, success_message,
};
pub use qcommon::{
    BoxFuture, SessionId, format_file_size, format_timestamp, format_timestamp_now, unique_id,
};
pub use qgateway::{
    BackendGateway, FileRef, GatewayError, GatewayErrorKind, GatewayFuture, GatewayMode,
    GatewayRequest, GatewayResponse, NotebookDirectory, NotebookSections, Route, decode_notebooks,
    decode_response, error_from_status, extract_error_message,
};
pub use qobserve::{MetricsObservabilityHooks, SafeSessionHooks, TracingObservabilityHooks};

pub use runtime::{
    SessionBundle, build_session, build_session_with, chat_service, chat_service_with_policy,
    observed_chat_service,
};
pub use util::{destination, file, message_age, parse_gateway_mode, text_turn, upload_turn};

#[cfg(test)]
mod tests {
    use crate::{Upload, UploadStatus};

    #[test]
    fn quill_turn_macro_builds_text_and_upload_turns() {
        let turn = crate::quill_turn!("  hello  ");
        assert_eq!(turn.trimmed_text(), Some("hello"));

        let upload = Upload {
            id: "u1".to_string(),
            file: crate::file("a.png", "image/png", vec![1]),
            kind: crate::classify(&crate::file("a.png", "image/png", vec![1])),
            preview: None,
            progress: Some(0),
            status: UploadStatus::Pending,
        };
        let turn = crate::quill_turn!("caption", uploads => vec![upload]);
        assert_eq!(turn.uploads.len(), 1);
        assert_eq!(turn.trimmed_text(), Some("caption"));
    }

    #[test]
    fn quill_destination_macro_drops_blank_sections() {
        let hint = crate::quill_destination!("Work" => " ");
        assert_eq!(hint.notebook.as_deref(), Some("Work"));
        assert_eq!(hint.section, None);
    }
}
