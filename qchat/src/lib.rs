//! Conversation state and upload orchestration for the note-filing chat client.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use qchat::prelude::*;
//! use qgateway::{
//!     BackendGateway, GatewayError, GatewayFuture, GatewayRequest, GatewayResponse, Route,
//! };
//!
//! struct AcknowledgingGateway;
//!
//! impl BackendGateway for AcknowledgingGateway {
//!     fn send<'a>(
//!         &'a self,
//!         _request: GatewayRequest,
//!     ) -> GatewayFuture<'a, Result<GatewayResponse, GatewayError>> {
//!         Box::pin(async { Ok(GatewayResponse::new("Got it", Route::unrouted())) })
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread()
//! #     .enable_all()
//! #     .build()
//! #     .expect("runtime")
//! #     .block_on(async {
//! let service = ChatService::new(Arc::new(AcknowledgingGateway));
//! let outcome = service.send_text("hello").await;
//!
//! assert_eq!(outcome, TurnOutcome::Completed { responses: 1 });
//! assert_eq!(service.state().messages.len(), 2);
//! # });
//! ```

mod destination;
mod error;
mod format;
mod hooks;
mod service;
mod store;
mod types;
mod upload;

pub mod prelude {
    pub use crate::{
        ChatAction, ChatError, ChatErrorKind, ChatPolicy, ChatService, ChatServiceBuilder,
        ConversationState, ConversationStore, DestinationCatalog, DestinationHint,
        DestinationHolder, Message, MessageMetadata, MessageType, NoopSessionHooks,
        ProcessingStatus, Role, SessionHooks, TurnOutcome, TurnRequest, Upload, UploadPatch,
        UploadPolicy, UploadStatus,
    };
    pub use qcommon::SessionId;
}

pub use destination::{DestinationCatalog, DestinationHolder};
pub use error::{ChatError, ChatErrorKind};
pub use format::{FAILURE_PREFIX, SUCCESS_PREAMBLE, failure_message, success_message};
pub use hooks::{NoopSessionHooks, SessionHooks};
pub use qcommon::SessionId;
pub use service::{ChatPolicy, ChatService, ChatServiceBuilder};
pub use store::{ChatAction, ConversationState, ConversationStore, reduce, reduce_all};
pub use types::{
    DestinationHint, Message, MessageMetadata, MessageType, ProcessingStatus, Role, TurnOutcome,
    TurnRequest, Upload, UploadPatch, UploadStatus,
};
pub use upload::{PreviewError, UploadManager, UploadPolicy, classify, derive_preview};
