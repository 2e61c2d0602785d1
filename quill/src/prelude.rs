//! Common imports for most quill applications.

pub use crate::{
    SessionBundle, build_session, build_session_with, chat_service, chat_service_with_policy,
    destination, file, message_age, observed_chat_service, parse_gateway_mode, text_turn,
    upload_turn,
};
pub use crate::{quill_destination, quill_turn};
pub use crate::{
    BackendGateway, BoxFuture, ChatError, ChatErrorKind, ChatPolicy, ChatService,
    ChatServiceBuilder, ConversationState, DestinationCatalog, DestinationHint, FileRef,
    GatewayError, GatewayErrorKind, GatewayFuture, GatewayMode, GatewayRequest, GatewayResponse,
    Message, MessageType, NotebookDirectory, NotebookSections, Role, Route, SessionHooks,
    SessionId, TurnOutcome, TurnRequest, Upload, UploadPatch, UploadPolicy, UploadStatus,
};
