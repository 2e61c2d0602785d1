//! Turn orchestration and the UI-facing chat session surface.
//!
//! A turn appends the user's messages, dispatches one gateway call per upload (or a single
//! text-only call) strictly in order, and folds every response or failure back into the
//! [`ConversationStore`]. Turns never return `Err`: failures end up in the session error field
//! and in an assistant failure message.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use qcommon::{SessionId, unique_id};
use qgateway::{BackendGateway, FileRef, GatewayError, GatewayMode, GatewayRequest, GatewayResponse};
use tokio::sync::watch;

use crate::{
    ChatAction, ChatError, ConversationState, ConversationStore, DestinationHint,
    DestinationHolder, Message, MessageMetadata, MessageType, NoopSessionHooks,
    ProcessingStatus, Role, SessionHooks, TurnOutcome, TurnRequest, Upload, UploadManager,
    UploadPatch, UploadPolicy, UploadStatus, failure_message, success_message,
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const INTERRUPTED_TURN: &str = "turn was interrupted before completion";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPolicy {
    /// Upper bound for a single gateway call; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub upload: UploadPolicy,
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self {
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            upload: UploadPolicy::default(),
        }
    }
}

impl ChatPolicy {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn without_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }

    pub fn with_upload_policy(mut self, upload: UploadPolicy) -> Self {
        self.upload = upload;
        self
    }
}

pub struct ChatServiceBuilder {
    gateway: Arc<dyn BackendGateway>,
    policy: ChatPolicy,
    hooks: Arc<dyn SessionHooks>,
    session_id: Option<SessionId>,
    store: Option<ConversationStore>,
}

impl ChatServiceBuilder {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            gateway,
            policy: ChatPolicy::default(),
            hooks: Arc::new(NoopSessionHooks),
            session_id: None,
            store: None,
        }
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Shares an existing store instead of starting from an empty session.
    pub fn store(mut self, store: ConversationStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> ChatService {
        let store = self.store.unwrap_or_default();

        ChatService {
            session_id: self.session_id.unwrap_or_else(SessionId::generate),
            gateway: self.gateway,
            uploads: UploadManager::new(store.clone(), self.policy.upload),
            store,
            destination: Arc::new(DestinationHolder::new()),
            hooks: self.hooks,
            request_timeout: self.policy.request_timeout,
        }
    }
}

/// One chat session: its state, its active uploads, and the intents that drive them.
#[derive(Clone)]
pub struct ChatService {
    session_id: SessionId,
    gateway: Arc<dyn BackendGateway>,
    store: ConversationStore,
    uploads: UploadManager,
    destination: Arc<DestinationHolder>,
    hooks: Arc<dyn SessionHooks>,
    request_timeout: Option<Duration>,
}

impl ChatService {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self::builder(gateway).build()
    }

    pub fn builder(gateway: Arc<dyn BackendGateway>) -> ChatServiceBuilder {
        ChatServiceBuilder::new(gateway)
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> Arc<ConversationState> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ConversationState>> {
        self.store.subscribe()
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub async fn send_text(&self, text: impl Into<String>) -> TurnOutcome {
        self.send_turn(TurnRequest::text(text)).await
    }

    /// Sends `text` together with every upload that is still pending, in insertion order.
    pub async fn send_pending(&self, text: Option<&str>) -> TurnOutcome {
        let mut request = TurnRequest::new().with_uploads(self.store.snapshot().pending_uploads());
        if let Some(text) = text {
            request = request.with_text(text);
        }

        self.send_turn(request).await
    }

    pub async fn send_turn(&self, request: TurnRequest) -> TurnOutcome {
        let text = request.trimmed_text().map(str::to_string);
        if text.is_none() && request.uploads.is_empty() {
            return self.skip(TurnOutcome::Empty);
        }

        let TurnRequest {
            uploads,
            destination,
            ..
        } = request;
        let destination = destination.unwrap_or_else(|| self.destination.snapshot());

        let mut opening = vec![ChatAction::SetError(None), ChatAction::SetLoading(true)];
        if let Some(text) = &text {
            opening.push(ChatAction::AppendMessage(Message::new(
                Role::User,
                MessageType::Text,
                text.clone(),
            )));
        }
        opening.extend(
            uploads
                .iter()
                .map(|upload| ChatAction::AppendMessage(upload_message(upload))),
        );

        if !self
            .store
            .transact(|state| (!state.is_loading).then_some(opening))
        {
            return self.skip(TurnOutcome::Busy);
        }

        let mut guard = TurnGuard::arm(self.store.clone());
        let turn_id = unique_id();
        let started = Instant::now();
        self.hooks
            .on_turn_start(&self.session_id, &turn_id, uploads.len(), text.is_some());

        let outcome = match self
            .dispatch_turn(&mut guard, &turn_id, text.as_deref(), &uploads, &destination)
            .await
        {
            Ok(responses) => {
                guard.settle([ChatAction::ClearUploads, ChatAction::SetLoading(false)]);
                TurnOutcome::Completed { responses }
            }
            Err(error) => {
                guard.settle([
                    ChatAction::SetError(Some(error.message.clone())),
                    ChatAction::AppendMessage(failure_notice(&error)),
                    ChatAction::SetLoading(false),
                ]);
                TurnOutcome::Failed(error)
            }
        };

        self.hooks
            .on_turn_finish(&self.session_id, &turn_id, &outcome, started.elapsed());
        outcome
    }

    /// Validates and registers `file`; image previews are attached in the background.
    pub fn add_upload(&self, file: FileRef) -> Result<Upload, ChatError> {
        let name = file.name().to_string();
        let upload = match self.uploads.register(file) {
            Ok(upload) => upload,
            Err(error) => {
                self.hooks
                    .on_upload_rejected(&self.session_id, &name, &error);
                return Err(error);
            }
        };

        self.hooks.on_upload_registered(&self.session_id, &upload);

        if upload.kind == MessageType::Image {
            self.spawn_preview(upload.clone());
        }

        Ok(upload)
    }

    /// Refused while the upload is in flight.
    pub fn remove_upload(&self, id: &str) -> bool {
        let removed = self.uploads.remove(id);
        self.hooks.on_upload_removed(&self.session_id, id, removed);
        removed
    }

    pub fn transition_upload(&self, id: &str, patch: UploadPatch) -> bool {
        self.uploads.transition(id, patch)
    }

    pub fn set_destination(&self, notebook: impl Into<String>, section: impl Into<String>) {
        self.destination.set(notebook, section);
    }

    pub fn set_notebook(&self, notebook: impl Into<String>) {
        self.destination.set_notebook(notebook);
    }

    pub fn set_section(&self, section: impl Into<String>) {
        self.destination.set_section(section);
    }

    pub fn destination(&self) -> DestinationHint {
        self.destination.snapshot()
    }

    /// Empties messages, uploads, and the error in one published step.
    pub fn clear_session(&self) {
        self.store.dispatch_all(ChatAction::reset_session());
        self.hooks.on_session_cleared(&self.session_id);
    }

    pub fn dismiss_error(&self) {
        self.store.dispatch(ChatAction::SetError(None));
    }

    fn skip(&self, outcome: TurnOutcome) -> TurnOutcome {
        self.hooks.on_turn_skipped(&self.session_id, &outcome);
        outcome
    }

    async fn dispatch_turn(
        &self,
        guard: &mut TurnGuard,
        turn_id: &str,
        text: Option<&str>,
        uploads: &[Upload],
        destination: &DestinationHint,
    ) -> Result<usize, ChatError> {
        if uploads.is_empty() {
            let request = GatewayRequest::new(GatewayMode::Text)
                .with_optional_text(text)
                .with_destination(destination.notebook.clone(), destination.section.clone());
            let response = self.dispatch(turn_id, 0, request).await?;
            self.store
                .dispatch(ChatAction::AppendMessage(success_notice(&response)));
            return Ok(1);
        }

        for (index, upload) in uploads.iter().enumerate() {
            guard.in_flight = Some(upload.id.clone());
            self.store.dispatch(ChatAction::UpdateUpload {
                id: upload.id.clone(),
                patch: UploadPatch::status(UploadStatus::Uploading).with_progress(0),
            });

            let request = GatewayRequest::new(upload.kind.transport_mode())
                .with_optional_text(text)
                .with_file(upload.file.clone())
                .with_destination(destination.notebook.clone(), destination.section.clone());

            let result = self.dispatch(turn_id, index, request).await;
            guard.in_flight = None;
            match result {
                Ok(response) => self.store.dispatch_all([
                    ChatAction::UpdateUpload {
                        id: upload.id.clone(),
                        patch: UploadPatch::status(UploadStatus::Completed).with_progress(100),
                    },
                    ChatAction::AppendMessage(success_notice(&response)),
                ]),
                Err(error) => {
                    self.store.dispatch(ChatAction::UpdateUpload {
                        id: upload.id.clone(),
                        patch: UploadPatch::status(UploadStatus::Error),
                    });
                    return Err(error);
                }
            }
        }

        Ok(uploads.len())
    }

    async fn dispatch(
        &self,
        turn_id: &str,
        index: usize,
        request: GatewayRequest,
    ) -> Result<GatewayResponse, ChatError> {
        self.hooks
            .on_dispatch_start(&self.session_id, turn_id, index, request.mode);
        let started = Instant::now();

        let call = AssertUnwindSafe(async { self.gateway.send(request).await }).catch_unwind();
        let settled = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or_else(|_| Ok(Err(timeout_error(limit)))),
            None => call.await,
        };

        let result = match settled {
            Ok(result) => result.map_err(ChatError::from),
            Err(panic) => Err(ChatError::unexpected(panic_message(panic.as_ref()))),
        };

        match &result {
            Ok(_) => self.hooks.on_dispatch_success(
                &self.session_id,
                turn_id,
                index,
                started.elapsed(),
            ),
            Err(error) => self.hooks.on_dispatch_failure(
                &self.session_id,
                turn_id,
                index,
                error,
                started.elapsed(),
            ),
        }

        result
    }

    fn spawn_preview(&self, upload: Upload) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            self.hooks.on_preview_failed(
                &self.session_id,
                &upload.id,
                "no async runtime available for preview encoding",
            );
            return;
        };

        let uploads = self.uploads.clone();
        let hooks = Arc::clone(&self.hooks);
        let session_id = self.session_id.clone();

        runtime.spawn(async move {
            if let Err(error) = uploads.attach_preview(&upload).await {
                hooks.on_preview_failed(&session_id, &upload.id, &error.to_string());
            }
        });
    }
}

/// Settles a turn that stopped before reaching its outcome.
///
/// Armed once the opening actions are committed. A turn future dropped mid-flight, or unwound by
/// a panicking hook, publishes an interrupted-turn failure together with `is_loading = false`.
struct TurnGuard {
    store: ConversationStore,
    in_flight: Option<String>,
    armed: bool,
}

impl TurnGuard {
    fn arm(store: ConversationStore) -> Self {
        Self {
            store,
            in_flight: None,
            armed: true,
        }
    }

    fn settle(mut self, actions: impl IntoIterator<Item = ChatAction>) {
        self.armed = false;
        self.store.dispatch_all(actions);
    }
}

impl Drop for TurnGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let error = ChatError::unexpected(INTERRUPTED_TURN);
        let mut actions = Vec::with_capacity(4);
        if let Some(id) = self.in_flight.take() {
            actions.push(ChatAction::UpdateUpload {
                id,
                patch: UploadPatch::status(UploadStatus::Error),
            });
        }
        actions.extend([
            ChatAction::SetError(Some(error.message.clone())),
            ChatAction::AppendMessage(failure_notice(&error)),
            ChatAction::SetLoading(false),
        ]);
        self.store.dispatch_all(actions);
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("session_id", &self.session_id)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

fn upload_message(upload: &Upload) -> Message {
    Message::new(
        Role::User,
        upload.kind,
        format!("Uploaded: {}", upload.name()),
    )
    .with_metadata(MessageMetadata::for_file(&upload.file))
}

fn success_notice(response: &GatewayResponse) -> Message {
    Message::new(Role::Assistant, MessageType::Text, success_message(response))
        .with_metadata(MessageMetadata::default().with_processing_status(ProcessingStatus::Completed))
}

fn failure_notice(error: &ChatError) -> Message {
    Message::new(Role::Assistant, MessageType::Text, failure_message(error))
        .with_metadata(MessageMetadata::default().with_processing_status(ProcessingStatus::Error))
}

fn timeout_error(limit: Duration) -> GatewayError {
    GatewayError::timeout(format!(
        "gateway request timed out after {}ms",
        limit.as_millis()
    ))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned());

    match detail {
        Some(detail) => format!("gateway call panicked: {detail}"),
        None => "gateway call panicked".to_string(),
    }
}
