//! Conversation state, the reducer that evolves it, and the observable store around it.
//!
//! Every mutation is a [`ChatAction`] run through [`reduce`], which returns a fresh state value.
//! [`ConversationStore`] publishes each value as an `Arc` snapshot, so observers can detect
//! change by pointer identity.
//!
//! ```rust
//! use qchat::{ChatAction, ConversationStore, Message, MessageType, Role};
//!
//! let store = ConversationStore::new();
//! let before = store.snapshot();
//!
//! store.dispatch(ChatAction::AppendMessage(Message::new(
//!     Role::User,
//!     MessageType::Text,
//!     "hello",
//! )));
//!
//! let after = store.snapshot();
//! assert!(before.messages.is_empty());
//! assert_eq!(after.messages[0].content, "hello");
//! ```

use std::sync::Arc;

use tokio::sync::watch;

use crate::{Message, Upload, UploadPatch, UploadStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Active uploads in insertion order, unique by id.
    pub uploads: Vec<Upload>,
}

impl ConversationState {
    pub fn upload(&self, id: &str) -> Option<&Upload> {
        self.uploads.iter().find(|upload| upload.id == id)
    }

    pub fn pending_uploads(&self) -> Vec<Upload> {
        self.uploads
            .iter()
            .filter(|upload| upload.status == UploadStatus::Pending)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    AppendMessage(Message),
    SetLoading(bool),
    SetError(Option<String>),
    /// Ignored when an upload with the same id is already active.
    AddUpload(Upload),
    UpdateUpload { id: String, patch: UploadPatch },
    /// Ignored while the upload is in flight.
    RemoveUpload(String),
    ClearUploads,
    ClearMessages,
}

impl ChatAction {
    /// The three actions that together reset a session.
    pub fn reset_session() -> Vec<ChatAction> {
        vec![
            ChatAction::ClearMessages,
            ChatAction::ClearUploads,
            ChatAction::SetError(None),
        ]
    }
}

pub fn reduce(state: &ConversationState, action: ChatAction) -> ConversationState {
    let mut next = state.clone();

    match action {
        ChatAction::AppendMessage(message) => next.messages.push(message),
        ChatAction::SetLoading(is_loading) => next.is_loading = is_loading,
        ChatAction::SetError(error) => next.error = error,
        ChatAction::AddUpload(upload) => {
            if next.upload(&upload.id).is_none() {
                next.uploads.push(upload);
            }
        }
        ChatAction::UpdateUpload { id, patch } => {
            if let Some(upload) = next.uploads.iter_mut().find(|upload| upload.id == id) {
                upload.apply(patch);
            }
        }
        ChatAction::RemoveUpload(id) => {
            next.uploads
                .retain(|upload| upload.id != id || upload.status == UploadStatus::Uploading);
        }
        ChatAction::ClearUploads => next.uploads.clear(),
        ChatAction::ClearMessages => next.messages.clear(),
    }

    next
}

pub fn reduce_all(
    state: &ConversationState,
    actions: impl IntoIterator<Item = ChatAction>,
) -> ConversationState {
    actions
        .into_iter()
        .fold(state.clone(), |current, action| reduce(&current, action))
}

/// Single-writer home of one session's [`ConversationState`].
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    sender: Arc<watch::Sender<Arc<ConversationState>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::with_state(ConversationState::default())
    }

    pub fn with_state(state: ConversationState) -> Self {
        Self {
            sender: Arc::new(watch::Sender::new(Arc::new(state))),
        }
    }

    pub fn snapshot(&self) -> Arc<ConversationState> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ConversationState>> {
        self.sender.subscribe()
    }

    pub fn dispatch(&self, action: ChatAction) {
        self.dispatch_all([action]);
    }

    /// Applies the actions in order and publishes the result once.
    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = ChatAction>) {
        self.sender.send_modify(|state| {
            *state = Arc::new(reduce_all(state, actions));
        });
    }

    /// Lets `plan` inspect the current state and pick the actions to apply, atomically.
    ///
    /// Returning `None` leaves the state untouched and publishes nothing. Returns whether
    /// actions were applied.
    pub fn transact<F>(&self, plan: F) -> bool
    where
        F: FnOnce(&ConversationState) -> Option<Vec<ChatAction>>,
    {
        self.sender.send_if_modified(|state| match plan(state) {
            Some(actions) => {
                *state = Arc::new(reduce_all(state, actions));
                true
            }
            None => false,
        })
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
