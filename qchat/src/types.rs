//! Chat message, upload, destination, and turn types.

use chrono::{DateTime, Utc};
use qcommon::unique_id;
use qgateway::{FileRef, GatewayMode};

use crate::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Content classification shared by messages and uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Text,
    Image,
    Audio,
    File,
}

impl MessageType {
    /// Generic files travel to the gateway as text.
    pub fn transport_mode(self) -> GatewayMode {
        match self {
            Self::Image => GatewayMode::Image,
            Self::Audio => GatewayMode::Audio,
            Self::Text | Self::File => GatewayMode::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::File => "file",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageMetadata {
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub mime_type: Option<String>,
    pub processing_status: Option<ProcessingStatus>,
}

impl MessageMetadata {
    pub fn for_file(file: &FileRef) -> Self {
        Self {
            file_name: Some(file.name().to_string()),
            file_size: Some(file.size()),
            mime_type: Some(file.mime_type().to_string()),
            processing_status: None,
        }
    }

    pub fn with_processing_status(mut self, status: ProcessingStatus) -> Self {
        self.processing_status = Some(status);
        self
    }
}

/// One entry of the conversation log. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub kind: MessageType,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: Option<MessageMetadata>,
}

impl Message {
    pub fn new(role: Role, kind: MessageType, content: impl Into<String>) -> Self {
        Self {
            id: unique_id(),
            role,
            kind,
            content: content.into(),
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether this message reports a failed turn rather than a result.
    pub fn is_failure(&self) -> bool {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.processing_status)
            == Some(ProcessingStatus::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Completed,
    Error,
}

impl UploadStatus {
    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Uploading => 1,
            Self::Completed | Self::Error => 2,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Status only moves forward: pending, uploading, then completed or error.
    pub fn can_advance_to(self, next: UploadStatus) -> bool {
        !self.is_terminal() && next.rank() >= self.rank()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub id: String,
    pub file: FileRef,
    pub kind: MessageType,
    /// `data:` URI, images only.
    pub preview: Option<String>,
    /// Percentage, meaningful only while uploading.
    pub progress: Option<u8>,
    pub status: UploadStatus,
}

impl Upload {
    pub fn name(&self) -> &str {
        self.file.name()
    }

    /// Applies a partial update. Backward status moves are dropped, and progress is frozen once
    /// the upload has reached a terminal status.
    pub fn apply(&mut self, patch: UploadPatch) {
        let was_terminal = self.status.is_terminal();

        if let Some(progress) = patch.progress
            && !was_terminal
        {
            self.progress = Some(progress.min(100));
        }

        if let Some(status) = patch.status
            && self.status.can_advance_to(status)
        {
            self.status = status;
        }

        if let Some(preview) = patch.preview {
            self.preview = Some(preview);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadPatch {
    pub status: Option<UploadStatus>,
    pub progress: Option<u8>,
    pub preview: Option<String>,
}

impl UploadPatch {
    pub fn status(status: UploadStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn preview(preview: impl Into<String>) -> Self {
        Self {
            preview: Some(preview.into()),
            ..Self::default()
        }
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// User-chosen filing destination passed through to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DestinationHint {
    pub notebook: Option<String>,
    pub section: Option<String>,
}

impl DestinationHint {
    pub fn new(notebook: impl Into<String>, section: impl Into<String>) -> Self {
        Self::default().with_notebook(notebook).with_section(section)
    }

    pub fn with_notebook(mut self, notebook: impl Into<String>) -> Self {
        self.notebook = non_empty(notebook.into());
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = non_empty(section.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.notebook.is_none() && self.section.is_none()
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnRequest {
    pub text: Option<String>,
    pub uploads: Vec<Upload>,
    /// Overrides the session's destination for this turn only.
    pub destination: Option<DestinationHint>,
}

impl TurnRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_upload(mut self, upload: Upload) -> Self {
        self.uploads.push(upload);
        self
    }

    pub fn with_uploads(mut self, uploads: Vec<Upload>) -> Self {
        self.uploads = uploads;
        self
    }

    pub fn with_destination(mut self, destination: DestinationHint) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed_text().is_none() && self.uploads.is_empty()
    }
}

/// How a turn ended. Turns never fail with `Err`; failures are reflected in state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Neither text nor uploads; nothing happened.
    Empty,
    /// Another turn was still running; nothing happened.
    Busy,
    Completed { responses: usize },
    Failed(ChatError),
}

impl TurnOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Busy => "busy",
            Self::Completed { .. } => "completed",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn error(&self) -> Option<&ChatError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}
