//! File classification, acceptance policy, and the upload lifecycle.
//!
//! ```rust
//! use qchat::{MessageType, UploadPolicy, classify};
//! use qgateway::FileRef;
//!
//! let notes = FileRef::new("notes.md", "", b"# agenda".to_vec());
//! assert_eq!(classify(&notes), MessageType::Text);
//!
//! let policy = UploadPolicy::default();
//! let archive = FileRef::new("backup.zip", "application/zip", vec![0; 4]);
//! let err = policy.check(&archive).expect_err("zip archives are not accepted");
//! assert_eq!(err.message, "File type \"application/zip\" is not supported.");
//! ```

use std::fmt::{Display, Formatter};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qcommon::{format_file_size, unique_id};
use qgateway::FileRef;

use crate::{
    ChatAction, ChatError, ConversationStore, MessageType, Upload, UploadPatch, UploadStatus,
};

const TEXT_EXTENSIONS: [&str; 7] = [".txt", ".md", ".csv", ".json", ".xml", ".yaml", ".yml"];
const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Classifies by declared MIME type first, then by text-like filename extension.
pub fn classify(file: &FileRef) -> MessageType {
    let mime = file.mime_type().to_ascii_lowercase();

    if mime.starts_with("image/") {
        return MessageType::Image;
    }

    if mime.starts_with("audio/") {
        return MessageType::Audio;
    }

    let name = file.name().to_ascii_lowercase();
    if ["text", "json", "xml"].iter().any(|part| mime.contains(part))
        || TEXT_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    {
        return MessageType::Text;
    }

    MessageType::File
}

/// Which files may be attached at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_file_size: u64,
    /// `type/*` entries match the MIME prefix; anything else matches the filename suffix.
    pub accepted_types: Vec<String>,
    pub max_preview_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            accepted_types: ["image/*", "audio/*", ".txt", ".md", ".doc", ".docx", ".pdf"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            max_preview_bytes: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl UploadPolicy {
    pub fn unrestricted() -> Self {
        Self {
            max_file_size: u64::MAX,
            accepted_types: vec!["*".to_string()],
            max_preview_bytes: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_accepted_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_preview_bytes(mut self, bytes: u64) -> Self {
        self.max_preview_bytes = bytes;
        self
    }

    pub fn check(&self, file: &FileRef) -> Result<(), ChatError> {
        if file.size() > self.max_file_size {
            return Err(ChatError::validation(format!(
                "File \"{}\" is too large. Maximum size is {}.",
                file.name(),
                format_file_size(self.max_file_size)
            )));
        }

        if !self.accepts(file) {
            return Err(ChatError::validation(format!(
                "File type \"{}\" is not supported.",
                file.mime_type()
            )));
        }

        Ok(())
    }

    fn accepts(&self, file: &FileRef) -> bool {
        let mime = file.mime_type().to_ascii_lowercase();
        let name = file.name().to_ascii_lowercase();

        self.accepted_types.iter().any(|accepted| {
            let accepted = accepted.to_ascii_lowercase();
            match accepted.split_once('*') {
                Some((prefix, _)) => mime.starts_with(prefix),
                None => name.ends_with(&accepted),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    NotAnImage,
    Empty,
    TooLarge { size: u64, limit: u64 },
    Encoding(String),
}

impl Display for PreviewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnImage => f.write_str("previews are only derived for images"),
            Self::Empty => f.write_str("file is empty"),
            Self::TooLarge { size, limit } => write!(
                f,
                "file of {} exceeds the preview limit of {}",
                format_file_size(*size),
                format_file_size(*limit)
            ),
            Self::Encoding(message) => write!(f, "preview encoding failed: {message}"),
        }
    }
}

impl std::error::Error for PreviewError {}

/// Encodes an image as a `data:` URI on the blocking pool.
pub async fn derive_preview(file: &FileRef, max_bytes: u64) -> Result<String, PreviewError> {
    if classify(file) != MessageType::Image {
        return Err(PreviewError::NotAnImage);
    }

    if file.size() == 0 {
        return Err(PreviewError::Empty);
    }

    if file.size() > max_bytes {
        return Err(PreviewError::TooLarge {
            size: file.size(),
            limit: max_bytes,
        });
    }

    let file = file.clone();
    tokio::task::spawn_blocking(move || {
        format!(
            "data:{};base64,{}",
            file.mime_type(),
            STANDARD.encode(file.bytes())
        )
    })
    .await
    .map_err(|err| PreviewError::Encoding(err.to_string()))
}

/// Tracks selected files through pending, uploading, and completed or error.
#[derive(Debug, Clone)]
pub struct UploadManager {
    store: ConversationStore,
    policy: UploadPolicy,
}

impl UploadManager {
    pub fn new(store: ConversationStore, policy: UploadPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validates `file` against the policy and adds it to the active set as `pending`.
    pub fn register(&self, file: FileRef) -> Result<Upload, ChatError> {
        self.policy.check(&file)?;

        let upload = Upload {
            id: unique_id(),
            kind: classify(&file),
            file,
            preview: None,
            progress: Some(0),
            status: UploadStatus::Pending,
        };

        self.store.dispatch(ChatAction::AddUpload(upload.clone()));
        Ok(upload)
    }

    /// Derives and attaches a preview for image uploads.
    ///
    /// Returns `Ok(false)` when the upload was removed before the preview was ready.
    pub async fn attach_preview(&self, upload: &Upload) -> Result<bool, PreviewError> {
        let preview = derive_preview(&upload.file, self.policy.max_preview_bytes).await?;
        Ok(self.transition(&upload.id, UploadPatch::preview(preview)))
    }

    /// Returns `false` when no upload with `id` is active.
    pub fn transition(&self, id: &str, patch: UploadPatch) -> bool {
        self.store.transact(|state| {
            state.upload(id)?;
            Some(vec![ChatAction::UpdateUpload {
                id: id.to_string(),
                patch,
            }])
        })
    }

    /// Returns `false` when the upload is missing or currently uploading.
    pub fn remove(&self, id: &str) -> bool {
        self.store.transact(|state| {
            let upload = state.upload(id)?;
            if upload.status == UploadStatus::Uploading {
                return None;
            }

            Some(vec![ChatAction::RemoveUpload(id.to_string())])
        })
    }
}
