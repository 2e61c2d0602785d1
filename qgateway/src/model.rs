//! Gateway request, response, and attachment model types.
//!
//! ```rust
//! use qgateway::{FileRef, GatewayErrorKind, GatewayMode, GatewayRequest};
//!
//! let file = FileRef::new("scan.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]);
//! let ok = GatewayRequest::new(GatewayMode::Image)
//!     .with_file(file)
//!     .with_destination(Some("Work".into()), Some("Meetings".into()));
//! assert!(ok.validate().is_ok());
//!
//! let err = GatewayRequest::new(GatewayMode::Text)
//!     .validate()
//!     .expect_err("a request needs text or a file");
//! assert_eq!(err.kind, GatewayErrorKind::InvalidRequest);
//! ```

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::GatewayError;

/// Processing mode the gateway applies to a request's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayMode {
    Text,
    Image,
    Audio,
}

impl GatewayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }
}

impl Display for GatewayMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle to a user-selected file: raw bytes plus name and declared MIME type.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct FileRef {
    name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl FileRef {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl std::fmt::Debug for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRef")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// One unit of work for the gateway: optional text, optional file, and a filing hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub text: Option<String>,
    pub file: Option<FileRef>,
    pub mode: GatewayMode,
    pub target_notebook: Option<String>,
    pub target_section: Option<String>,
}

impl GatewayRequest {
    pub fn new(mode: GatewayMode) -> Self {
        Self {
            text: None,
            file: None,
            mode,
            target_notebook: None,
            target_section: None,
        }
    }

    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(GatewayMode::Text).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_optional_text(mut self, text: Option<&str>) -> Self {
        self.text = text.map(str::to_string);
        self
    }

    pub fn with_file(mut self, file: FileRef) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_destination(mut self, notebook: Option<String>, section: Option<String>) -> Self {
        self.target_notebook = notebook.filter(|value| !value.is_empty());
        self.target_section = section.filter(|value| !value.is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        let has_text = self
            .text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());

        if !has_text && self.file.is_none() {
            return Err(GatewayError::invalid_request(
                "gateway request requires text or a file",
            ));
        }

        Ok(())
    }

    /// Text form fields in the order the gateway expects them; the file travels as its own part.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(4);

        if let Some(text) = &self.text {
            fields.push(("text", text.clone()));
        }

        fields.push(("mode", self.mode.as_str().to_string()));

        if let Some(notebook) = &self.target_notebook {
            fields.push(("target_notebook", notebook.clone()));
        }

        if let Some(section) = &self.target_section {
            fields.push(("target_section", section.clone()));
        }

        fields
    }
}

/// Where the gateway filed the processed content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub notebook: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

impl Route {
    pub fn new(notebook: Option<String>, section: Option<String>) -> Self {
        Self { notebook, section }
    }

    pub fn unrouted() -> Self {
        Self::default()
    }

    /// Both halves of the location, when the gateway reported a complete one.
    pub fn location(&self) -> Option<(&str, &str)> {
        let notebook = self.notebook.as_deref().filter(|value| !value.is_empty())?;
        let section = self.section.as_deref().filter(|value| !value.is_empty())?;
        Some((notebook, section))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub summary: String,
    pub route: Route,
    pub raw: Option<String>,
}

impl GatewayResponse {
    pub fn new(summary: impl Into<String>, route: Route) -> Self {
        Self {
            summary: summary.into(),
            route,
            raw: None,
        }
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

/// One notebook and its section names, as listed by the notebook directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookSections {
    pub notebook: String,
    #[serde(default)]
    pub sections: Vec<String>,
}

impl NotebookSections {
    pub fn new(notebook: impl Into<String>, sections: Vec<String>) -> Self {
        Self {
            notebook: notebook.into(),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GatewayErrorKind;

    #[test]
    fn request_validation_requires_non_blank_text_or_file() {
        let blank = GatewayRequest::text_only("   ");
        let err = blank.validate().expect_err("blank text should fail");
        assert_eq!(err.kind, GatewayErrorKind::InvalidRequest);

        assert!(GatewayRequest::text_only("hello").validate().is_ok());
        assert!(
            GatewayRequest::new(GatewayMode::Audio)
                .with_file(FileRef::new("memo.mp3", "audio/mpeg", vec![1, 2, 3]))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn destination_drops_empty_strings() {
        let request = GatewayRequest::text_only("hello")
            .with_destination(Some(String::new()), Some("Meetings".to_string()));

        assert_eq!(request.target_notebook, None);
        assert_eq!(request.target_section.as_deref(), Some("Meetings"));
    }

    #[test]
    fn form_fields_skip_absent_values_and_always_carry_mode() {
        let request = GatewayRequest::new(GatewayMode::Image)
            .with_file(FileRef::new("a.png", "image/png", vec![0]))
            .with_destination(Some("Work".to_string()), None);

        assert_eq!(
            request.form_fields(),
            vec![
                ("mode", "image".to_string()),
                ("target_notebook", "Work".to_string()),
            ]
        );
    }

    #[test]
    fn route_location_requires_both_parts() {
        assert_eq!(
            Route::new(Some("Work".into()), Some("Meetings".into())).location(),
            Some(("Work", "Meetings"))
        );
        assert_eq!(Route::new(Some("Work".into()), None).location(), None);
        assert_eq!(Route::new(Some("Work".into()), Some(String::new())).location(), None);
        assert_eq!(Route::unrouted().location(), None);
    }

    #[test]
    fn file_ref_debug_omits_bytes() {
        let file = FileRef::new("notes.txt", "text/plain", b"secret notes".to_vec());
        let rendered = format!("{file:?}");

        assert!(rendered.contains("notes.txt"));
        assert!(rendered.contains("size: 12"));
        assert!(!rendered.contains("secret"));
    }
}
