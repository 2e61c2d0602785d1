/// Builds a [`TurnRequest`](crate::TurnRequest) from optional text and uploads.
///
/// ```rust
/// use quill::{Upload, quill_turn};
///
/// let turn = quill_turn!("file this under ideas");
/// assert_eq!(turn.trimmed_text(), Some("file this under ideas"));
///
/// let uploads: Vec<Upload> = Vec::new();
/// let turn = quill_turn!(uploads => uploads);
/// assert!(turn.is_empty());
/// ```
#[macro_export]
macro_rules! quill_turn {
    (uploads => $uploads:expr $(,)?) => {
        $crate::TurnRequest::new().with_uploads($uploads)
    };
    ($text:expr, uploads => $uploads:expr $(,)?) => {
        $crate::TurnRequest::text($text).with_uploads($uploads)
    };
    ($text:expr $(,)?) => {
        $crate::TurnRequest::text($text)
    };
}

/// Creates a [`DestinationHint`](crate::DestinationHint) with notebook and section shorthand.
///
/// ```rust
/// use quill::quill_destination;
///
/// let hint = quill_destination!("Work" => "Meetings");
/// assert_eq!(hint.notebook.as_deref(), Some("Work"));
/// assert_eq!(hint.section.as_deref(), Some("Meetings"));
///
/// let notebook_only = quill_destination!("Work");
/// assert_eq!(notebook_only.section, None);
/// ```
#[macro_export]
macro_rules! quill_destination {
    ($notebook:expr => $section:expr $(,)?) => {
        $crate::DestinationHint::new($notebook, $section)
    };
    ($notebook:expr $(,)?) => {
        $crate::DestinationHint::default().with_notebook($notebook)
    };
}
