//! Destination hint holder and the notebook catalog behind selection UIs.
//!
//! ```rust
//! use qchat::{DestinationHint, DestinationHolder};
//!
//! let holder = DestinationHolder::new();
//! holder.set("Work", "Meetings");
//! holder.set_section("");
//!
//! assert_eq!(
//!     holder.snapshot(),
//!     DestinationHint::default().with_notebook("Work")
//! );
//! ```

use std::sync::{Arc, RwLock};

use qgateway::{GatewayError, NotebookDirectory, NotebookSections};

use crate::DestinationHint;

#[derive(Debug, Default)]
pub struct DestinationHolder {
    hint: RwLock<DestinationHint>,
}

impl DestinationHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, notebook: impl Into<String>, section: impl Into<String>) {
        let next = DestinationHint::new(notebook, section);
        self.update(|_| next);
    }

    pub fn set_notebook(&self, notebook: impl Into<String>) {
        self.update(|hint| hint.with_notebook(notebook));
    }

    pub fn set_section(&self, section: impl Into<String>) {
        self.update(|hint| hint.with_section(section));
    }

    pub fn clear(&self) {
        self.update(|_| DestinationHint::default());
    }

    pub fn snapshot(&self) -> DestinationHint {
        match self.hint.read() {
            Ok(hint) => hint.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Read-modify-write under one write lock, so concurrent setters never drop each other.
    fn update(&self, change: impl FnOnce(DestinationHint) -> DestinationHint) {
        let mut hint = match self.hint.write() {
            Ok(hint) => hint,
            Err(poisoned) => poisoned.into_inner(),
        };
        let current = std::mem::take(&mut *hint);
        *hint = change(current);
    }
}

/// Cached notebook listing. Empty until the first successful [`DestinationCatalog::refresh`].
pub struct DestinationCatalog {
    directory: Arc<dyn NotebookDirectory>,
    notebooks: RwLock<Vec<NotebookSections>>,
}

impl DestinationCatalog {
    pub fn new(directory: Arc<dyn NotebookDirectory>) -> Self {
        Self {
            directory,
            notebooks: RwLock::new(Vec::new()),
        }
    }

    /// Reloads the listing; a failed reload keeps the previous cache.
    pub async fn refresh(&self) -> Result<usize, GatewayError> {
        let listing = self.directory.list_notebooks().await?;
        let count = listing.len();

        match self.notebooks.write() {
            Ok(mut notebooks) => *notebooks = listing,
            Err(poisoned) => *poisoned.into_inner() = listing,
        }

        Ok(count)
    }

    pub fn notebooks(&self) -> Vec<String> {
        self.read(|listing| listing.iter().map(|entry| entry.notebook.clone()).collect())
    }

    pub fn sections(&self, notebook: &str) -> Vec<String> {
        self.read(|listing| {
            listing
                .iter()
                .find(|entry| entry.notebook == notebook)
                .map(|entry| entry.sections.clone())
                .unwrap_or_default()
        })
    }

    pub fn contains(&self, notebook: &str, section: &str) -> bool {
        self.read(|listing| {
            listing.iter().any(|entry| {
                entry.notebook == notebook && entry.sections.iter().any(|name| name == section)
            })
        })
    }

    fn read<T>(&self, view: impl FnOnce(&[NotebookSections]) -> T) -> T {
        match self.notebooks.read() {
            Ok(listing) => view(&listing),
            Err(poisoned) => view(&poisoned.into_inner()),
        }
    }
}

impl std::fmt::Debug for DestinationCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationCatalog")
            .field("notebooks", &self.notebooks())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use qgateway::GatewayFuture;

    use super::*;

    struct ScriptedDirectory {
        answers: Mutex<Vec<Result<Vec<NotebookSections>, GatewayError>>>,
    }

    impl NotebookDirectory for ScriptedDirectory {
        fn list_notebooks<'a>(
            &'a self,
        ) -> GatewayFuture<'a, Result<Vec<NotebookSections>, GatewayError>> {
            Box::pin(async move {
                self.answers
                    .lock()
                    .expect("answers lock")
                    .pop()
                    .unwrap_or_else(|| Err(GatewayError::network("offline")))
            })
        }
    }

    #[test]
    fn holder_fields_are_independent() {
        let holder = DestinationHolder::new();
        holder.set_notebook("Personal");
        holder.set_section("Journal");
        holder.set_notebook("Work");

        assert_eq!(holder.snapshot(), DestinationHint::new("Work", "Journal"));

        holder.clear();
        assert!(holder.snapshot().is_empty());
    }

    #[test]
    fn racing_field_setters_keep_both_updates() {
        let holder = DestinationHolder::new();

        for _ in 0..200 {
            holder.clear();
            std::thread::scope(|scope| {
                scope.spawn(|| holder.set_notebook("Work"));
                scope.spawn(|| holder.set_section("Meetings"));
            });

            assert_eq!(holder.snapshot(), DestinationHint::new("Work", "Meetings"));
        }
    }

    #[tokio::test]
    async fn catalog_caches_listing_and_survives_failed_refresh() {
        let catalog = DestinationCatalog::new(Arc::new(ScriptedDirectory {
            answers: Mutex::new(vec![
                Err(GatewayError::rejected("device login required")),
                Ok(vec![
                    NotebookSections::new("Work", vec!["Meetings".into(), "Ideas".into()]),
                    NotebookSections::new("Personal", Vec::new()),
                ]),
            ]),
        }));

        assert!(catalog.notebooks().is_empty());
        assert_eq!(catalog.refresh().await, Ok(2));
        assert_eq!(catalog.notebooks(), vec!["Work", "Personal"]);
        assert_eq!(catalog.sections("Work"), vec!["Meetings", "Ideas"]);
        assert!(catalog.sections("Unknown").is_empty());
        assert!(catalog.contains("Work", "Ideas"));
        assert!(!catalog.contains("Personal", "Ideas"));

        let err = catalog.refresh().await.expect_err("second refresh fails");
        assert_eq!(err.message, "device login required");
        assert_eq!(catalog.notebooks().len(), 2);
    }
}
