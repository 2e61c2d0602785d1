//! Tracing-based observability hooks for chat turns, gateway dispatches, and uploads.
//!
//! ```rust
//! use qchat::SessionHooks;
//! use qobserve::TracingObservabilityHooks;
//!
//! fn accepts_session_hooks(_hooks: &dyn SessionHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_session_hooks(&hooks);
//! ```

use std::time::Duration;

use qchat::{ChatError, SessionHooks, TurnOutcome, Upload};
use qcommon::SessionId;
use qgateway::GatewayMode;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl SessionHooks for TracingObservabilityHooks {
    fn on_turn_skipped(&self, session_id: &SessionId, outcome: &TurnOutcome) {
        tracing::debug!(
            phase = "turn",
            event = "skipped",
            session_id = %session_id,
            outcome = outcome.label()
        );
    }

    fn on_turn_start(&self, session_id: &SessionId, turn_id: &str, uploads: usize, has_text: bool) {
        tracing::info!(
            phase = "turn",
            event = "start",
            session_id = %session_id,
            turn_id,
            uploads,
            has_text
        );
    }

    fn on_dispatch_start(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        index: usize,
        mode: GatewayMode,
    ) {
        tracing::info!(
            phase = "dispatch",
            event = "start",
            session_id = %session_id,
            turn_id,
            index,
            mode = %mode
        );
    }

    fn on_dispatch_success(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        index: usize,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "dispatch",
            event = "success",
            session_id = %session_id,
            turn_id,
            index,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_dispatch_failure(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        index: usize,
        error: &ChatError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "dispatch",
            event = "failure",
            session_id = %session_id,
            turn_id,
            index,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_turn_finish(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        outcome: &TurnOutcome,
        elapsed: Duration,
    ) {
        match outcome {
            TurnOutcome::Failed(error) => tracing::warn!(
                phase = "turn",
                event = "finish",
                session_id = %session_id,
                turn_id,
                outcome = outcome.label(),
                elapsed_ms = elapsed.as_millis() as u64,
                error_kind = ?error.kind,
                error = %error
            ),
            _ => tracing::info!(
                phase = "turn",
                event = "finish",
                session_id = %session_id,
                turn_id,
                outcome = outcome.label(),
                elapsed_ms = elapsed.as_millis() as u64
            ),
        }
    }

    fn on_upload_registered(&self, session_id: &SessionId, upload: &Upload) {
        tracing::info!(
            phase = "upload",
            event = "registered",
            session_id = %session_id,
            upload_id = upload.id,
            kind = upload.kind.as_str(),
            size_bytes = upload.file.size()
        );
    }

    fn on_upload_rejected(&self, session_id: &SessionId, file_name: &str, error: &ChatError) {
        tracing::warn!(
            phase = "upload",
            event = "rejected",
            session_id = %session_id,
            file_name,
            error = %error
        );
    }

    fn on_upload_removed(&self, session_id: &SessionId, upload_id: &str, removed: bool) {
        tracing::debug!(
            phase = "upload",
            event = "removed",
            session_id = %session_id,
            upload_id,
            removed
        );
    }

    fn on_preview_failed(&self, session_id: &SessionId, upload_id: &str, reason: &str) {
        tracing::debug!(
            phase = "upload",
            event = "preview_failed",
            session_id = %session_id,
            upload_id,
            reason
        );
    }

    fn on_session_cleared(&self, session_id: &SessionId) {
        tracing::info!(phase = "session", event = "cleared", session_id = %session_id);
    }
}
