//! Metrics-based observability hooks for chat turns, gateway dispatches, and uploads.
//!
//! ```rust
//! use qchat::SessionHooks;
//! use qobserve::MetricsObservabilityHooks;
//!
//! fn accepts_session_hooks(_hooks: &dyn SessionHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_session_hooks(&hooks);
//! ```

use std::time::Duration;

use qchat::{ChatError, SessionHooks, TurnOutcome, Upload};
use qcommon::SessionId;
use qgateway::GatewayMode;

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl SessionHooks for MetricsObservabilityHooks {
    fn on_turn_skipped(&self, _session_id: &SessionId, outcome: &TurnOutcome) {
        metrics::counter!(
            "quill_turn_skipped_total",
            "outcome" => outcome.label()
        )
        .increment(1);
    }

    fn on_turn_start(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        uploads: usize,
        _has_text: bool,
    ) {
        metrics::counter!("quill_turn_start_total").increment(1);
        metrics::histogram!("quill_turn_uploads").record(uploads as f64);
    }

    fn on_dispatch_start(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        mode: GatewayMode,
    ) {
        metrics::counter!(
            "quill_dispatch_start_total",
            "mode" => mode.as_str()
        )
        .increment(1);
    }

    fn on_dispatch_success(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        elapsed: Duration,
    ) {
        metrics::counter!("quill_dispatch_success_total").increment(1);
        metrics::histogram!(
            "quill_dispatch_duration_seconds",
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_dispatch_failure(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        error: &ChatError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "quill_dispatch_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "quill_dispatch_duration_seconds",
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_turn_finish(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        outcome: &TurnOutcome,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "quill_turn_finish_total",
            "outcome" => outcome.label()
        )
        .increment(1);
        metrics::histogram!(
            "quill_turn_duration_seconds",
            "outcome" => outcome.label()
        )
        .record(elapsed.as_secs_f64());

        if let TurnOutcome::Completed { responses } = outcome {
            metrics::histogram!("quill_turn_responses").record(*responses as f64);
        }
    }

    fn on_upload_registered(&self, _session_id: &SessionId, upload: &Upload) {
        metrics::counter!(
            "quill_upload_registered_total",
            "kind" => upload.kind.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "quill_upload_size_bytes",
            "kind" => upload.kind.as_str()
        )
        .record(upload.file.size() as f64);
    }

    fn on_upload_rejected(&self, _session_id: &SessionId, _file_name: &str, _error: &ChatError) {
        metrics::counter!("quill_upload_rejected_total").increment(1);
    }

    fn on_upload_removed(&self, _session_id: &SessionId, _upload_id: &str, removed: bool) {
        metrics::counter!(
            "quill_upload_remove_total",
            "removed" => if removed { "true" } else { "false" }
        )
        .increment(1);
    }

    fn on_preview_failed(&self, _session_id: &SessionId, _upload_id: &str, _reason: &str) {
        metrics::counter!("quill_upload_preview_failure_total").increment(1);
    }

    fn on_session_cleared(&self, _session_id: &SessionId) {
        metrics::counter!("quill_session_cleared_total").increment(1);
    }
}
