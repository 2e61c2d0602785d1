//! Session hook contracts for observing turns, dispatches, and uploads.
//!
//! ```rust
//! use qchat::{NoopSessionHooks, SessionHooks};
//!
//! fn accepts_hooks(_hooks: &dyn SessionHooks) {}
//!
//! accepts_hooks(&NoopSessionHooks);
//! accepts_hooks(&(NoopSessionHooks, NoopSessionHooks));
//! ```

use std::time::Duration;

use qcommon::SessionId;
use qgateway::GatewayMode;

use crate::{ChatError, TurnOutcome, Upload};

pub trait SessionHooks: Send + Sync {
    /// An empty or busy turn was dropped without touching state.
    fn on_turn_skipped(&self, _session_id: &SessionId, _outcome: &TurnOutcome) {}

    fn on_turn_start(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _uploads: usize,
        _has_text: bool,
    ) {
    }

    fn on_dispatch_start(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        _mode: GatewayMode,
    ) {
    }

    fn on_dispatch_success(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        _elapsed: Duration,
    ) {
    }

    fn on_dispatch_failure(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        _error: &ChatError,
        _elapsed: Duration,
    ) {
    }

    fn on_turn_finish(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _outcome: &TurnOutcome,
        _elapsed: Duration,
    ) {
    }

    fn on_upload_registered(&self, _session_id: &SessionId, _upload: &Upload) {}

    fn on_upload_rejected(&self, _session_id: &SessionId, _file_name: &str, _error: &ChatError) {}

    fn on_upload_removed(&self, _session_id: &SessionId, _upload_id: &str, _removed: bool) {}

    fn on_preview_failed(&self, _session_id: &SessionId, _upload_id: &str, _reason: &str) {}

    fn on_session_cleared(&self, _session_id: &SessionId) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionHooks;

impl SessionHooks for NoopSessionHooks {}

impl<A, B> SessionHooks for (A, B)
where
    A: SessionHooks,
    B: SessionHooks,
{
    fn on_turn_skipped(&self, session_id: &SessionId, outcome: &TurnOutcome) {
        self.0.on_turn_skipped(session_id, outcome);
        self.1.on_turn_skipped(session_id, outcome);
    }

    fn on_turn_start(&self, session_id: &SessionId, turn_id: &str, uploads: usize, has_text: bool) {
        self.0.on_turn_start(session_id, turn_id, uploads, has_text);
        self.1.on_turn_start(session_id, turn_id, uploads, has_text);
    }

    fn on_dispatch_start(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        index: usize,
        mode: GatewayMode,
    ) {
        self.0.on_dispatch_start(session_id, turn_id, index, mode);
        self.1.on_dispatch_start(session_id, turn_id, index, mode);
    }

    fn on_dispatch_success(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        index: usize,
        elapsed: Duration,
    ) {
        self.0.on_dispatch_success(session_id, turn_id, index, elapsed);
        self.1.on_dispatch_success(session_id, turn_id, index, elapsed);
    }

    fn on_dispatch_failure(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        index: usize,
        error: &ChatError,
        elapsed: Duration,
    ) {
        self.0
            .on_dispatch_failure(session_id, turn_id, index, error, elapsed);
        self.1
            .on_dispatch_failure(session_id, turn_id, index, error, elapsed);
    }

    fn on_turn_finish(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        outcome: &TurnOutcome,
        elapsed: Duration,
    ) {
        self.0.on_turn_finish(session_id, turn_id, outcome, elapsed);
        self.1.on_turn_finish(session_id, turn_id, outcome, elapsed);
    }

    fn on_upload_registered(&self, session_id: &SessionId, upload: &Upload) {
        self.0.on_upload_registered(session_id, upload);
        self.1.on_upload_registered(session_id, upload);
    }

    fn on_upload_rejected(&self, session_id: &SessionId, file_name: &str, error: &ChatError) {
        self.0.on_upload_rejected(session_id, file_name, error);
        self.1.on_upload_rejected(session_id, file_name, error);
    }

    fn on_upload_removed(&self, session_id: &SessionId, upload_id: &str, removed: bool) {
        self.0.on_upload_removed(session_id, upload_id, removed);
        self.1.on_upload_removed(session_id, upload_id, removed);
    }

    fn on_preview_failed(&self, session_id: &SessionId, upload_id: &str, reason: &str) {
        self.0.on_preview_failed(session_id, upload_id, reason);
        self.1.on_preview_failed(session_id, upload_id, reason);
    }

    fn on_session_cleared(&self, session_id: &SessionId) {
        self.0.on_session_cleared(session_id);
        self.1.on_session_cleared(session_id);
    }
}
