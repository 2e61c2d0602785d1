use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use qchat::{ChatError, SessionHooks, TurnOutcome, Upload};
use qcommon::SessionId;
use qgateway::GatewayMode;

/// Swallows panics raised by the wrapped hooks so observers can never break a turn.
pub struct SafeSessionHooks<H> {
    inner: H,
}

impl<H> SafeSessionHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H> SessionHooks for SafeSessionHooks<H>
where
    H: SessionHooks,
{
    fn on_turn_skipped(&self, session_id: &SessionId, outcome: &TurnOutcome) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_skipped(session_id, outcome)
        }));
    }

    fn on_turn_start(&self, session_id: &SessionId, turn_id: &str, uploads: usize, has_text: bool) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_turn_start(session_id, turn_id, uploads, has_text)
        }));
    }

    fn on_dispatch_start(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        index: usize,
        mode: GatewayMode,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_dispatch_start(session_id, turn_id, index, mode)
        }));
    }

    fn on_dispatch_success(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        index: usize,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_dispatch_success(session_id, turn_id, index, elapsed)
        }));
    }

    fn on_dispatch_failure(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        index: usize,
        error: &ChatError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_dispatch_failure(session_id, turn_id, index, error, elapsed)
        }));
    }

    fn on_turn_finish(
        &self,
        session_id: &SessionId,
        turn_id: &str,
        outcome: &TurnOutcome,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_turn_finish(session_id, turn_id, outcome, elapsed)
        }));
    }

    fn on_upload_registered(&self, session_id: &SessionId, upload: &Upload) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_upload_registered(session_id, upload)
        }));
    }

    fn on_upload_rejected(&self, session_id: &SessionId, file_name: &str, error: &ChatError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_upload_rejected(session_id, file_name, error)
        }));
    }

    fn on_upload_removed(&self, session_id: &SessionId, upload_id: &str, removed: bool) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_upload_removed(session_id, upload_id, removed)
        }));
    }

    fn on_preview_failed(&self, session_id: &SessionId, upload_id: &str, reason: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_preview_failed(session_id, upload_id, reason)
        }));
    }

    fn on_session_cleared(&self, session_id: &SessionId) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_session_cleared(session_id)
        }));
    }
}
