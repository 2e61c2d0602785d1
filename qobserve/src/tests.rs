use std::sync::{Arc, Mutex};
use std::time::Duration;

use qchat::{
    ChatError, ChatService, MessageType, SessionHooks, TurnOutcome, Upload, UploadStatus,
};
use qcommon::SessionId;
use qgateway::{
    BackendGateway, FileRef, GatewayError, GatewayFuture, GatewayMode, GatewayRequest,
    GatewayResponse, Route,
};

use crate::{MetricsObservabilityHooks, SafeSessionHooks, TracingObservabilityHooks};

fn session() -> SessionId {
    SessionId::from("session-1")
}

fn sample_upload() -> Upload {
    Upload {
        id: "upload-1".to_string(),
        file: FileRef::new("a.png", "image/png", vec![1, 2, 3]),
        kind: MessageType::Image,
        preview: None,
        progress: Some(0),
        status: UploadStatus::Pending,
    }
}

fn exercise_all_callbacks(hooks: &dyn SessionHooks) {
    let error = ChatError::network("timeout of 30000ms exceeded");

    hooks.on_turn_skipped(&session(), &TurnOutcome::Busy);
    hooks.on_turn_start(&session(), "turn-1", 1, true);
    hooks.on_dispatch_start(&session(), "turn-1", 0, GatewayMode::Image);
    hooks.on_dispatch_success(&session(), "turn-1", 0, Duration::from_millis(20));
    hooks.on_dispatch_failure(&session(), "turn-1", 1, &error, Duration::from_millis(30));
    hooks.on_turn_finish(
        &session(),
        "turn-1",
        &TurnOutcome::Failed(error.clone()),
        Duration::from_millis(50),
    );
    hooks.on_turn_finish(
        &session(),
        "turn-2",
        &TurnOutcome::Completed { responses: 2 },
        Duration::from_millis(50),
    );
    hooks.on_upload_registered(&session(), &sample_upload());
    hooks.on_upload_rejected(
        &session(),
        "setup.exe",
        &ChatError::validation("File type \"application/x-msdownload\" is not supported."),
    );
    hooks.on_upload_removed(&session(), "upload-1", true);
    hooks.on_preview_failed(&session(), "upload-1", "file is empty");
    hooks.on_session_cleared(&session());
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise_all_callbacks(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise_all_callbacks(&MetricsObservabilityHooks);
}

#[test]
fn composed_hooks_smoke_test_all_callbacks() {
    exercise_all_callbacks(&(TracingObservabilityHooks, MetricsObservabilityHooks));
}

#[derive(Default, Clone)]
struct RecordingHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingHooks {
    fn push(&self, event: &'static str) {
        self.events.lock().expect("events lock").push(event);
    }
}

impl SessionHooks for RecordingHooks {
    fn on_turn_skipped(&self, _session_id: &SessionId, _outcome: &TurnOutcome) {
        self.push("turn_skipped");
    }

    fn on_turn_start(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _uploads: usize,
        _has_text: bool,
    ) {
        self.push("turn_start");
    }

    fn on_dispatch_start(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        _mode: GatewayMode,
    ) {
        self.push("dispatch_start");
    }

    fn on_dispatch_success(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        _elapsed: Duration,
    ) {
        self.push("dispatch_success");
    }

    fn on_dispatch_failure(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        _error: &ChatError,
        _elapsed: Duration,
    ) {
        self.push("dispatch_failure");
    }

    fn on_turn_finish(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _outcome: &TurnOutcome,
        _elapsed: Duration,
    ) {
        self.push("turn_finish");
    }

    fn on_upload_registered(&self, _session_id: &SessionId, _upload: &Upload) {
        self.push("upload_registered");
    }

    fn on_upload_rejected(&self, _session_id: &SessionId, _file_name: &str, _error: &ChatError) {
        self.push("upload_rejected");
    }

    fn on_upload_removed(&self, _session_id: &SessionId, _upload_id: &str, _removed: bool) {
        self.push("upload_removed");
    }

    fn on_preview_failed(&self, _session_id: &SessionId, _upload_id: &str, _reason: &str) {
        self.push("preview_failed");
    }

    fn on_session_cleared(&self, _session_id: &SessionId) {
        self.push("session_cleared");
    }
}

struct PanicHooks;

impl SessionHooks for PanicHooks {
    fn on_turn_start(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _uploads: usize,
        _has_text: bool,
    ) {
        panic!("turn_start panic");
    }

    fn on_dispatch_start(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        _mode: GatewayMode,
    ) {
        panic!("dispatch_start panic");
    }

    fn on_dispatch_success(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _index: usize,
        _elapsed: Duration,
    ) {
        panic!("dispatch_success panic");
    }

    fn on_turn_finish(
        &self,
        _session_id: &SessionId,
        _turn_id: &str,
        _outcome: &TurnOutcome,
        _elapsed: Duration,
    ) {
        panic!("turn_finish panic");
    }

    fn on_session_cleared(&self, _session_id: &SessionId) {
        panic!("session_cleared panic");
    }
}

#[test]
fn safe_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    let events = Arc::clone(&inner.events);

    exercise_all_callbacks(&SafeSessionHooks::new(inner));

    assert_eq!(events.lock().expect("events lock").len(), 12);
}

#[test]
fn safe_hooks_swallow_panics() {
    exercise_all_callbacks(&SafeSessionHooks::new(PanicHooks));
}

struct AcknowledgingGateway;

impl BackendGateway for AcknowledgingGateway {
    fn send<'a>(
        &'a self,
        _request: GatewayRequest,
    ) -> GatewayFuture<'a, Result<GatewayResponse, GatewayError>> {
        Box::pin(async { Ok(GatewayResponse::new("Got it", Route::unrouted())) })
    }
}

#[tokio::test]
async fn panicking_observer_cannot_break_a_turn() {
    let recorder = RecordingHooks::default();
    let events = Arc::clone(&recorder.events);
    let service = ChatService::builder(Arc::new(AcknowledgingGateway))
        .hooks(Arc::new((SafeSessionHooks::new(PanicHooks), recorder)))
        .build();

    let outcome = service.send_text("hello").await;
    service.clear_session();

    assert_eq!(outcome, TurnOutcome::Completed { responses: 1 });
    assert_eq!(
        *events.lock().expect("events lock"),
        vec![
            "turn_start",
            "dispatch_start",
            "dispatch_success",
            "turn_finish",
            "session_cleared",
        ]
    );
}
