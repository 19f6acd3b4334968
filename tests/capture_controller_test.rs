use signstream::application::services::{CaptureController, CaptureTransitionError};
use signstream::domain::CaptureStatus;

#[test]
fn given_new_controller_when_reading_state_then_is_idle_and_disabled() {
    let controller = CaptureController::new();

    let state = controller.state();

    assert!(!state.enabled);
    assert_eq!(state.status, CaptureStatus::Idle);
    assert_eq!(state.chunks_sent, 0);
    assert!(state.last_error.is_none());
}

#[test]
fn given_happy_path_when_transitioning_then_reaches_streaming_and_counts_chunks() {
    let controller = CaptureController::new();

    assert_eq!(controller.enable().unwrap().status, CaptureStatus::Pending);
    assert_eq!(
        controller.start_listening().unwrap().status,
        CaptureStatus::Listening
    );
    controller.chunk_sent().unwrap();
    let state = controller.chunk_sent().unwrap();

    assert!(state.enabled);
    assert_eq!(state.status, CaptureStatus::Streaming);
    assert_eq!(state.chunks_sent, 2);
}

#[test]
fn given_idle_controller_when_sending_chunk_then_rejects_transition() {
    let controller = CaptureController::new();

    let result = controller.chunk_sent();

    assert_eq!(
        result,
        Err(CaptureTransitionError {
            from: CaptureStatus::Idle,
            action: "send a chunk",
        })
    );
    assert_eq!(controller.state().chunks_sent, 0);
}

#[test]
fn given_listening_controller_when_enabling_again_then_rejects_transition() {
    let controller = CaptureController::new();
    controller.enable().unwrap();
    controller.start_listening().unwrap();

    let error = controller.enable().unwrap_err();

    assert_eq!(error.to_string(), "cannot enable while listening");
}

#[test]
fn given_idle_controller_when_failing_then_rejects_transition() {
    let controller = CaptureController::new();

    assert!(controller.fail("no microphone").is_err());
    assert_eq!(controller.state().status, CaptureStatus::Idle);
}

#[test]
fn given_pending_controller_when_failing_then_records_error_and_allows_retry() {
    let controller = CaptureController::new();
    controller.enable().unwrap();

    let failed = controller.fail("permission denied").unwrap();
    assert_eq!(failed.status, CaptureStatus::Error);
    assert_eq!(failed.last_error.as_deref(), Some("permission denied"));

    let retried = controller.enable().unwrap();
    assert_eq!(retried.status, CaptureStatus::Pending);
    assert!(retried.last_error.is_none());
}

#[test]
fn given_streaming_controller_when_disabling_then_returns_to_idle_keeping_counter() {
    let controller = CaptureController::new();
    controller.enable().unwrap();
    controller.start_listening().unwrap();
    controller.chunk_sent().unwrap();

    let state = controller.disable();

    assert!(!state.enabled);
    assert_eq!(state.status, CaptureStatus::Idle);
    assert_eq!(state.chunks_sent, 1);
}

#[tokio::test]
async fn given_subscriber_when_state_changes_then_is_notified() {
    let controller = CaptureController::new();
    let mut receiver = controller.subscribe();

    controller.enable().unwrap();
    receiver.changed().await.unwrap();

    assert_eq!(receiver.borrow_and_update().status, CaptureStatus::Pending);
}

#[test]
fn given_rejected_transition_when_subscribed_then_no_change_is_published() {
    let controller = CaptureController::new();
    let receiver = controller.subscribe();

    controller.start_listening().unwrap_err();
    controller.disable();

    assert!(!receiver.has_changed().unwrap());
}

#[test]
fn given_status_names_when_parsing_then_round_trip_through_display() {
    for status in [
        CaptureStatus::Idle,
        CaptureStatus::Pending,
        CaptureStatus::Listening,
        CaptureStatus::Streaming,
        CaptureStatus::Error,
    ] {
        assert_eq!(status.to_string().parse::<CaptureStatus>(), Ok(status));
    }
    assert!("recording".parse::<CaptureStatus>().is_err());
}
