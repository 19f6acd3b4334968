use serde::Serialize;
use tokio::sync::watch;

use crate::domain::CaptureStatus;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureState {
    pub enabled: bool,
    pub status: CaptureStatus,
    pub chunks_sent: u64,
    pub last_error: Option<String>,
}

impl Default for CaptureState {
    fn default() -> Self {
        Self {
            enabled: false,
            status: CaptureStatus::Idle,
            chunks_sent: 0,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot {action} while {from}")]
pub struct CaptureTransitionError {
    pub from: CaptureStatus,
    pub action: &'static str,
}

/// Single owner of the capture state. Every change is pushed to subscribers.
pub struct CaptureController {
    sender: watch::Sender<CaptureState>,
}

impl Default for CaptureController {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureController {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(CaptureState::default());
        Self { sender }
    }

    pub fn state(&self) -> CaptureState {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CaptureState> {
        self.sender.subscribe()
    }

    /// Idle or Error -> Pending.
    pub fn enable(&self) -> Result<CaptureState, CaptureTransitionError> {
        self.transition("enable", |state| match state.status {
            CaptureStatus::Idle | CaptureStatus::Error => {
                state.enabled = true;
                state.status = CaptureStatus::Pending;
                state.last_error = None;
                true
            }
            _ => false,
        })
    }

    /// Pending -> Listening, once the audio source is granted.
    pub fn start_listening(&self) -> Result<CaptureState, CaptureTransitionError> {
        self.transition("start listening", |state| match state.status {
            CaptureStatus::Pending => {
                state.status = CaptureStatus::Listening;
                true
            }
            _ => false,
        })
    }

    /// Listening or Streaming -> Streaming, counting the chunk.
    pub fn chunk_sent(&self) -> Result<CaptureState, CaptureTransitionError> {
        self.transition("send a chunk", |state| {
            if !state.status.is_active() {
                return false;
            }
            state.status = CaptureStatus::Streaming;
            state.chunks_sent += 1;
            true
        })
    }

    /// Any state except Idle -> Error.
    pub fn fail(&self, reason: impl Into<String>) -> Result<CaptureState, CaptureTransitionError> {
        let reason = reason.into();
        self.transition("fail", move |state| {
            if state.status == CaptureStatus::Idle {
                return false;
            }
            state.status = CaptureStatus::Error;
            state.last_error = Some(reason);
            true
        })
    }

    /// Any state -> Idle. The chunk counter survives.
    pub fn disable(&self) -> CaptureState {
        self.sender.send_if_modified(|state| {
            if !state.enabled && state.status == CaptureStatus::Idle {
                return false;
            }
            state.enabled = false;
            state.status = CaptureStatus::Idle;
            true
        });
        self.state()
    }

    fn transition(
        &self,
        action: &'static str,
        apply: impl FnOnce(&mut CaptureState) -> bool,
    ) -> Result<CaptureState, CaptureTransitionError> {
        let mut rejected_from = None;
        self.sender.send_if_modified(|state| {
            let from = state.status;
            let applied = apply(state);
            if !applied {
                rejected_from = Some(from);
            } else {
                tracing::debug!(from = %from, to = %state.status, action, "Capture state changed");
            }
            applied
        });

        match rejected_from {
            Some(from) => Err(CaptureTransitionError { from, action }),
            None => Ok(self.state()),
        }
    }
}
