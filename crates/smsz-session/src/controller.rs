//! Session controller: drives one text -> compressed -> decompressed lifecycle.

use smsz_core::{AnimationConfig, ClientConfig, CompressionOutcome, FailureKind};
use smsz_gateway::Gateway;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::animator::RatioAnimator;
use crate::state::SessionState;

/// Shown in the decompressed area when there is nothing valid to decompress.
pub const NO_COMPRESSED_DATA: &str = "No valid compressed data available!";

/// Shown in the decompressed area when the gateway call fails.
pub const DECOMPRESSION_FAILED: &str = "Error: Decompression failed. Check backend server status.";

/// What a `compress` call did.
#[derive(Debug, Clone, PartialEq)]
pub enum CompressStatus {
    /// A new outcome (success or failure) replaced the previous one.
    Applied(Arc<CompressionOutcome>),
    /// Another compress request is still in flight; nothing changed.
    Busy,
}

impl CompressStatus {
    pub fn outcome(&self) -> Option<&CompressionOutcome> {
        match self {
            CompressStatus::Applied(o) => Some(o),
            CompressStatus::Busy => None,
        }
    }
}

/// What a `decompress` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressStatus {
    Decompressed,
    /// Gateway failed; the error message was shown.
    Failed,
    /// No successful outcome to decompress; guard message shown, no request made.
    Unavailable,
    /// A newer outcome arrived while the request was in flight; result dropped.
    Stale,
}

enum Admission {
    Accepted,
    Invalid,
    Busy,
}

/// Clears `busy` on every exit path unless the result was applied first.
struct BusyGuard<'a> {
    state: &'a watch::Sender<SessionState>,
    armed: bool,
}

impl<'a> BusyGuard<'a> {
    fn new(state: &'a watch::Sender<SessionState>) -> Self {
        Self { state, armed: true }
    }

    /// Apply `outcome` and clear `busy` in one update. Returns the new
    /// outcome generation.
    fn finish(mut self, outcome: Arc<CompressionOutcome>) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.replace_outcome(outcome);
            s.busy = false;
            generation = s.outcome_generation;
        });
        self.armed = false;
        generation
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_if_modified(|s| std::mem::replace(&mut s.busy, false));
        }
    }
}

pub struct SessionController {
    id: Uuid,
    gateway: Arc<dyn Gateway>,
    state: watch::Sender<SessionState>,
    animator: RatioAnimator,
}

impl SessionController {
    pub fn new(gateway: Arc<dyn Gateway>, animation: AnimationConfig) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let id = Uuid::new_v4();
        debug!(session = %id, "Session created");
        Self {
            id,
            gateway,
            state,
            animator: RatioAnimator::new(animation),
        }
    }

    pub fn from_config(gateway: Arc<dyn Gateway>, config: &ClientConfig) -> Self {
        Self::new(gateway, config.animation.clone())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn animator(&self) -> &RatioAnimator {
        &self.animator
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.input_text = text);
    }

    /// Compress the current input text.
    pub async fn compress_input(&self) -> CompressStatus {
        let text = self.state.borrow().input_text.clone();
        self.compress(&text).await
    }

    /// Validate `text`, send it to the gateway and replace the outcome.
    pub async fn compress(&self, text: &str) -> CompressStatus {
        let mut admission = Admission::Busy;
        self.state.send_if_modified(|s| {
            if s.busy {
                return false;
            }
            if text.trim().is_empty() {
                admission = Admission::Invalid;
                return false;
            }
            admission = Admission::Accepted;
            s.busy = true;
            true
        });

        match admission {
            Admission::Busy => {
                debug!(session = %self.id, "Compress ignored, request already in flight");
                return CompressStatus::Busy;
            }
            Admission::Invalid => {
                warn!(session = %self.id, "Please enter some text to compress");
                let outcome = Arc::new(CompressionOutcome::failure(FailureKind::InputRequired));
                let mut generation = 0;
                self.state.send_modify(|s| {
                    s.replace_outcome(outcome.clone());
                    generation = s.outcome_generation;
                });
                self.animator.follow(generation, Some(&outcome));
                return CompressStatus::Applied(outcome);
            }
            Admission::Accepted => {}
        }

        let guard = BusyGuard::new(&self.state);
        debug!(session = %self.id, bytes = text.len(), "Compress request issued");

        let outcome = match self.gateway.compress(text).await {
            Ok(response) => match CompressionOutcome::from_response(text, response) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(session = %self.id, error = %e, "Compression failed. Check your backend.");
                    CompressionOutcome::failure(FailureKind::CompressionFailed)
                }
            },
            Err(e) => {
                error!(session = %self.id, error = %e, "Compression failed. Check your backend.");
                CompressionOutcome::failure(FailureKind::CompressionFailed)
            }
        };

        let outcome = Arc::new(outcome);
        let generation = guard.finish(outcome.clone());
        info!(session = %self.id, generation, outcome = %outcome, "Outcome applied");
        self.animator.follow(generation, Some(&outcome));
        CompressStatus::Applied(outcome)
    }

    /// Decompress the current outcome's payload into `decompressed_text`.
    pub async fn decompress(&self) -> DecompressStatus {
        let target = {
            let s = self.state.borrow();
            s.outcome
                .as_deref()
                .and_then(|o| o.payload())
                .map(|p| (p.to_string(), s.outcome_generation))
        };

        let Some((payload, generation)) = target else {
            warn!(session = %self.id, "No valid compressed data available for decompression!");
            self.state.send_modify(|s| s.decompressed_text = NO_COMPRESSED_DATA.to_string());
            return DecompressStatus::Unavailable;
        };

        debug!(session = %self.id, generation, "Decompress request issued");
        let (text, status) = match self.gateway.decompress(&payload).await {
            Ok(text) => (text, DecompressStatus::Decompressed),
            Err(e) => {
                error!(session = %self.id, error = %e, "Decompression failed. Check backend.");
                (DECOMPRESSION_FAILED.to_string(), DecompressStatus::Failed)
            }
        };

        let applied = self.state.send_if_modified(|s| {
            if s.outcome_generation != generation {
                return false;
            }
            s.decompressed_text = text;
            true
        });
        if !applied {
            debug!(session = %self.id, generation, "Decompress result superseded by newer outcome");
            return DecompressStatus::Stale;
        }
        status
    }

    /// Tear the session down, stopping any running animation.
    pub fn shutdown(&self) {
        debug!(session = %self.id, "Session shutdown");
        self.animator.cancel();
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
