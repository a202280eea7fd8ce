use smsz_core::CompressionOutcome;
use std::fmt;
use std::sync::Arc;

/// Coarse lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Compressing,
    Ready,
    Failed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::Compressing => write!(f, "compressing"),
            SessionPhase::Ready => write!(f, "ready"),
            SessionPhase::Failed => write!(f, "failed"),
        }
    }
}

/// Everything one session shows. Written only by the controller.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub input_text: String,
    pub outcome: Option<Arc<CompressionOutcome>>,
    pub decompressed_text: String,
    pub busy: bool,
    /// Bumped on every outcome replacement.
    pub outcome_generation: u64,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.busy {
            return SessionPhase::Compressing;
        }
        match self.outcome.as_deref() {
            None => SessionPhase::Idle,
            Some(o) if o.is_success() => SessionPhase::Ready,
            Some(_) => SessionPhase::Failed,
        }
    }

    /// Decompression needs a successful outcome.
    pub fn can_decompress(&self) -> bool {
        self.outcome.as_deref().is_some_and(|o| o.is_success())
    }

    pub(crate) fn replace_outcome(&mut self, outcome: Arc<CompressionOutcome>) {
        self.outcome = Some(outcome);
        self.decompressed_text.clear();
        self.outcome_generation += 1;
    }
}
