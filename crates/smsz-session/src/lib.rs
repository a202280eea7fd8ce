//! Compression session: state, controller and ratio animation.

pub mod animator;
pub mod controller;
pub mod state;

pub use animator::{AnimationHandle, RatioAnimator, RatioFrame};
pub use controller::{CompressStatus, DecompressStatus, SessionController};
pub use state::{SessionPhase, SessionState};
