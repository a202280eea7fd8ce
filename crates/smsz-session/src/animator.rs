//! Count-up animation of the displayed compression ratio.
//!
//! Each retarget bumps the frame generation and arms at most one tick task.
//! A tick only writes while its generation is current, and the write happens
//! under the channel lock, so a superseded timer can never touch the frame
//! even if its abort lands mid-tick.

use smsz_core::{AnimationConfig, CompressionOutcome};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Displayed ratio plus the animation generation that wrote it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatioFrame {
    pub generation: u64,
    pub value: f64,
    pub target: f64,
}

impl RatioFrame {
    /// The count-up has reached its target.
    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }
}

/// A running animation timer. Aborts its task when cancelled or dropped.
#[derive(Debug)]
pub struct AnimationHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl AnimationHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// The armed timer and the newest session outcome it was started for.
#[derive(Default)]
struct Active {
    handle: Option<AnimationHandle>,
    outcome_generation: u64,
}

/// Counts live tick tasks; released when the task future is dropped.
struct TimerSlot(Arc<AtomicUsize>);

impl TimerSlot {
    fn acquire(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct RatioAnimator {
    config: AnimationConfig,
    frames: Arc<watch::Sender<RatioFrame>>,
    active: Mutex<Active>,
    live_timers: Arc<AtomicUsize>,
}

impl RatioAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        let (frames, _) = watch::channel(RatioFrame::default());
        Self {
            config,
            frames: Arc::new(frames),
            active: Mutex::new(Active::default()),
            live_timers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Current displayed ratio.
    pub fn displayed(&self) -> f64 {
        self.frames.borrow().value
    }

    pub fn frame(&self) -> RatioFrame {
        *self.frames.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<RatioFrame> {
        self.frames.subscribe()
    }

    /// True while a timer is armed and has not reached its target.
    pub fn is_animating(&self) -> bool {
        self.lock_active()
            .handle
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Number of tick tasks that have not been torn down yet.
    pub fn active_timers(&self) -> usize {
        self.live_timers.load(Ordering::SeqCst)
    }

    /// Restart the animation for `outcome`.
    ///
    /// Must be called from within a tokio runtime when the outcome carries a
    /// non-zero ratio.
    pub fn retarget(&self, outcome: Option<&CompressionOutcome>) {
        let mut active = self.lock_active();
        self.restart(&mut active, outcome);
    }

    /// Retarget for the session outcome numbered `outcome_generation`.
    ///
    /// Returns false and leaves the animation alone when a newer outcome has
    /// already been followed.
    pub fn follow(&self, outcome_generation: u64, outcome: Option<&CompressionOutcome>) -> bool {
        let mut active = self.lock_active();
        if outcome_generation < active.outcome_generation {
            debug!(
                outcome_generation,
                current = active.outcome_generation,
                "Ignoring retarget for superseded outcome"
            );
            return false;
        }
        active.outcome_generation = outcome_generation;
        self.restart(&mut active, outcome);
        true
    }

    /// Stop the running timer, leaving the displayed value where it is.
    pub fn cancel(&self) {
        if let Some(handle) = self.lock_active().handle.take() {
            debug!(generation = handle.generation(), "Animation cancelled");
            handle.cancel();
        }
    }

    fn restart(&self, active: &mut Active, outcome: Option<&CompressionOutcome>) {
        if let Some(handle) = active.handle.take() {
            handle.cancel();
        }

        let target = outcome.and_then(|o| o.ratio()).unwrap_or(0.0);
        let mut generation = 0;
        self.frames.send_modify(|frame| {
            frame.generation += 1;
            frame.value = 0.0;
            frame.target = target;
            generation = frame.generation;
        });

        if target == 0.0 {
            return;
        }
        debug!(generation, target, "Animating ratio");
        active.handle = Some(self.arm(generation, target));
    }

    fn arm(&self, generation: u64, target: f64) -> AnimationHandle {
        let slot = TimerSlot::acquire(&self.live_timers);
        let frames = self.frames.clone();
        let tick = self.config.tick();
        let step = self.config.step;
        let task = tokio::spawn(async move {
            let _slot = slot;
            count_up(&frames, generation, target, step, tick).await;
        });
        AnimationHandle { generation, task }
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, Active> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for RatioAnimator {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn count_up(
    frames: &watch::Sender<RatioFrame>,
    generation: u64,
    target: f64,
    step: f64,
    tick: Duration,
) {
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let mut done = false;
        frames.send_if_modified(|frame| {
            if frame.generation != generation {
                done = true;
                return false;
            }
            let next = (frame.value + step).min(target);
            frame.value = next;
            done = next >= target;
            true
        });
        if done {
            break;
        }
    }
}
