use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[derive(Clone, Debug, Default)]
/// Shared cancellation flag checked before every stage transition.
///
/// Clones observe the same flag, so whichever part of the host tears the splash down can
/// stop it.
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    /// Fresh, not stopped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// `true` once [`stop`](Self::stop) has been called on any clone.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
