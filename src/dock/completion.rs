/// One-shot "splash finished" callback handed over by the page shell.
///
/// The closure is owned, moved along with the run, and consumed by [`fire`](Self::fire).
/// Dropping the signal (teardown) never invokes it.
pub struct CompletionSignal(Box<dyn FnOnce()>);

impl CompletionSignal {
    /// Wrap a zero-argument callback.
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self(Box::new(callback))
    }

    /// Invoke the callback.
    pub fn fire(self) {
        (self.0)()
    }
}

impl std::fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CompletionSignal(..)")
    }
}
