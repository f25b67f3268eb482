/// What a batch callback wants the run to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<E> {
    /// Batch handled, move on to the next one
    Continue,
    /// Stop early; the run still succeeds
    Abort,
    /// Stop and hand this failure back to the caller untouched
    Fail(E),
}

impl<E> Step<E> {
    /// The abort sentinel, for callers that prefer a named value over the variant
    pub const ABORT: Self = Step::Abort;

    pub fn is_abort(&self) -> bool {
        matches!(self, Step::Abort)
    }
}

impl<E> From<Result<(), E>> for Step<E> {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Step::Continue,
            Err(err) => Step::Fail(err),
        }
    }
}
