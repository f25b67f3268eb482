use serde::Serialize;

/// Successful end of a run, whether it covered everything or was aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// End of the last delivered batch; every index below it was handed out.
    /// After an abort this includes the batch that aborted.
    pub cursor: usize,
    /// Number of callback invocations
    pub batches: usize,
    /// Whether the callback asked to stop early
    pub aborted: bool,
}

impl Completion {
    /// True when the run covered the whole count
    pub fn is_exhausted(&self, count: usize) -> bool {
        self.cursor >= count
    }
}
