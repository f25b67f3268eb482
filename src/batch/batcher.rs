// batcher.rs - fixed-size index batches driven through a callback

use super::{BatchError, BatchRanges, Completion, Step};
use tracing::{debug, trace};

/// Splits `[0, count)` into batches of at most `batch_size` items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batcher {
    batch_size: usize,
}

impl Batcher {
    /// Rejects a zero batch size, which could never make progress
    pub fn new(batch_size: usize) -> Result<Self, BatchError> {
        if batch_size == 0 {
            return Err(BatchError::InvalidBatchSize { batch_size });
        }
        Ok(Self { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches a full run over `count` items delivers
    pub fn batch_count(&self, count: usize) -> usize {
        count.div_ceil(self.batch_size)
    }

    /// The `[start, end)` ranges a full run over `count` items delivers
    pub fn ranges(&self, count: usize) -> BatchRanges {
        BatchRanges::new(count, self.batch_size)
    }

    pub fn split<'a, T>(&self, items: &'a [T]) -> Vec<&'a [T]> {
        items.chunks(self.batch_size).collect()
    }

    /// Call `each` with every `[start, end)` batch of `[0, count)`, in order.
    ///
    /// Stops at the first `Step::Abort` (still a success) or `Step::Fail`,
    /// whose error is returned as-is.
    pub fn run_all<E, F>(&self, count: usize, mut each: F) -> Result<Completion, E>
    where
        F: FnMut(usize, usize) -> Step<E>,
    {
        let mut completion = Completion {
            cursor: 0,
            batches: 0,
            aborted: false,
        };

        for range in self.ranges(count) {
            debug!(start = range.start, end = range.end, "dispatching batch");
            let step = each(range.start, range.end);
            completion.batches += 1;
            completion.cursor = range.end;

            match step {
                Step::Continue => {}
                Step::Abort => {
                    debug!(cursor = completion.cursor, "batch run aborted by callback");
                    completion.aborted = true;
                    return Ok(completion);
                }
                Step::Fail(err) => {
                    debug!(start = range.start, end = range.end, "batch callback failed");
                    return Err(err);
                }
            }
        }

        trace!(count, batches = completion.batches, "batch run complete");
        Ok(completion)
    }
}

/// Validate `batch_size` and run `each` over `[0, count)`.
///
/// An invalid batch size fails before `each` is ever called.
pub fn run_all<E, F>(count: usize, batch_size: usize, each: F) -> Result<Completion, BatchError<E>>
where
    F: FnMut(usize, usize) -> Step<E>,
{
    let batcher = Batcher::new(batch_size).map_err(|err| err.widen::<E>())?;
    batcher.run_all(count, each).map_err(BatchError::Callback)
}
