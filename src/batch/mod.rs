mod batcher;
mod completion;
mod error;
mod ranges;
mod step;


pub use batcher::{Batcher, run_all};
pub use completion::Completion;
pub use error::BatchError;
pub use ranges::BatchRanges;
pub use step::Step;

/// Batch size used when nothing else is configured
pub const DEFAULT_BATCH_SIZE: usize = 100;
