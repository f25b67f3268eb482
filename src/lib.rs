// Public API exports
pub mod batch;
pub mod config;
pub mod logging;

// Re-export main types for convenience
pub use batch::{
    BatchError, BatchRanges, Batcher, Completion, DEFAULT_BATCH_SIZE, Step, run_all,
};

pub use config::BatchConfig;
