//! Storage layer for nextdrill: JSONL persistence of learner runs.

mod jsonl;
mod runs;
mod traits;

pub use jsonl::JsonlStorage;
pub use runs::{RUNS_COLLECTION, RunStore};
pub use traits::{HasId, Storage};
