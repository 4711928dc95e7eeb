//! nextdrill - next-exercise scheduling for language learning
//!
//! Given a learner's run (history and per-concept progress), a template
//! catalog, and a vocab index, the scheduler picks exactly one next exercise
//! on a fixed ladder: exposure, contextual, concept drill, recall, matching.
//! Around it sit thin collaborators for grading, persistence, catalog loading,
//! and presentation.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod grading;
pub mod id;
pub mod presentation;
pub mod scheduler;
pub mod storage;

pub use error::{DrillError, Result};
