//! Exercise scheduler: picks the next exercise for a run.
//!
//! This module provides:
//! - **Cooldowns**: keeps a just-practiced concept from coming straight back.
//! - **Eligibility**: the forward-leakage guard over template dependencies.
//! - **Weakness**: inverse-streak scoring used to rank candidates.
//! - **Selection**: per-rung candidate filtering and ranking.
//! - **SchedulerEngine**: walks the exercise ladder and returns one directive.
//!
//! # Example
//!
//! ```ignore
//! use nextdrill::scheduler::SchedulerEngine;
//!
//! let engine = SchedulerEngine::new();
//! engine.ensure_initialized(&mut run, &vocab);
//! let directive = engine.decide(&run, &templates, &vocab);
//! ```

mod cooldown;
mod eligibility;
mod engine;
mod matcher;
mod select;
mod weakness;

pub use cooldown::{
    COOLDOWN_AFTER_CORRECT, COOLDOWN_AFTER_INCORRECT, COOLDOWN_OTHER, cooldown_for, is_on_cooldown,
    is_same_type_as_last,
};
pub use eligibility::{first_blocking_dependency, template_allowed};
pub use engine::{MATCHING_BATCH_SIZE, SchedulerEngine};
pub use matcher::find_template;
pub use select::{Candidate, pick_best};
pub use weakness::{WEAKNESS_BASE, sort_weakest_first, weakness_score};
