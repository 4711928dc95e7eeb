//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - new: start a run
//! - next: show the next exercise for a run
//! - record: record the learner's answer
//! - status / list / reset: run management

use clap::{Parser, Subcommand, ValueEnum};
use nextdrill::domain::ExerciseResult;
use std::path::PathBuf;

/// nextdrill - picks the next language exercise for a learner
#[derive(Parser, Debug)]
#[command(name = "nextdrill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Answer outcome as typed on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Skipped,
}

impl From<Outcome> for ExerciseResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => ExerciseResult::Correct,
            Outcome::Incorrect => ExerciseResult::Incorrect,
            Outcome::Skipped => ExerciseResult::Other,
        }
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new run
    New {
        /// Language being learned (defaults to config)
        #[arg(short, long)]
        target: Option<String>,

        /// Language the learner already knows (defaults to config)
        #[arg(short, long)]
        support: Option<String>,
    },

    /// Show the next exercise for a run
    Next {
        /// Run ID
        id: String,

        /// Print the directive as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record the answer to the exercise last shown by `next`
    Record {
        /// Run ID
        id: String,

        /// How the learner did
        #[arg(value_enum)]
        outcome: Outcome,
    },

    /// Get status of a specific run
    Status {
        /// Run ID to check
        id: String,

        /// Show per-concept progress
        #[arg(short, long)]
        detailed: bool,
    },

    /// List all runs
    List,

    /// Start a run over, keeping its id and languages
    Reset {
        /// Run ID to reset
        id: String,
    },
}
