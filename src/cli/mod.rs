//! Workflow entry points shared by the binary and library callers

pub mod orchestration;

pub use orchestration::{
    generate_changelog, run_changelog_workflow, Orchestrator, RunOutcome, RunState,
};
