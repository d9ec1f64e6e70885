//! Main changelog workflow
//!
//! Sequences catalog loading, windowing, fetching, parsing and aggregation.
//! Windows are processed one at a time in ascending tag order; the first
//! fatal error ends the run and no partial changelog escapes.

use std::fmt;

use tracing::{debug, info};

use crate::config::{Config, Order};
use crate::diagnostic::Diagnostic;
use crate::domain::{build_windows, Changelog, ChangelogBuilder, TagCatalog};
use crate::error::Result;
use crate::git::HistorySource;
use crate::parser::parse_log;
use crate::persist;

/// Where a run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Init,
    ListingTags,
    Fetching { tag: String },
    Parsing { tag: String },
    Aggregating { tag: String },
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Init => write!(f, "init"),
            RunState::ListingTags => write!(f, "listing tags"),
            RunState::Fetching { tag } => write!(f, "fetching {}", tag),
            RunState::Parsing { tag } => write!(f, "parsing {}", tag),
            RunState::Aggregating { tag } => write!(f, "aggregating {}", tag),
            RunState::Done => write!(f, "done"),
            RunState::Failed => write!(f, "failed"),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// The complete changelog, in the configured order
    pub changelog: Changelog,

    /// Non-fatal problems, in the order they were found
    pub diagnostics: Vec<Diagnostic>,
}

/// Drives a single changelog run against a history source
pub struct Orchestrator<'a> {
    source: &'a dyn HistorySource,
    config: &'a Config,
    state: RunState,
}

impl<'a> Orchestrator<'a> {
    pub fn new(source: &'a dyn HistorySource, config: &'a Config) -> Self {
        Orchestrator {
            source,
            config,
            state: RunState::Init,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Run to completion.
    ///
    /// On error the state is left at [`RunState::Failed`] and nothing is
    /// returned besides the error.
    pub fn run(&mut self) -> Result<RunOutcome> {
        match self.run_inner() {
            Ok(outcome) => {
                self.transition(RunState::Done);
                Ok(outcome)
            }
            Err(e) => {
                debug!(state = %self.state, error = %e, "run failed");
                self.transition(RunState::Failed);
                Err(e)
            }
        }
    }

    fn run_inner(&mut self) -> Result<RunOutcome> {
        self.config.validate()?;
        let filter = self.config.tag_filter()?;
        let format = self.config.log_format();

        self.transition(RunState::ListingTags);
        let catalog = TagCatalog::load(self.source, filter.as_ref())?;
        let (tags, mut diagnostics) = catalog.into_parts();
        let windows = build_windows(&tags);
        info!(tags = tags.len(), "processing release windows");

        let mut builder = ChangelogBuilder::new();
        for window in &windows {
            let tag = window.to.name.clone();

            self.transition(RunState::Fetching { tag: tag.clone() });
            let raw = self.source.fetch_log(window, &format)?;

            self.transition(RunState::Parsing { tag: tag.clone() });
            let parsed = parse_log(&raw, format.delimiter);
            diagnostics.extend(parsed.diagnostics.into_iter().map(|d| d.in_window(&tag)));

            self.transition(RunState::Aggregating { tag: tag.clone() });
            debug!(tag = %tag, commits = parsed.records.len(), "window complete");
            builder.add(tag, parsed.records);
        }

        let changelog = match self.config.order {
            Order::OldestFirst => builder.finalize(),
            Order::NewestFirst => builder.finalize().reversed(),
        };

        Ok(RunOutcome {
            changelog,
            diagnostics,
        })
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "state change");
        self.state = next;
    }
}

/// Build the changelog from `source` without writing anything
pub fn generate_changelog(source: &dyn HistorySource, config: &Config) -> Result<RunOutcome> {
    Orchestrator::new(source, config).run()
}

/// Build the changelog and, only if that fully succeeds, write it to
/// `config.dest`
pub fn run_changelog_workflow(source: &dyn HistorySource, config: &Config) -> Result<RunOutcome> {
    let outcome = generate_changelog(source, config)?;
    persist::persist(&outcome.changelog, &config.dest, config.pretty)?;
    Ok(outcome)
}
