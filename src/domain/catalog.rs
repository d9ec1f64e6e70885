//! Release tag catalog
//!
//! Turns the raw, unordered output of a tag listing into a strictly ordered
//! sequence of semantic-version tags.

use crate::diagnostic::Diagnostic;
use crate::domain::tag::{Tag, TagFilter};
use crate::error::{ChangelogError, Result};
use crate::git::HistorySource;
use tracing::{debug, warn};

/// Validated tags in ascending precedence, plus what was dropped on the way
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    tags: Vec<Tag>,
    diagnostics: Vec<Diagnostic>,
}

impl TagCatalog {
    /// List tags from the source and build the catalog.
    ///
    /// Fails with `TagListUnavailable` only when the listing itself cannot be
    /// read; zero valid tags is an ordinary empty catalog.
    pub fn load(source: &dyn HistorySource, filter: Option<&TagFilter>) -> Result<Self> {
        let raw = source.list_tags().map_err(|e| match e {
            ChangelogError::TagListUnavailable(_) => e,
            other => ChangelogError::tag_list(other.to_string()),
        })?;
        Ok(Self::from_text(&raw, filter))
    }

    /// Build the catalog from newline separated tag labels
    pub fn from_text(raw: &str, filter: Option<&TagFilter>) -> Self {
        let mut tags = Vec::new();
        let mut diagnostics = Vec::new();

        for candidate in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let tag = match Tag::parse(candidate) {
                Ok(tag) => tag,
                Err(e) => {
                    warn!(tag = candidate, error = %e, "dropping tag without semantic version");
                    diagnostics.push(Diagnostic::InvalidTagSyntax {
                        tag: candidate.to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if let Some(filter) = filter {
                if !filter.matches(&tag.name) {
                    debug!(tag = %tag, filter = filter.as_str(), "tag excluded by filter");
                    continue;
                }
            }

            tags.push(tag);
        }

        tags.sort();
        tags.dedup_by(|a, b| a.name == b.name);

        if tags.is_empty() {
            diagnostics.push(Diagnostic::NoReleaseTags);
        }

        debug!(count = tags.len(), "tag catalog loaded");
        TagCatalog { tags, diagnostics }
    }

    /// Tags in ascending semantic-version precedence
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Split into the ordered tags and the collected diagnostics
    pub fn into_parts(self) -> (Vec<Tag>, Vec<Diagnostic>) {
        (self.tags, self.diagnostics)
    }
}
