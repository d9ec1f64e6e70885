use crate::domain::Window;
use crate::error::{ChangelogError, Result};
use crate::git::HistorySource;
use crate::parser::LogFormat;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory history source for tests
///
/// Holds a tag listing and per-tag log output (keyed by the window's upper
/// tag), can be told to fail, and records every range it was asked for.
#[derive(Debug, Default)]
pub struct MockHistory {
    tags: String,
    logs: HashMap<String, String>,
    tag_listing_error: Option<String>,
    failing_windows: HashMap<String, String>,
    fetched: RefCell<Vec<String>>,
}

impl MockHistory {
    /// Create an empty mock: no tags, no commits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw tag listing
    pub fn with_tag_text(mut self, text: impl Into<String>) -> Self {
        self.tags = text.into();
        self
    }

    /// Set the tag listing from labels
    pub fn with_tags(self, tags: &[&str]) -> Self {
        self.with_tag_text(tags.join("\n"))
    }

    /// Set the raw log output for the window ending at `tag`
    pub fn with_log(mut self, tag: impl Into<String>, raw: impl Into<String>) -> Self {
        self.logs.insert(tag.into(), raw.into());
        self
    }

    /// Make `list_tags` fail
    pub fn fail_tag_listing(mut self, reason: impl Into<String>) -> Self {
        self.tag_listing_error = Some(reason.into());
        self
    }

    /// Make `fetch_log` fail for the window ending at `tag`
    pub fn fail_window(mut self, tag: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failing_windows.insert(tag.into(), reason.into());
        self
    }

    /// Revision ranges requested so far, in call order
    pub fn fetched_ranges(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl HistorySource for MockHistory {
    fn list_tags(&self) -> Result<String> {
        match &self.tag_listing_error {
            Some(reason) => Err(ChangelogError::tag_list(reason.clone())),
            None => Ok(self.tags.clone()),
        }
    }

    fn fetch_log(&self, window: &Window, _format: &LogFormat) -> Result<String> {
        self.fetched.borrow_mut().push(window.revision_range());

        if let Some(reason) = self.failing_windows.get(&window.to.name) {
            return Err(ChangelogError::log_fetch(window.to_string(), reason.clone()));
        }

        Ok(self.logs.get(&window.to.name).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;

    fn window(to: &str) -> Window {
        Window {
            from: None,
            to: Tag::parse(to).unwrap(),
        }
    }

    #[test]
    fn test_mock_tags() {
        let mock = MockHistory::new().with_tags(&["v1.0.0", "v2.0.0"]);
        assert_eq!(mock.list_tags().unwrap(), "v1.0.0\nv2.0.0");
    }

    #[test]
    fn test_mock_default_is_empty() {
        let mock = MockHistory::default();
        assert!(mock.list_tags().unwrap().is_empty());
        assert!(mock
            .fetch_log(&window("v1.0.0"), &LogFormat::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_mock_records_calls_and_fails_on_request() {
        let mock = MockHistory::new()
            .with_log("v1.0.0", "raw")
            .fail_window("v2.0.0", "exit status 128");

        assert_eq!(
            mock.fetch_log(&window("v1.0.0"), &LogFormat::default()).unwrap(),
            "raw"
        );
        assert!(mock
            .fetch_log(&window("v2.0.0"), &LogFormat::default())
            .is_err());
        assert_eq!(mock.fetched_ranges(), vec!["v1.0.0", "v2.0.0"]);
    }
}
