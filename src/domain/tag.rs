use crate::error::{ChangelogError, Result};
use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// A release tag whose label parsed as a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub version: Version,
}

impl Tag {
    /// Parse a tag label, accepting an optional leading `v` or `V`.
    ///
    /// "v1.2.3" and "1.2.3-rc.1" are valid; "1.2", "v1.2.3.4" and
    /// "release-1.2.3" are not.
    pub fn parse(name: &str) -> std::result::Result<Self, semver::Error> {
        let version_part = name
            .strip_prefix('v')
            .or_else(|| name.strip_prefix('V'))
            .unwrap_or(name);
        let version = Version::parse(version_part)?;

        Ok(Tag {
            name: name.to_string(),
            version,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Ord for Tag {
    /// Semantic-version precedence; the label breaks ties so that "v1.0.0"
    /// and "1.0.0" still have a total order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Tag name filter (e.g., `^v\d+` keeps only "v"-prefixed releases)
#[derive(Debug, Clone)]
pub struct TagFilter {
    regex: Regex,
}

impl TagFilter {
    /// Compile a filter expression
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            ChangelogError::config(format!("Invalid tag filter '{}': {}", pattern, e))
        })?;
        Ok(TagFilter { regex })
    }

    /// Whether the label matches the filter anywhere
    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
