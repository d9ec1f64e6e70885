use std::fmt;

/// Non-fatal problems found while building a changelog.
///
/// These never abort a run; they are collected and shown to the user as
/// warnings once the run completes.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Tag label is not a semantic version and was left out of the catalog
    InvalidTagSyntax { tag: String, reason: String },
    /// A log line lacked the leading sha/author/date fields and was skipped
    MalformedRecord {
        line: usize,
        reason: String,
        content: String,
    },
    /// No valid release tags were found, so the changelog is empty
    NoReleaseTags,
}

impl Diagnostic {
    /// Attach the window a malformed line came from, for reporting
    pub fn in_window(self, tag: &str) -> Self {
        match self {
            Diagnostic::MalformedRecord {
                line,
                reason,
                content,
            } => Diagnostic::MalformedRecord {
                line,
                reason: format!("{} (window ending at '{}')", reason, tag),
                content,
            },
            other => other,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidTagSyntax { tag, reason } => {
                write!(f, "Ignoring tag '{}': {}", tag, reason)
            }
            Diagnostic::MalformedRecord {
                line,
                reason,
                content,
            } => {
                let preview: String = content.chars().take(40).collect();
                write!(
                    f,
                    "Skipped malformed log line {}: {} ({:?})",
                    line, reason, preview
                )
            }
            Diagnostic::NoReleaseTags => {
                write!(f, "No release tags found; the changelog will be empty")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tag_display() {
        let d = Diagnostic::InvalidTagSyntax {
            tag: "not-a-tag".to_string(),
            reason: "unexpected character".to_string(),
        };
        let msg = d.to_string();
        assert!(msg.contains("not-a-tag"));
        assert!(msg.contains("unexpected character"));
    }

    #[test]
    fn test_malformed_record_preview_is_truncated() {
        let d = Diagnostic::MalformedRecord {
            line: 3,
            reason: "expected at least 3 fields".to_string(),
            content: "x".repeat(200),
        };
        let msg = d.to_string();
        assert!(msg.contains("line 3"));
        assert!(!msg.contains(&"x".repeat(41)));
    }

    #[test]
    fn test_in_window_only_touches_malformed_records() {
        let d = Diagnostic::MalformedRecord {
            line: 1,
            reason: "missing fields".to_string(),
            content: "abc".to_string(),
        }
        .in_window("v1.2.0");
        assert!(d.to_string().contains("v1.2.0"));

        assert_eq!(
            Diagnostic::NoReleaseTags.in_window("v1.2.0"),
            Diagnostic::NoReleaseTags
        );
    }
}
