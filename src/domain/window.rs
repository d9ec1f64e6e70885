use crate::domain::tag::Tag;
use std::fmt;

/// A slice of history: commits reachable from `to` but not from `from`.
///
/// The first window of a run has no lower bound and covers everything up to
/// its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub from: Option<Tag>,
    pub to: Tag,
}

impl Window {
    /// Revision range understood by `git log`
    pub fn revision_range(&self) -> String {
        match &self.from {
            Some(from) => format!("{}..{}", from.name, self.to.name),
            None => self.to.name.clone(),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.revision_range())
    }
}

/// Derive contiguous windows from tags sorted in ascending precedence.
///
/// `[t0, t1, .., tn]` becomes `[(none, t0), (t0, t1), .., (tn-1, tn)]`.
/// Nothing past the newest tag is covered.
pub fn build_windows(ordered_tags: &[Tag]) -> Vec<Window> {
    let mut windows = Vec::with_capacity(ordered_tags.len());
    let mut previous: Option<&Tag> = None;

    for tag in ordered_tags {
        windows.push(Window {
            from: previous.cloned(),
            to: tag.clone(),
        });
        previous = Some(tag);
    }

    windows
}
