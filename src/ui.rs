//! Terminal output for the command-line tool.
//!
//! Status and results go to stdout, warnings and errors to stderr.

use console::style;
use std::path::Path;

use crate::diagnostic::Diagnostic;
use crate::domain::Changelog;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal diagnostic as a warning.
pub fn display_diagnostic(diagnostic: &Diagnostic) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), diagnostic);
}

/// One-line description of what was written
pub fn summary_line(changelog: &Changelog, dest: &Path) -> String {
    let tags = changelog.len();
    let commits = changelog.commit_count();
    format!(
        "Wrote {} {}, {} {} to {}",
        tags,
        if tags == 1 { "tag" } else { "tags" },
        commits,
        if commits == 1 { "commit" } else { "commits" },
        dest.display()
    )
}

/// Display the per-tag commit counts, in document order.
pub fn display_changelog_summary(changelog: &Changelog, dest: &Path) {
    for entry in changelog.entries() {
        println!("  {} {}", style(&entry.tag).bold(), entry.commits.len());
    }
    display_success(&summary_line(changelog, dest));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChangelogBuilder, CommitRecord};

    #[test]
    fn test_summary_line_pluralizes() {
        let mut builder = ChangelogBuilder::new();
        builder.add("v1.0.0", vec![CommitRecord::new("a", "b", "c", "d")]);
        let line = summary_line(&builder.finalize(), Path::new("out.json"));
        assert_eq!(line, "Wrote 1 tag, 1 commit to out.json");

        let empty = ChangelogBuilder::new().finalize();
        let line = summary_line(&empty, Path::new("changelog.json"));
        assert_eq!(line, "Wrote 0 tags, 0 commits to changelog.json");
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_status("test status");
        display_diagnostic(&Diagnostic::NoReleaseTags);
    }
}
