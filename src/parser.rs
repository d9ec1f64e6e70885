//! Conversion of raw `git log` output into [`CommitRecord`]s.
//!
//! Each commit is one line of fields joined by a delimiter: sha, author,
//! date, then the subject. The subject is free text and may itself contain
//! the delimiter, so only the first three delimiters are treated as field
//! separators and everything after the third is the message, verbatim.

use crate::diagnostic::Diagnostic;
use crate::domain::commit::CommitRecord;
use tracing::warn;

/// ASCII unit separator; practically never found in commit subjects
pub const DEFAULT_DELIMITER: char = '\u{1f}';

const LEADING_FIELDS: usize = 3;

/// The `git log --pretty=format:` request and the delimiter it uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormat {
    pub delimiter: char,
    pub short_hash: bool,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat {
            delimiter: DEFAULT_DELIMITER,
            short_hash: false,
        }
    }
}

impl LogFormat {
    pub fn new(delimiter: char, short_hash: bool) -> Self {
        LogFormat {
            delimiter,
            short_hash,
        }
    }

    /// Format string for `git log --pretty=format:<spec>`
    ///
    /// ASCII delimiters are written as `%xNN` so control characters never
    /// have to travel through argv literally.
    pub fn pretty_spec(&self) -> String {
        let hash = if self.short_hash { "%h" } else { "%H" };
        let sep = if self.delimiter.is_ascii() {
            format!("%x{:02x}", self.delimiter as u32)
        } else {
            self.delimiter.to_string()
        };
        [hash, "%an <%ae>", "%ad", "%s"].join(&sep)
    }
}

/// Records parsed from one window plus any lines that had to be skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    pub records: Vec<CommitRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse raw log text; output order follows input line order.
pub fn parse_log(raw: &str, delimiter: char) -> ParsedLog {
    let mut parsed = ParsedLog::default();

    for (index, line) in raw.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line, delimiter) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => {
                let line_no = index + 1;
                warn!(line = line_no, reason, "skipping malformed log line");
                parsed.diagnostics.push(Diagnostic::MalformedRecord {
                    line: line_no,
                    reason: reason.to_string(),
                    content: line.to_string(),
                });
            }
        }
    }

    parsed
}

/// Parse a single line into a record.
///
/// A line with exactly three fields (no message delimiter) yields an empty
/// message.
pub fn parse_line(line: &str, delimiter: char) -> Result<CommitRecord, &'static str> {
    let mut fields = line.splitn(LEADING_FIELDS + 1, delimiter);

    let sha = fields.next().unwrap_or_default();
    let author = fields.next().ok_or("missing author and date fields")?;
    let date = fields.next().ok_or("missing date field")?;
    let message = fields.next().unwrap_or_default();

    if sha.trim().is_empty() {
        return Err("empty commit identifier");
    }

    Ok(CommitRecord::new(sha, author, date, message))
}
