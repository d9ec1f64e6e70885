use serde::{Deserialize, Serialize};

/// One commit as it appears in the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub author: String,
    pub date: String,
    pub message: String,
}

impl CommitRecord {
    pub fn new(
        sha: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CommitRecord {
            sha: sha.into(),
            author: author.into(),
            date: date.into(),
            message: message.into(),
        }
    }

    /// Join the fields with `delimiter`, the same shape `git log` produces
    /// for the format requested by [`crate::parser::LogFormat`].
    pub fn to_log_line(&self, delimiter: char) -> String {
        let mut line = String::with_capacity(
            self.sha.len() + self.author.len() + self.date.len() + self.message.len() + 3,
        );
        for field in [&self.sha, &self.author, &self.date] {
            line.push_str(field);
            line.push(delimiter);
        }
        line.push_str(&self.message);
        line
    }
}
