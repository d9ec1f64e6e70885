use crate::domain::TagFilter;
use crate::error::{ChangelogError, Result};
use crate::parser::{LogFormat, DEFAULT_DELIMITER};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gitlogjson.toml";

/// Order of tags in the written document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    /// Newest release first, as changelogs are usually read
    #[default]
    NewestFirst,
    /// Oldest release first, i.e. the order windows are processed
    OldestFirst,
}

impl std::str::FromStr for Order {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "newest-first" | "newest" => Ok(Order::NewestFirst),
            "oldest-first" | "oldest" => Ok(Order::OldestFirst),
            other => Err(ChangelogError::config(format!(
                "Unknown order '{}', expected 'newest-first' or 'oldest-first'",
                other
            ))),
        }
    }
}

fn default_dest() -> PathBuf {
    PathBuf::from("changelog.json")
}

fn default_repo() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

/// Complete configuration for a changelog run.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Abbreviated commit ids instead of full ones
    #[serde(default)]
    pub short_hash: bool,

    /// Where the document is written
    #[serde(default = "default_dest")]
    pub dest: PathBuf,

    /// Regular expression a tag label must match to be included
    #[serde(default)]
    pub filter: Option<String>,

    /// Indent the written document
    #[serde(default)]
    pub pretty: bool,

    #[serde(default)]
    pub order: Order,

    /// Upper bound for each git invocation
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Field separator requested from `git log`
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Value for `git log --date=`; git's default when unset
    #[serde(default)]
    pub date_format: Option<String>,

    /// Repository to read; discovered upwards from here
    #[serde(default = "default_repo")]
    pub repo: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            short_hash: false,
            dest: default_dest(),
            filter: None,
            pretty: false,
            order: Order::default(),
            timeout_secs: default_timeout_secs(),
            delimiter: default_delimiter(),
            date_format: None,
            repo: default_repo(),
        }
    }
}

/// Only control characters are guaranteed absent from `%H`, `%an <%ae>`
/// and `%ad`; line breaks separate records and tabs can occur in names.
fn is_safe_delimiter(c: char) -> bool {
    c.is_ascii_control() && !matches!(c, '\n' | '\r' | '\t')
}

impl Config {
    /// Reject settings that would make the run meaningless or lossy
    pub fn validate(&self) -> Result<()> {
        if !is_safe_delimiter(self.delimiter) {
            return Err(ChangelogError::config(format!(
                "delimiter {:?} could appear in author or date fields; \
                 use an ASCII control character other than tab or a line break (e.g. \"\\u001f\")",
                self.delimiter
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ChangelogError::config("timeout_secs must be greater than 0"));
        }
        self.tag_filter()?;
        Ok(())
    }

    /// Compiled tag filter, if one is configured
    pub fn tag_filter(&self) -> Result<Option<TagFilter>> {
        self.filter.as_deref().map(TagFilter::new).transpose()
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::new(self.delimiter, self.short_hash)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitlogjson.toml` in current directory
/// 3. `~/.config/.gitlogjson.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| ChangelogError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.short_hash);
        assert_eq!(config.dest, PathBuf::from("changelog.json"));
        assert_eq!(config.filter, None);
        assert!(!config.pretty);
        assert_eq!(config.order, Order::NewestFirst);
        assert_eq!(config.delimiter, '\u{1f}');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_order_from_toml_and_str() {
        let config: Config = toml::from_str(r#"order = "oldest-first""#).unwrap();
        assert_eq!(config.order, Order::OldestFirst);
        assert_eq!("newest".parse::<Order>().unwrap(), Order::NewestFirst);
        assert!("sideways".parse::<Order>().is_err());
    }

    #[test]
    fn test_validate_rejects_newline_delimiter() {
        let config = Config {
            delimiter: '\n',
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_printable_delimiters() {
        for delimiter in [',', '|', ';', ' ', '\t', '␞'] {
            let config = Config {
                delimiter,
                date_format: Some("rfc".to_string()),
                ..Config::default()
            };
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ChangelogError::Config(_)),
                "delimiter {:?} should be rejected",
                delimiter
            );
        }
    }

    #[test]
    fn test_validate_accepts_control_delimiters() {
        for delimiter in ['\0', '\u{1e}', '\u{1f}'] {
            let config = Config {
                delimiter,
                ..Config::default()
            };
            assert!(config.validate().is_ok(), "delimiter {:?}", delimiter);
        }
    }

    #[test]
    fn test_accepted_delimiter_keeps_commas_in_author_and_date() {
        let config = Config {
            date_format: Some("rfc".to_string()),
            ..Config::default()
        };
        config.validate().unwrap();

        let record = crate::domain::CommitRecord::new(
            "abc123",
            "Doe, Jane <j@x.com>",
            "Mon, 1 Jan 2020 00:00:00 +0000",
            "fix: a, b",
        );
        let line = record.to_log_line(config.delimiter);
        assert_eq!(
            crate::parser::parse_line(&line, config.delimiter).unwrap(),
            record
        );
    }

    #[test]
    fn test_validate_rejects_bad_filter() {
        let config = Config {
            filter: Some("[unclosed".to_string()),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid tag filter"));
    }

    #[test]
    fn test_log_format_follows_settings() {
        let config = Config {
            short_hash: true,
            delimiter: '\u{1e}',
            ..Config::default()
        };
        assert_eq!(config.log_format(), LogFormat::new('\u{1e}', true));
    }
}
