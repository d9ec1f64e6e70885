pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod domain;
pub mod error;
pub mod git;
pub mod parser;
pub mod persist;
pub mod ui;

pub use error::{ChangelogError, Result};
