//! Serialization and all-or-nothing writing of the changelog document

use crate::domain::Changelog;
use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Serialize the changelog to JSON text, ending with a newline
pub fn render(changelog: &Changelog, pretty: bool) -> Result<String> {
    let mut document = if pretty {
        serde_json::to_string_pretty(changelog)?
    } else {
        serde_json::to_string(changelog)?
    };
    document.push('\n');
    Ok(document)
}

/// Write `document` to `dest` atomically.
///
/// The text goes to a temporary file next to `dest` which is then renamed
/// over it, so `dest` is either the old file or the complete new one.
pub fn write_atomic(document: &str, dest: &Path) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(document.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|e| e.error)?;

    debug!(dest = %dest.display(), bytes = document.len(), "changelog written");
    Ok(())
}

/// Render then write; nothing touches the filesystem if rendering fails
pub fn persist(changelog: &Changelog, dest: &Path, pretty: bool) -> Result<()> {
    let document = render(changelog, pretty)?;
    write_atomic(&document, dest)
}
