//! Identifier files: the hand-off between the listing and the detail phase.
//!
//! ```text
//! keywords=rust developer
//! location=Berlin
//! 3791234567
//! 3791234568
//! ```
//!
//! Leading `key=value` lines are metadata; the first line that parses as an
//! integer starts the identifier list.

use crate::error::{Result, ScanError};
use jobscout_core::{PostingId, SearchQuery, Timestamp};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name prefix of identifier files.
pub const ID_FILE_PREFIX: &str = "jobs_";
/// How many recent identifier files are offered to the user.
pub const RECENT_FILES: usize = 5;

/// Parsed identifier file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdFile {
    /// Metadata lines before the first identifier, verbatim
    pub search_terms: Vec<String>,
    /// Identifiers in file order
    pub ids: Vec<PostingId>,
}

impl IdFile {
    /// Value of a `key=value` metadata line.
    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.search_terms.iter().find_map(|line| {
            line.split_once('=')
                .filter(|(k, _)| k.trim() == key)
                .map(|(_, v)| v.trim())
        })
    }
}

/// Split file content into metadata lines and identifiers.
///
/// Blank lines and non-numeric lines after the first identifier are skipped.
/// Content without any identifier yields only metadata.
#[must_use]
pub fn parse_id_lines(content: &str) -> IdFile {
    let lines: Vec<&str> = content.lines().collect();
    let split = lines
        .iter()
        .position(|line| PostingId::parse(line).is_ok())
        .unwrap_or(lines.len());

    let search_terms = lines[..split]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let mut ids = Vec::with_capacity(lines.len() - split);
    for (offset, line) in lines[split..].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match PostingId::parse(line) {
            Ok(id) => ids.push(id),
            Err(e) => warn!(line = split + offset + 1, error = %e, "skipping identifier line"),
        }
    }

    IdFile { search_terms, ids }
}

/// Read and parse an identifier file.
pub fn read_id_file(path: &Path) -> Result<IdFile> {
    let content = std::fs::read_to_string(path).map_err(|e| ScanError::IdFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let parsed = parse_id_lines(&content);
    debug!(path = %path.display(), ids = parsed.ids.len(), "read identifier file");
    Ok(parsed)
}

/// Write the query metadata and identifiers, one per line.
pub fn write_id_file(path: &Path, query: &SearchQuery, ids: &[PostingId]) -> Result<()> {
    let mut content = format!(
        "keywords={}\nlocation={}\n",
        query.keyword(),
        query.location()
    );
    for id in ids {
        let _ = writeln!(content, "{id}");
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    debug!(path = %path.display(), ids = ids.len(), "wrote identifier file");
    Ok(())
}

/// `jobs_<yyMMdd_HHmmss>.txt` for a scrape timestamp.
#[must_use]
pub fn id_file_name(scraped_at: &Timestamp) -> String {
    format!("{ID_FILE_PREFIX}{}.txt", scraped_at.file_stamp())
}

/// Identifier files in `dir`, newest first, at most [`RECENT_FILES`].
///
/// Newest means lexicographically last name, which the timestamped names
/// make equal to the latest scrape. A missing directory has no files.
pub fn latest_id_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_id_file = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(ID_FILE_PREFIX))
            && path.extension().is_some_and(|ext| ext == "txt");
        if is_id_file {
            files.push(path);
        }
    }

    files.sort_unstable_by(|a, b| b.file_name().cmp(&a.file_name()));
    files.truncate(RECENT_FILES);
    Ok(files)
}
