//! Record file output.

use crate::error::Result;
use crate::record::PostingRecord;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Record file for an identifier file: same stem, `.csv`, in `info_dir`.
#[must_use]
pub fn record_file_path(info_dir: &Path, id_file: &Path) -> PathBuf {
    let stem = id_file
        .file_stem()
        .map_or_else(|| "jobs".into(), |s| s.to_string_lossy().into_owned());
    info_dir.join(format!("{stem}.csv"))
}

/// Write records to a CSV file, creating parent directories.
pub fn write_records(path: &Path, records: &[PostingRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_records_to(file, records)?;
    info!(path = %path.display(), records = records.len(), "wrote record file");
    Ok(())
}

/// Write a header row and one row per record.
///
/// The header is written even for an empty record list.
pub fn write_records_to<W: Write>(writer: W, records: &[PostingRecord]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(PostingRecord::COLUMNS)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}
