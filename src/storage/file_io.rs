//! File I/O utilities with atomic writes
//!
//! Every data file is written to a temporary sibling first and renamed over
//! the target only once fully written, so an existing file is never left
//! half-written.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PfaError, PfaResult};

/// Write a file atomically, filling it through `fill`
///
/// `fill` receives a buffered writer on a temporary file in the same
/// directory; if it fails, the target is left untouched.
pub fn write_atomic<P, F>(path: P, fill: F) -> PfaResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> PfaResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            PfaError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);
    let result = write_then_rename(path, &temp_path, fill);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_then_rename<F>(path: &Path, temp_path: &Path, fill: F) -> PfaResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> PfaResult<()>,
{
    let file = File::create(temp_path)
        .map_err(|e| PfaError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    fill(&mut writer)?;

    writer
        .flush()
        .map_err(|e| PfaError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| PfaError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(temp_path, path)
        .map_err(|e| PfaError::Storage(format!("Failed to rename temp file: {}", e)))
}

/// `transactions.csv` -> `transactions.csv.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write CSV rows atomically: one header row, then every record
pub fn write_csv_atomic<P, H, R, I>(path: P, headers: H, rows: I) -> PfaResult<()>
where
    P: AsRef<Path>,
    H: IntoIterator,
    H::Item: AsRef<[u8]>,
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    write_atomic(path, |writer| {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(headers)?;
        for row in rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    })
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> PfaResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, data)
            .map_err(|e| PfaError::Storage(format!("Failed to serialize data: {}", e)))?;
        writeln!(writer)?;
        Ok(())
    })
}

/// Whether a file is missing or has no content at all
///
/// Only a file that does not exist counts as missing; any other metadata
/// failure (permissions, a file where a directory should be) is an error.
pub fn is_missing_or_empty<P: AsRef<Path>>(path: P) -> PfaResult<bool> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len() == 0),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(e) => Err(PfaError::Storage(format!(
            "Cannot access {}: {}",
            path.display(),
            e
        ))),
    }
}
