//! Full-snapshot CSV persistence.
//!
//! Every call rewrites the whole file from the current record set. The new
//! snapshot is written to a `.partial` sibling and renamed over the old one,
//! so the destination always holds the last complete snapshot.

use crate::error::Result;
use csv::{Terminator, WriterBuilder};
use feedharvest_core::EnrichedRecord;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// UTF-8 byte order mark, so spreadsheet tools pick the right encoding.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header row: every column any record carries, in first-seen order.
fn header(records: &[EnrichedRecord]) -> Vec<&'static str> {
    let mut header: Vec<&'static str> = Vec::new();
    for record in records {
        for (name, _) in record.columns() {
            if !header.contains(&name) {
                header.push(name);
            }
        }
    }
    header
}

/// Overwrites one CSV file with the full record set on every call.
#[derive(Debug, Clone)]
pub struct IncrementalWriter {
    destination: PathBuf,
}

impl IncrementalWriter {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    fn partial_path(&self) -> PathBuf {
        let mut name = self
            .destination
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".partial");
        self.destination.with_file_name(name)
    }

    /// Write a snapshot of `records`.
    pub fn write(&self, records: &[EnrichedRecord]) -> Result<()> {
        if let Some(parent) = self.destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let partial = self.partial_path();
        let mut file = File::create(&partial)?;
        file.write_all(BOM)?;

        let mut csv = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);

        let header = header(records);
        if !header.is_empty() {
            csv.write_record(&header)?;
        }
        for record in records {
            let values: HashMap<&str, Option<String>> = record.columns().into_iter().collect();
            let row = header.iter().map(|name| {
                values
                    .get(name)
                    .and_then(Clone::clone)
                    .unwrap_or_default()
            });
            csv.write_record(row)?;
        }

        let file = csv.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&partial, &self.destination)?;

        tracing::debug!(
            rows = records.len(),
            columns = header.len(),
            path = %self.destination.display(),
            "snapshot written"
        );
        Ok(())
    }
}
