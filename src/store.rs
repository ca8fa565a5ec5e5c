//! # Append-only CSV Log
//!
//! Both persisted datasets (the mood timeline and the streak check-ins) are
//! flat CSV files with a header row that only ever grow. [`CsvLog`] owns one
//! such file and is the single writer for it inside the process: appends go
//! through a mutex so two request handlers can never interleave a row.
//!
//! Reads re-scan the whole file on every call. Volumes are small and there
//! is no cache to invalidate.
//!
//! ## File Format
//!
//! Fields are written with standard CSV quoting, so text containing commas,
//! quotes or line breaks survives a round trip. Rows that fail to parse are
//! reported as errors rather than skipped.

use anyhow::{Context, Result};
use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Single-writer handle to an append-only CSV file of `R` records.
#[derive(Debug)]
pub struct CsvLog<R> {
    path: PathBuf,
    header: &'static [&'static str],
    writer: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R> CsvLog<R>
where
    R: Serialize + DeserializeOwned,
{
    /// Open the log at `path`, creating the file (and its parent directory)
    /// with the given header row if it doesn't exist yet.
    pub fn open(path: impl Into<PathBuf>, header: &'static [&'static str]) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory {}", parent.display())
            })?;
        }

        // A zero-length file (touched, or cut short on first write) gets the
        // header too.
        let needs_header = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        if needs_header {
            let mut writer = csv::Writer::from_path(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            writer
                .write_record(header)
                .with_context(|| format!("Failed to write header to {}", path.display()))?;
            writer
                .flush()
                .with_context(|| format!("Failed to flush {}", path.display()))?;
            debug!("Initialized {} with header {:?}", path.display(), header);
        }

        Ok(Self {
            path,
            header,
            writer: Mutex::new(()),
            _record: PhantomData,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a new row.
    pub fn append(&self, record: &R) -> Result<()> {
        // Poisoning leaves the file usable.
        let _guard = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {} for appending", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .serialize(record)
            .with_context(|| format!("Failed to append row to {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;

        trace!("Appended row to {}", self.path.display());
        Ok(())
    }

    /// Read every record in file order.
    ///
    /// # Errors
    ///
    /// Fails if the file can't be opened or any row doesn't match the header's
    /// shape or the record type.
    pub fn read_all(&self) -> Result<Vec<R>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", self.path.display()))?;
        if headers.iter().ne(self.header.iter().copied()) {
            anyhow::bail!(
                "Unexpected header {:?} in {} (expected {:?})",
                headers,
                self.path.display(),
                self.header
            );
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize().enumerate() {
            // +2: one for the header, one for 1-based line numbers.
            let record: R = row.with_context(|| {
                format!("Malformed row {} in {}", index + 2, self.path.display())
            })?;
            records.push(record);
        }

        debug!("Read {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        name: String,
        count: u32,
    }

    const HEADER: &[&str] = &["name", "count"];

    fn open_log(dir: &TempDir) -> CsvLog<Row> {
        CsvLog::open(dir.path().join("rows.csv"), HEADER).expect("open log")
    }

    #[test]
    fn test_open_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let log = open_log(&dir);
        log.append(&Row { name: "a".into(), count: 1 }).unwrap();

        // Reopening must not rewrite the header or truncate.
        let log = open_log(&dir);
        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents, "name,count\na,1\n");
    }

    #[test]
    fn test_open_fills_in_header_of_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.csv");
        File::create(&path).unwrap();

        let log = open_log(&dir);
        assert!(log.read_all().unwrap().is_empty());
        log.append(&Row { name: "a".into(), count: 1 }).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "name,count\na,1\n");
    }

    #[test]
    fn test_open_creates_missing_parent() {
        let dir = TempDir::new().unwrap();
        let log: CsvLog<Row> =
            CsvLog::open(dir.path().join("nested/deeper/rows.csv"), HEADER).unwrap();
        assert!(log.path().exists());
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_commas_and_quotes_round_trip() {
        let dir = TempDir::new().unwrap();
        let log = open_log(&dir);
        let row = Row {
            name: "tired, \"very\" tired".into(),
            count: 7,
        };
        log.append(&row).unwrap();

        assert_eq!(log.read_all().unwrap(), vec![row]);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let dir = TempDir::new().unwrap();
        let log = open_log(&dir);
        fs::write(log.path(), "name,count\na,not-a-number\n").unwrap();

        let err = log.read_all().unwrap_err();
        assert!(format!("{err:#}").contains("Malformed row 2"));
    }

    #[test]
    fn test_unexpected_header_is_an_error() {
        let dir = TempDir::new().unwrap();
        let log = open_log(&dir);
        fs::write(log.path(), "who,when\n").unwrap();

        assert!(log.read_all().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let log = open_log(&dir);
        fs::remove_file(log.path()).unwrap();

        assert!(log.read_all().is_err());
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let dir = TempDir::new().unwrap();
        let log = std::sync::Arc::new(open_log(&dir));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let log = std::sync::Arc::clone(&log);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        log.append(&Row { name: format!("t{t}"), count: i }).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.read_all().unwrap().len(), 200);
    }
}
