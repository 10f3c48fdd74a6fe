//! Directory-backed snapshot store.
//!
//! Whole tables are persisted under a logical name and reloaded later,
//! so a study can be rerun without touching the upstream warehouse.
//! The on-disk format is a passive container, not a contract: Parquet
//! by default, CSV when a snapshot has to be eyeballed.

use crate::error::{DataError, Result};
use derive_more::Display;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

/// On-disk format for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SnapshotFormat {
    /// Apache Parquet, the default.
    #[display("parquet")]
    Parquet,
    /// Comma-separated values.
    #[display("csv")]
    Csv,
}

impl SnapshotFormat {
    /// File extension for this format.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

/// Directory-backed store mapping logical table names to snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    format: SnapshotFormat,
}

impl SnapshotStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::with_format(dir, SnapshotFormat::Parquet)
    }

    /// Open a store with an explicit snapshot format.
    pub fn with_format<P: AsRef<Path>>(dir: P, format: SnapshotFormat) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, format })
    }

    /// Path a snapshot with this logical name would live at.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.format.extension()))
    }

    /// Whether a snapshot with this logical name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Persist `table` under `name`, replacing any previous snapshot.
    pub fn write(&self, name: &str, table: &mut DataFrame) -> Result<()> {
        let path = self.path_for(name);
        let file = File::create(&path)?;
        match self.format {
            SnapshotFormat::Parquet => {
                ParquetWriter::new(file).finish(table)?;
            }
            SnapshotFormat::Csv => {
                CsvWriter::new(file).finish(table)?;
            }
        }
        Ok(())
    }

    /// Load the snapshot stored under `name`.
    pub fn read(&self, name: &str) -> Result<DataFrame> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(DataError::SnapshotNotFound {
                name: name.to_string(),
                dir: self.dir.display().to_string(),
            });
        }
        let df = match self.format {
            SnapshotFormat::Parquet => ParquetReader::new(File::open(&path)?).finish()?,
            SnapshotFormat::Csv => CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(path))?
                .finish()?,
        };
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataFrame {
        df!(
            "issue_id" => [10001i64, 10001, 10002],
            "ret" => [0.02, -0.01, 0.05],
        )
        .unwrap()
    }

    #[test]
    fn test_parquet_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(tmp.path()).unwrap();

        let mut table = sample_table();
        store.write("security_months", &mut table).unwrap();

        assert!(store.contains("security_months"));
        let loaded = store.read("security_months").unwrap();
        assert_eq!(loaded.shape(), (3, 2));
        assert!(loaded.equals(&table));
    }

    #[test]
    fn test_csv_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::with_format(tmp.path(), SnapshotFormat::Csv).unwrap();

        let mut table = sample_table();
        store.write("security_months", &mut table).unwrap();

        let loaded = store.read("security_months").unwrap();
        assert_eq!(loaded.shape(), (3, 2));
    }

    #[test]
    fn test_missing_snapshot_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(tmp.path()).unwrap();

        let err = store.read("nope").unwrap_err();
        match err {
            DataError::SnapshotNotFound { name, .. } => assert_eq!(name, "nope"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_path_uses_format_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(tmp.path()).unwrap();
        assert!(store.path_for("t").to_string_lossy().ends_with("t.parquet"));
    }
}
