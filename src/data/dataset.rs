use std::{fs::File, io::Read, path::Path, sync::Arc};

use tracing::{debug, info, instrument};

use crate::{
    data::record::{RawRecord, Record},
    error::ExplorerError,
};

/// The full survey table, loaded once and never mutated.
///
/// Cloning is cheap: every clone shares the same rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /**
    Load the dataset from a CSV file with a header row.

    Any unreadable file, malformed row or row without an age aborts the load.

    ## Arguments
    * `path` - Location of the CSV file.

    ## Returns
    The loaded dataset, or an `ExplorerError` naming the first problem found.
     */
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ExplorerError> {
        let path = path.as_ref();
        info!("Loading survey dataset...");
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        if dataset.is_empty() {
            return Err(ExplorerError::EmptyDataset {
                path: path.display().to_string(),
            });
        }
        info!(records = dataset.len(), "Survey dataset loaded successfully");
        Ok(dataset)
    }

    /// Parses CSV rows from any reader. An input with only a header yields an empty dataset.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExplorerError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<RawRecord>().enumerate() {
            let record = row?.into_record(index + 1)?;
            records.push(record);
        }
        debug!("Parsed {} records", records.len());
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
