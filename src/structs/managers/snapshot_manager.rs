use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::IoError;
use crate::parsing::parse_shares;
use crate::structs::{Holding, HoldingId, HoldingSet};
use crate::utils::{create_parent_directories, file_exists};

/* This manager handles loading yesterday's snapshot and saving today's,
per fund. The current snapshot lives at <data_dir>/<tag>.csv; before it
is overwritten the old file moves into <data_dir>/<tag>/ stamped with
its own modification date, so the archive keeps one file per observed
day.

The snapshot is plain CSV so it stays greppable and diffable. The code
column is read and written as text; treating it numerically would eat
leading zeros. */
pub struct SnapshotManager {
    csv_path: PathBuf,
    archive_dir: PathBuf,
}

/* On-disk row. Shares are kept as text on the way in so the same
normalization runs over fetched and re-read values alike. */
#[derive(Serialize, Deserialize)]
struct SnapshotRow {
    code: String,
    name: String,
    shares: String,
    weight: Option<Decimal>,
}

impl SnapshotManager {
    pub fn new(data_dir: &Path, fund_tag: &str) -> Self {
        return SnapshotManager {
            csv_path: data_dir.join(format!("{fund_tag}.csv")),
            archive_dir: data_dir.join(fund_tag),
        };
    }

    pub fn csv_path(&self) -> &Path {
        return &self.csv_path;
    }

    /* Yesterday's holdings, or None on the first run. A snapshot file
    that cannot be read back is logged and treated exactly like a
    missing one: the diff then reports everything as new rather than
    aborting the run. */
    pub fn load_previous(&self) -> Option<HoldingSet> {
        if !file_exists(&self.csv_path) {
            return None;
        }
        match self.read_snapshot() {
            Ok(set) => Some(set),
            Err(error) => {
                warn!(
                    "prior snapshot {} is unreadable ({}), comparing against nothing",
                    self.csv_path.display(),
                    error
                );
                None
            }
        }
    }

    /* Write the new snapshot next to the old one, then archive the old
    file and move the new one into place. The baseline is only given up
    once its replacement is fully on disk, so a fetch that succeeded but
    a write that did not still leaves tomorrow's comparison intact.
    Callers only reach this after a successful fetch. */
    pub fn store_current(&self, holdings: &HoldingSet) -> Result<(), IoError> {
        create_parent_directories(&self.csv_path)?;

        let staging_path = self.staging_path();
        let mut writer = csv::Writer::from_path(&staging_path)?;
        for holding in holdings.sorted_by_weight() {
            writer.serialize(SnapshotRow {
                code: holding.id.as_str().to_string(),
                name: holding.name.clone(),
                shares: holding.shares.to_string(),
                weight: holding.weight,
            })?;
        }
        writer.flush()?;
        drop(writer);

        self.archive_existing()?;
        fs::rename(&staging_path, &self.csv_path)?;
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        return self.csv_path.with_extension("csv.tmp");
    }

    fn read_snapshot(&self) -> Result<HoldingSet, IoError> {
        let mut reader = csv::Reader::from_path(&self.csv_path)?;
        let mut set = HoldingSet::new();
        for row in reader.deserialize::<SnapshotRow>() {
            let row = row?;
            set.insert(Holding {
                id: HoldingId::new(&row.code),
                name: row.name.trim().to_string(),
                shares: parse_shares(&row.shares),
                weight: row.weight,
            });
        }
        Ok(set)
    }

    /* Move the old current file into the archive, named after the day
    it was written. Re-running within the same day appends the mtime so
    nothing gets overwritten. */
    fn archive_existing(&self) -> Result<(), IoError> {
        if !file_exists(&self.csv_path) {
            return Ok(());
        }
        fs::create_dir_all(&self.archive_dir)?;

        let modified = fs::metadata(&self.csv_path)?
            .modified()
            .unwrap_or_else(|_| SystemTime::now());
        let stamp = DateTime::<Local>::from(modified).format("%Y%m%d");

        let mut destination = self.archive_dir.join(format!("holdings_{stamp}.csv"));
        if destination.exists() {
            let seconds = modified
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            destination = self
                .archive_dir
                .join(format!("holdings_{stamp}_{seconds}.csv"));
        }

        fs::rename(&self.csv_path, &destination)?;
        info!("archived previous snapshot to {}", destination.display());
        Ok(())
    }
}
