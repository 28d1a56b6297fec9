use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::state::{BankState, CURRENT_SCHEMA_VERSION};
use crate::errors::{BankError, Result};
use crate::storage::StorageBackend;
use crate::utils::{app_data_dir, ensure_dir};

const SNAPSHOT_FILE: &str = "bank.json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed storage holding the whole bank snapshot in one pretty-printed
/// JSON file. Writes stage to a temporary sibling and rename into place, so
/// an interrupted save never corrupts the existing snapshot.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    snapshot_file: PathBuf,
}

impl JsonStorage {
    /// Creates storage rooted at `root`, defaulting to the application data
    /// directory (`~/.bank_core`, overridable via `BANK_CORE_HOME`).
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let snapshot_file = root.join(SNAPSHOT_FILE);
        Ok(Self {
            root,
            snapshot_file,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_file
    }
}

impl StorageBackend for JsonStorage {
    fn load_or_default(&self) -> Result<BankState> {
        if !self.snapshot_file.exists() {
            return Ok(BankState::new());
        }
        let data = fs::read_to_string(&self.snapshot_file)?;
        let state: BankState = serde_json::from_str(&data)?;
        if state.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(BankError::Storage(format!(
                "snapshot schema v{} is newer than supported v{}",
                state.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(state)
    }

    fn save(&self, state: &BankState) -> Result<()> {
        ensure_dir(&self.root)?;
        let json = serde_json::to_string_pretty(state)?;
        let tmp = tmp_path(&self.snapshot_file);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.snapshot_file)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
