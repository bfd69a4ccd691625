use crate::local_store::{
    LocalStore,
    error::{Result as StoreResult, StoreError},
};

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a single JSON object file.
///
/// The whole map is cached in memory and rewritten on every change with the
/// atomic write pattern (temp file, fsync, rename). A file that cannot be
/// parsed is moved aside to `<name>.corrupted.<timestamp>` and the store
/// starts empty.
#[derive(Debug)]
pub struct FileLocalStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileLocalStore {
    /// Open the store at `path`, creating nothing until the first write.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = Self::load(&path)?;

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StoreResult<Entries> {
        if !path.exists() {
            info!("No local store at {path:?} (first launch)");
            return Ok(Entries::new());
        }

        let contents =
            fs::read_to_string(path).map_err(|e| StoreError::file_read(path.to_path_buf(), e))?;

        match serde_json::from_str::<Entries>(&contents) {
            Ok(entries) => {
                debug!("Loaded {} local store entries from {path:?}", entries.len());
                Ok(entries)
            }
            Err(e) => {
                warn!("Local store corrupted at {path:?}: {e}");
                Self::backup_corrupted(path)?;
                Ok(Entries::new())
            }
        }
    }

    /// Renames `<name>` to `<name>.corrupted.<timestamp>`.
    fn backup_corrupted(path: &Path) -> StoreResult<PathBuf> {
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let mut backup = path.as_os_str().to_owned();
        backup.push(format!(".corrupted.{timestamp}"));
        let backup_path = PathBuf::from(backup);

        fs::rename(path, &backup_path)
            .map_err(|e| StoreError::backup_failed(path.to_path_buf(), e))?;

        warn!("Backed up corrupted local store to {backup_path:?}");
        Ok(backup_path)
    }

    fn persist(&self, entries: &Entries) -> StoreResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| StoreError::dir_creation(dir.to_path_buf(), e))?;
        }

        let mut temp = self.path.as_os_str().to_owned();
        temp.push(format!(".tmp.{}", std::process::id()));
        let temp_path = PathBuf::from(temp);

        let json = serde_json::to_string_pretty(entries)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::atomic_rename(temp_path.clone(), self.path.clone(), e)
        })
    }
}

impl LocalStore for FileLocalStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());

        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(key) {
            return Ok(());
        }

        let mut updated = entries.clone();
        updated.remove(key);

        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }
}
