//! Secure key/value storage backends.

use super::errors::{StorageError, StorageResult};
use directories::ProjectDirs;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Opaque secret storage capability.
///
/// Implementations must be safe to share between threads. A missing key is
/// `Ok(None)`; `Err` is reserved for backend failures.
pub trait SecureStorage: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Store every entry in one step: on `Err` none of them were written
    fn set_many(&self, entries: &[(&str, &str)]) -> StorageResult<()>;

    /// Remove every key in one step: on `Err` none of them were removed
    fn delete_many(&self, keys: &[&str]) -> StorageResult<()>;
}

/// In-process storage that forgets everything on drop
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.delete_many(&[key])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> StorageResult<()> {
        let mut map = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn delete_many(&self, keys: &[&str]) -> StorageResult<()> {
        let mut map = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// File name used inside the credential directory
const CREDENTIALS_FILE: &str = "credentials.json";

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Credentials persisted as a JSON map in a file only the owner can read.
///
/// Every write replaces the whole file through a temp file and a rename, so a
/// concurrent reader sees either the old map or the new one.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open storage in the platform data directory:
    /// - Linux:   `~/.local/share/zoekdeware/credentials.json`
    /// - macOS:   `~/Library/Application Support/app.zoekdeware.zoekdeware/credentials.json`
    /// - Windows: `{FOLDERID_RoamingAppData}\zoekdeware\zoekdeware\data\credentials.json`
    pub fn open_default() -> StorageResult<Self> {
        let dirs =
            ProjectDirs::from("app", "zoekdeware", "zoekdeware").ok_or(StorageError::NoDataDir)?;
        Self::open_in(dirs.data_dir())
    }

    /// Open storage inside an explicit directory, creating it if needed
    pub fn open_in(dir: &Path) -> StorageResult<Self> {
        create_private_dir(dir)?;
        let path = dir.join(CREDENTIALS_FILE);
        log::debug!("Credential storage at {}", path.display());
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> StorageResult<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> StorageResult<()> {
        let data = serde_json::to_vec(map)?;
        let temp_path = self.path.with_extension("tmp");

        let mut file = create_private_file(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> StorageResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut map = self.read_map()?;
        if f(&mut map) {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

impl SecureStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.set_many(&[(key, value)])
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.delete_many(&[key])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> StorageResult<()> {
        self.update(|map| {
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
            true
        })
    }

    fn delete_many(&self, keys: &[&str]) -> StorageResult<()> {
        self.update(|map| {
            let mut changed = false;
            for key in keys {
                changed |= map.remove(*key).is_some();
            }
            changed
        })
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> StorageResult<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    fs::DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(dir)?;
    fs::set_permissions(dir, fs::Permissions::from_mode(DIR_MODE))?;
    Ok(())
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> StorageResult<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(unix)]
fn create_private_file(path: &Path) -> StorageResult<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(FILE_MODE)
        .open(path)?;
    // A stale temp file keeps its old mode through open()
    file.set_permissions(fs::Permissions::from_mode(FILE_MODE))?;
    Ok(file)
}

#[cfg(not(unix))]
fn create_private_file(path: &Path) -> StorageResult<fs::File> {
    Ok(fs::File::create(path)?)
}
