use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageResult};
use crate::error::{Error, Result, StorageError};

/// Store keeping one file per key inside a directory.
///
/// Keys may only contain ASCII letters, digits, `_`, `-` and `.`, and may not
/// start with a dot.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    /// Opens the store in the platform's local data directory.
    pub fn open_default() -> Result<Self> {
        let dir = Self::default_location()
            .ok_or_else(|| Error::IoError("ローカルデータディレクトリが見つかりません".into()))?;
        Self::open(dir)
    }

    pub fn default_location() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("tabviz"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn backend(err: std::io::Error) -> StorageError {
    StorageError::Backend(err.to_string())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(backend(err)),
        }
    }

    fn set(&mut self, key: &str, value: String) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(backend)?;
        fs::rename(&tmp, &path).map_err(backend)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(backend(err)),
        }
    }
}
