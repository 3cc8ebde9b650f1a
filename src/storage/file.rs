//! File-backed cart storage

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{CartSnapshot, CartStorage, StorageError, validate_key};

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for storage, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();

        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    /// Directory holding the stored carts.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn save(&self, key: &str, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        // Dropping the temp file on any early return removes it.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());

            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(io::Error::from)?;

        debug!(path = %path.display(), lines = snapshot.lines.len(), "saved cart");

        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<CartSnapshot>, StorageError> {
        let path = self.path_for(key)?;

        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let snapshot: CartSnapshot = serde_json::from_reader(io::BufReader::new(file))?;

        debug!(path = %path.display(), lines = snapshot.lines.len(), "loaded cart");

        Ok(Some(snapshot))
    }
}
