use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use heavy_machine_gun_system_high_score::{KeyValueStore, StoreError};

/// Key-value store persisted as a flat TOML table.
///
/// The file is read on every lookup and rewritten on every store, so several
/// runs may share it sequentially.
#[derive(Clone, Debug)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => return Err(error.into()),
        };
        toml::from_str(&contents).map_err(|error| StoreError::Malformed(error.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get_u64(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.read_table()?.get(key).copied())
    }

    fn set_u64(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let mut table = self.read_table()?;
        let _ = table.insert(key.to_owned(), value);
        let contents =
            toml::to_string(&table).map_err(|error| StoreError::Malformed(error.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
