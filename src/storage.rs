//! Key-value backends a [`LocalStore`](crate::store::LocalStore) can persist into

use std::collections::HashMap;
use std::error::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::traits::Storage;


/// A storage that keeps every key in its own JSON file inside a folder
#[derive(Debug, PartialEq)]
pub struct FolderStorage {
    folder: PathBuf,
}

impl FolderStorage {
    /// Use the given folder, creating it if needed
    pub fn new(folder: &Path) -> Result<Self, Box<dyn Error>> {
        if let Err(err) = std::fs::create_dir_all(folder) {
            return Err(format!("Unable to create folder {:?}: {}", folder, err).into());
        }
        Ok(Self {
            folder: PathBuf::from(folder),
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.folder.join(format!("{}.json", sanitize_filename::sanitize(key)))
    }
}

impl Storage for FolderStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let path = self.path_for(key);
        if let Err(err) = std::fs::write(&path, value) {
            return Err(format!("Unable to save file {:?}: {}", path, err).into());
        }
        Ok(())
    }
}


/// An in-memory storage.
///
/// It can be given a quota (in bytes, summed over every stored value), so that writes exceeding it fail the way a full `localStorage` does.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.items.iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        if let Some(quota) = self.quota {
            let needed = self.used_without(key) + value.len();
            if needed > quota {
                return Err(format!("Quota exceeded while writing {} ({} > {} bytes)", key, needed, quota).into());
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
