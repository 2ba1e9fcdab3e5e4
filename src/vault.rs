//! Storage adapters for the document vault.
//!
//! All paths are vault-relative, `/`-separated. `""` and `"/"` both name the
//! vault root.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::VaultError;
use crate::path;

/// Display name of the vault root in folder listings.
pub const ROOT: &str = "/";

pub trait StorageAdapter {
    fn exists(&self, path: &str) -> bool;
    fn read(&self, path: &str) -> Result<String, VaultError>;
    /// Overwrite (or create) a file.
    fn write(&mut self, path: &str, text: &str) -> Result<(), VaultError>;
    /// Create a new file; fails with [`VaultError::AlreadyExists`] if present.
    fn create(&mut self, path: &str, text: &str) -> Result<(), VaultError>;
    fn create_dir_all(&mut self, path: &str) -> Result<(), VaultError>;
    /// Every visible folder, root first, then in path order.
    fn folders(&self) -> Result<Vec<String>, VaultError>;
}

/// Strip separators so a path can be used as a lookup key.
pub fn vault_key(p: &str) -> String {
    path::normalize(p.trim()).trim_start_matches('/').to_string()
}

/// Like [`vault_key`], but refuses `..` segments that would leave the vault.
pub fn checked_key(p: &str) -> Result<String, VaultError> {
    let key = vault_key(p);
    if key.split('/').any(|part| part == "..") {
        return Err(VaultError::OutsideVault(p.to_string()));
    }
    Ok(key)
}

fn parent_key(key: &str) -> String {
    let parsed = path::parse(key);
    vault_key(&parsed.dir)
}

fn is_hidden(key: &str) -> bool {
    key.split('/').any(|part| part.starts_with('.'))
}

/// Vault backed by a directory on disk.
#[derive(Clone, Debug)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, p: &str) -> Result<PathBuf, VaultError> {
        let key = checked_key(p)?;
        if key.is_empty() {
            Ok(self.root.clone())
        } else {
            Ok(self.root.join(key))
        }
    }

    fn collect_folders(&self, dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<(), VaultError> {
        let entries = fs::read_dir(dir).map_err(|e| VaultError::io(prefix, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| VaultError::io(prefix, e))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if is_dir && !name.starts_with('.') {
                names.push(name);
            }
        }
        names.sort();

        for name in names {
            let key = path::join([prefix, name.as_str()]);
            out.push(key.clone());
            self.collect_folders(&dir.join(&name), &key, out)?;
        }
        Ok(())
    }
}

impl StorageAdapter for FsVault {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.exists()).unwrap_or(false)
    }

    fn read(&self, path: &str) -> Result<String, VaultError> {
        fs::read_to_string(self.resolve(path)?).map_err(|e| VaultError::io(path, e))
    }

    fn write(&mut self, path: &str, text: &str) -> Result<(), VaultError> {
        fs::write(self.resolve(path)?, text).map_err(|e| VaultError::io(path, e))
    }

    fn create(&mut self, path: &str, text: &str) -> Result<(), VaultError> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.resolve(path)?)
            .map_err(|e| VaultError::io(path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| VaultError::io(path, e))
    }

    fn create_dir_all(&mut self, path: &str) -> Result<(), VaultError> {
        fs::create_dir_all(self.resolve(path)?).map_err(|e| VaultError::io(path, e))
    }

    fn folders(&self) -> Result<Vec<String>, VaultError> {
        let mut out = vec![ROOT.to_string()];
        self.collect_folders(&self.root, "", &mut out)?;
        Ok(out)
    }
}

/// In-memory vault. A file's parent folder must exist before it is created.
#[derive(Clone, Debug, Default)]
pub struct MemoryVault {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folders<I, S>(folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vault = Self::new();
        for folder in folders {
            vault.add_dir(&vault_key(folder.as_ref()));
        }
        vault
    }

    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(&vault_key(path)).map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn add_dir(&mut self, key: &str) {
        let mut current = String::new();
        for part in key.split('/').filter(|p| !p.is_empty()) {
            current = path::join([current.as_str(), part]);
            self.dirs.insert(current.clone());
        }
    }

    fn dir_exists(&self, key: &str) -> bool {
        key.is_empty() || self.dirs.contains(key)
    }
}

impl StorageAdapter for MemoryVault {
    fn exists(&self, path: &str) -> bool {
        let Ok(key) = checked_key(path) else {
            return false;
        };
        self.files.contains_key(&key) || self.dir_exists(&key)
    }

    fn read(&self, path: &str) -> Result<String, VaultError> {
        self.files
            .get(&checked_key(path)?)
            .cloned()
            .ok_or_else(|| VaultError::NotFound(path.to_string()))
    }

    fn write(&mut self, path: &str, text: &str) -> Result<(), VaultError> {
        let key = checked_key(path)?;
        if !self.dir_exists(&parent_key(&key)) {
            return Err(VaultError::NotFound(path.to_string()));
        }
        self.files.insert(key, text.to_string());
        Ok(())
    }

    fn create(&mut self, path: &str, text: &str) -> Result<(), VaultError> {
        if self.exists(path) {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        self.write(path, text)
    }

    fn create_dir_all(&mut self, path: &str) -> Result<(), VaultError> {
        let key = checked_key(path)?;
        if self.files.contains_key(&key) {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        self.add_dir(&key);
        Ok(())
    }

    fn folders(&self) -> Result<Vec<String>, VaultError> {
        let mut out = vec![ROOT.to_string()];
        out.extend(self.dirs.iter().filter(|d| !is_hidden(d)).cloned());
        Ok(out)
    }
}
