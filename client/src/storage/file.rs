use super::TokenStore;
use crate::core::StorageError;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Token slots persisted as a JSON object on disk.
///
/// Plays the part browser local storage plays for the web dashboards: the
/// token survives restarts, and the next boot hydrates from it. On unix the
/// file is readable by its owner only.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Slots to start a write from. An unreadable file is discarded so a new
    /// login can replace it; the flag tells the caller the file must be rewritten.
    fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.load() {
            Ok(slots) => Ok((slots, false)),
            Err(StorageError::Corrupt(e)) => {
                warn!("Discarding unreadable token file: {}", e);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, slots: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if slots.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.write_private(&serde_json::to_string_pretty(slots)?)?;
        Ok(())
    }

    fn write_private(&self, contents: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        // mode() only applies on creation
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(contents.as_bytes())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(slot))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn put(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let (mut slots, _) = self.load_for_write()?;
        slots.insert(slot.to_string(), value.to_string());
        self.save(&slots)?;
        debug!("Token slot written");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        let (mut slots, discarded) = self.load_for_write()?;
        if slots.remove(slot).is_some() || discarded {
            self.save(&slots)?;
            debug!("Token slot cleared");
        }
        Ok(())
    }
}
