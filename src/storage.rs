use crate::model::ShiftCollection;
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("reading {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("writing {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("parsing {}: {source}", .path.display())]
    Decode { path: PathBuf, source: serde_json::Error },
    #[error("encoding shift collection: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("atomic rename to {}: {source}", .path.display())]
    Persist { path: PathBuf, source: io::Error },
}

pub trait Storage: Send + Sync {
    /// Charge la collection complète, dans l'ordre persisté.
    fn load_all(&self) -> Result<ShiftCollection, StorageError>;
    /// Remplace la collection complète de manière atomique.
    fn replace_all(&self, shifts: &ShiftCollection) -> Result<(), StorageError>;
}

/// Fichier JSON unique contenant le tableau des créneaux.
#[derive(Debug)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl Storage for JsonStorage {
    fn load_all(&self) -> Result<ShiftCollection, StorageError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            // installation neuve : pas encore de fichier
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no shift file yet, starting empty");
                return Ok(ShiftCollection::default());
            }
            Err(source) => return Err(StorageError::Read { path: self.path.clone(), source }),
        };
        let shifts: ShiftCollection = serde_json::from_slice(&data)
            .map_err(|source| StorageError::Decode { path: self.path.clone(), source })?;
        debug!(path = %self.path.display(), count = shifts.len(), "loaded shifts");
        Ok(shifts)
    }

    fn replace_all(&self, shifts: &ShiftCollection) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(shifts).map_err(StorageError::Encode)?;
        let dir = self.dir();
        let write_err = |source| StorageError::Write { path: self.path.clone(), source };

        fs::create_dir_all(dir).map_err(write_err)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&json).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::Persist { path: self.path.clone(), source: e.error })?;
        debug!(path = %self.path.display(), count = shifts.len(), "persisted shifts");
        Ok(())
    }
}

/// Stockage en mémoire : garde la forme sérialisée et compte les sauvegardes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    bytes: Mutex<Vec<u8>>,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shifts(shifts: &ShiftCollection) -> Result<Self, StorageError> {
        let bytes = serde_json::to_vec_pretty(shifts).map_err(StorageError::Encode)?;
        Ok(Self { bytes: Mutex::new(bytes), saves: AtomicUsize::new(0) })
    }

    /// Contenu brut tel qu'il serait écrit sur disque.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.lock().clone()
    }

    /// Nombre d'appels réussis à `replace_all`.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Storage for MemoryStorage {
    fn load_all(&self) -> Result<ShiftCollection, StorageError> {
        let bytes = self.bytes.lock();
        if bytes.is_empty() {
            return Ok(ShiftCollection::default());
        }
        serde_json::from_slice(&bytes)
            .map_err(|source| StorageError::Decode { path: PathBuf::from(":memory:"), source })
    }

    fn replace_all(&self, shifts: &ShiftCollection) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(shifts).map_err(StorageError::Encode)?;
        *self.bytes.lock() = json;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Permet de partager un même stockage entre le service et son appelant.
impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn load_all(&self) -> Result<ShiftCollection, StorageError> {
        (**self).load_all()
    }
    fn replace_all(&self, shifts: &ShiftCollection) -> Result<(), StorageError> {
        (**self).replace_all(shifts)
    }
}
