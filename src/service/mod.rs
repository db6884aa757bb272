pub mod conflicts;
mod mutate;
pub mod query;
mod types;
mod util;

pub use query::ShiftQuery;
pub use types::{
    ErrorKind, MissingIdPolicy, NewShift, ServiceOptions, ShiftError, ShiftPatch, UpdateCheck,
};

use crate::model::{Shift, ShiftCollection, ShiftId};
use crate::storage::Storage;
use parking_lot::RwLock;
use tracing::{debug, info};

/// Service de créneaux : orchestre stockage, détection de conflits et filtrage.
///
/// Le stockage est détenu derrière un `RwLock`. Chaque mutation prend le verrou
/// exclusif autour de chargement → contrôle → persistance ; les lectures
/// partagent le verrou et voient toujours une collection complètement écrite.
#[derive(Debug)]
pub struct ShiftService<S: Storage> {
    storage: RwLock<S>,
    opts: ServiceOptions,
}

impl<S: Storage> ShiftService<S> {
    pub fn new(storage: S) -> Self {
        Self::with_options(storage, ServiceOptions::default())
    }

    pub fn with_options(storage: S, opts: ServiceOptions) -> Self {
        Self { storage: RwLock::new(storage), opts }
    }

    /// Collection complète, dans l'ordre persisté.
    pub fn snapshot(&self) -> Result<ShiftCollection, ShiftError> {
        let storage = self.storage.read();
        Ok(storage.load_all()?)
    }

    pub fn list_shifts(&self, query: &ShiftQuery) -> Result<Vec<Shift>, ShiftError> {
        let shifts = self.snapshot()?;
        Ok(query.apply(&shifts))
    }

    pub fn get_shift(&self, id: &ShiftId) -> Result<Shift, ShiftError> {
        let shifts = self.snapshot()?;
        shifts
            .find(id)
            .cloned()
            .ok_or_else(|| ShiftError::NotFound(id.clone()))
    }

    pub fn add_shift(&self, request: NewShift) -> Result<Shift, ShiftError> {
        let storage = self.storage.write();
        let mut shifts = storage.load_all()?;
        let shift = mutate::add(&mut shifts, request, self.opts)?;
        storage.replace_all(&shifts)?;
        info!(shift_id = %shift.id, employee = %shift.employee, "shift added");
        Ok(shift)
    }

    /// Ajoute un lot de créneaux : tout ou rien, une seule persistance.
    ///
    /// Chaque ligne est contrôlée contre la collection existante et contre les
    /// lignes précédentes du lot.
    pub fn import_shifts(&self, requests: Vec<NewShift>) -> Result<Vec<Shift>, ShiftError> {
        let storage = self.storage.write();
        let mut shifts = storage.load_all()?;
        let added = requests
            .into_iter()
            .map(|request| mutate::add(&mut shifts, request, self.opts))
            .collect::<Result<Vec<_>, _>>()?;
        if added.is_empty() {
            return Ok(added);
        }
        storage.replace_all(&shifts)?;
        info!(count = added.len(), "shifts imported");
        Ok(added)
    }

    pub fn update_shift(&self, id: &ShiftId, patch: ShiftPatch) -> Result<Shift, ShiftError> {
        let storage = self.storage.write();
        let mut shifts = storage.load_all()?;
        let shift = mutate::update(&mut shifts, id, patch, self.opts)?;
        storage.replace_all(&shifts)?;
        info!(shift_id = %shift.id, employee = %shift.employee, "shift updated");
        Ok(shift)
    }

    pub fn delete_shift(&self, id: &ShiftId) -> Result<(), ShiftError> {
        let storage = self.storage.write();
        let mut shifts = storage.load_all()?;
        match mutate::delete(&mut shifts, id, self.opts)? {
            Some(removed) => {
                storage.replace_all(&shifts)?;
                info!(shift_id = %removed.id, employee = %removed.employee, "shift deleted");
            }
            None => debug!(shift_id = %id, "delete of unknown shift ignored"),
        }
        Ok(())
    }
}
