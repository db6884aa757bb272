#![forbid(unsafe_code)]
//! Creneau — moteur de gestion des créneaux de travail (sans BD).
//!
//! - Stockage fichier JSON, réécriture atomique de la collection complète.
//! - Détection de chevauchements par employé (bornes incluses).
//! - Filtrage par fenêtre et tri chronologique.
//! - Tout en UTC ; parsing RFC3339 ; affichage local en dehors de la lib.

#[cfg(feature = "csv")]
pub mod io;
pub mod model;
pub mod service;
pub mod storage;
pub mod time;

pub use model::{Shift, ShiftCollection, ShiftId};
pub use service::{
    ErrorKind, MissingIdPolicy, NewShift, ServiceOptions, ShiftError, ShiftPatch, ShiftQuery,
    ShiftService, UpdateCheck,
};
pub use storage::{JsonStorage, MemoryStorage, Storage, StorageError};
