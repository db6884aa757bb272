use crate::model::ShiftId;
use crate::storage::StorageError;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Politique de contrôle de chevauchement lors d'une modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateCheck {
    /// L'intervalle fusionné `[start', end']` est comparé aux autres créneaux.
    #[default]
    FullInterval,
    /// Contrôle par champ : `start` s'il est fourni, sinon `end`.
    /// Compatible avec l'ancien comportement, qui peut laisser passer un
    /// intervalle englobant un autre créneau.
    StartOrEnd,
}

/// Que faire d'une suppression dont l'identifiant est inconnu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingIdPolicy {
    #[default]
    Ignore,
    NotFound,
}

/// Options du service
#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    pub update_check: UpdateCheck,
    pub missing_id_on_delete: MissingIdPolicy,
    /// Refuse `end <= start` à la création et après fusion d'un patch.
    pub reject_inverted_ranges: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            update_check: UpdateCheck::FullInterval,
            missing_id_on_delete: MissingIdPolicy::Ignore,
            reject_inverted_ranges: true,
        }
    }
}

/// Demande de création, champs déjà parsés mais pas encore validés.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewShift {
    pub employee: Option<String>,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

impl NewShift {
    pub fn new<E: Into<String>>(
        employee: E,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            employee: Some(employee.into()),
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Modification partielle : seuls `start` et `end` sont modifiables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftPatch {
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

impl ShiftPatch {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Catégorie d'erreur, pour la couche de présentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Storage,
}

#[derive(Error, Debug)]
pub enum ShiftError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid time range: end must be after start")]
    InvalidTimeRange,
    #[error("this shift overlaps with another on {employee}'s schedule")]
    Conflict { employee: String },
    #[error("these changes overlap with another shift on {employee}'s schedule")]
    UpdateConflict { employee: String },
    #[error("shift with id '{0}' could not be found")]
    NotFound(ShiftId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ShiftError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) | Self::InvalidTimeRange => ErrorKind::Validation,
            Self::Conflict { .. } | Self::UpdateConflict { .. } => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
