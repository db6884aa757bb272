use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour Shift (forme texte d'un UUID v4)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Créneau de travail d'un employé, intervalle fermé `[start, end]` en UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub employee: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Shift {
    /// Nouveau créneau avec un identifiant frais. Aucune vérification ici :
    /// les règles vivent dans le service.
    pub fn new<E: Into<String>>(employee: E, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: ShiftId::random(),
            employee: employee.into(),
            start,
            end,
        }
    }
}

/// Collection complète des créneaux, unité de persistance.
///
/// Sérialisée comme un simple tableau JSON, dans l'ordre d'insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftCollection {
    shifts: Vec<Shift>,
}

impl ShiftCollection {
    pub fn new(shifts: Vec<Shift>) -> Self {
        Self { shifts }
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn find(&self, id: &ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }
    pub fn find_mut(&mut self, id: &ShiftId) -> Option<&mut Shift> {
        self.shifts.iter_mut().find(|s| &s.id == id)
    }
    pub fn position(&self, id: &ShiftId) -> Option<usize> {
        self.shifts.iter().position(|s| &s.id == id)
    }

    pub fn push(&mut self, shift: Shift) {
        self.shifts.push(shift);
    }
    pub fn remove(&mut self, index: usize) -> Shift {
        self.shifts.remove(index)
    }
}

impl<'a> IntoIterator for &'a ShiftCollection {
    type Item = &'a Shift;
    type IntoIter = std::slice::Iter<'a, Shift>;

    fn into_iter(self) -> Self::IntoIter {
        self.shifts.iter()
    }
}
