use crate::model::Shift;
use crate::time;
use chrono::{DateTime, TimeZone, Utc};

/// Fenêtre de consultation ; chaque borne est facultative.
///
/// Un créneau est retenu s'il intersecte la fenêtre (bornes incluses), pas
/// seulement s'il y est contenu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ShiftQuery {
    pub fn new<Tz: TimeZone>(start: Option<DateTime<Tz>>, end: Option<DateTime<Tz>>) -> Self {
        Self {
            start: start.map(time::normalize),
            end: end.map(time::normalize),
        }
    }

    /// Aucune borne : tout est retenu.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, shift: &Shift) -> bool {
        self.start.map_or(true, |bound| shift.end >= bound)
            && self.end.map_or(true, |bound| shift.start <= bound)
    }

    /// Filtre puis trie par `start`, puis `end` à égalité.
    pub fn apply<'a, I>(&self, shifts: I) -> Vec<Shift>
    where
        I: IntoIterator<Item = &'a Shift>,
    {
        let mut out: Vec<Shift> = shifts
            .into_iter()
            .filter(|s| self.matches(s))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        out
    }
}
