//! Détection de conflits : fonctions pures, sans I/O.

use super::{util, UpdateCheck};
use crate::model::Shift;
use chrono::{DateTime, Utc};

pub use super::util::overlaps;

/// Premier créneau de `employee` qui chevauche `[start, end]`.
pub fn find_create_conflict<'a, I>(
    shifts: I,
    employee: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<&'a Shift>
where
    I: IntoIterator<Item = &'a Shift>,
{
    shifts
        .into_iter()
        .filter(|s| s.employee == employee)
        .find(|s| util::overlaps(start, end, s.start, s.end))
}

/// Premier autre créneau du même employé avec lequel le patch entre en conflit.
///
/// `target` est exclu de la comparaison : son ancien intervalle ne compte jamais
/// contre lui-même.
pub fn find_update_conflict<'a, I>(
    shifts: I,
    target: &Shift,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    check: UpdateCheck,
) -> Option<&'a Shift>
where
    I: IntoIterator<Item = &'a Shift>,
{
    if start.is_none() && end.is_none() {
        return None;
    }

    let mut others = shifts
        .into_iter()
        .filter(|s| s.id != target.id && s.employee == target.employee);

    match check {
        UpdateCheck::FullInterval => {
            let new_start = start.unwrap_or(target.start);
            let new_end = end.unwrap_or(target.end);
            others.find(|s| util::overlaps(new_start, new_end, s.start, s.end))
        }
        UpdateCheck::StartOrEnd => match (start, end) {
            (Some(new_start), _) => others.find(|s| util::contains(s.start, s.end, new_start)),
            (None, Some(new_end)) => others.find(|s| util::contains(s.start, s.end, new_end)),
            (None, None) => None,
        },
    }
}
