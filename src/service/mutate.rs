use super::{conflicts, MissingIdPolicy, NewShift, ServiceOptions, ShiftError, ShiftPatch};
use crate::model::{Shift, ShiftCollection, ShiftId};
use crate::time;
use tracing::warn;

pub(super) fn add(
    shifts: &mut ShiftCollection,
    request: NewShift,
    opts: ServiceOptions,
) -> Result<Shift, ShiftError> {
    let employee = request
        .employee
        .filter(|e| !e.trim().is_empty())
        .ok_or(ShiftError::MissingField("employee"))?;
    let start = request.start.map(time::normalize).ok_or(ShiftError::MissingField("start"))?;
    let end = request.end.map(time::normalize).ok_or(ShiftError::MissingField("end"))?;

    if opts.reject_inverted_ranges && end <= start {
        return Err(ShiftError::InvalidTimeRange);
    }

    if let Some(existing) = conflicts::find_create_conflict(&*shifts, &employee, start, end) {
        warn!(%employee, conflicting = %existing.id, "rejecting overlapping shift");
        return Err(ShiftError::Conflict { employee });
    }

    let shift = Shift::new(employee, start, end);
    shifts.push(shift.clone());
    Ok(shift)
}

pub(super) fn update(
    shifts: &mut ShiftCollection,
    id: &ShiftId,
    patch: ShiftPatch,
    opts: ServiceOptions,
) -> Result<Shift, ShiftError> {
    let target = shifts.find(id).ok_or_else(|| ShiftError::NotFound(id.clone()))?;
    let start = patch.start.map(time::normalize);
    let end = patch.end.map(time::normalize);

    let new_start = start.unwrap_or(target.start);
    let new_end = end.unwrap_or(target.end);
    if opts.reject_inverted_ranges && !patch.is_empty() && new_end <= new_start {
        return Err(ShiftError::InvalidTimeRange);
    }

    if let Some(existing) =
        conflicts::find_update_conflict(&*shifts, target, start, end, opts.update_check)
    {
        warn!(
            employee = %target.employee,
            shift_id = %id,
            conflicting = %existing.id,
            "rejecting overlapping update"
        );
        return Err(ShiftError::UpdateConflict { employee: target.employee.clone() });
    }

    let shift = shifts.find_mut(id).ok_or_else(|| ShiftError::NotFound(id.clone()))?;
    shift.start = new_start;
    shift.end = new_end;
    Ok(shift.clone())
}

/// `Ok(None)` quand l'identifiant est inconnu et que la politique l'ignore.
pub(super) fn delete(
    shifts: &mut ShiftCollection,
    id: &ShiftId,
    opts: ServiceOptions,
) -> Result<Option<Shift>, ShiftError> {
    match shifts.position(id) {
        Some(index) => Ok(Some(shifts.remove(index))),
        None => match opts.missing_id_on_delete {
            MissingIdPolicy::Ignore => Ok(None),
            MissingIdPolicy::NotFound => Err(ShiftError::NotFound(id.clone())),
        },
    }
}
