use chrono::{DateTime, Utc};

/// Chevauchement de deux intervalles fermés ; des bornes qui se touchent comptent.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

pub(super) fn contains(start: DateTime<Utc>, end: DateTime<Utc>, instant: DateTime<Utc>) -> bool {
    start <= instant && instant <= end
}
