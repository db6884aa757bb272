//! Normalisation des instants : tout ce qui entre dans le moteur passe en UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date/datetime: {0}")]
pub struct ParseInstantError(pub String);

/// Ramène un instant, quel que soit son fuseau, en UTC.
pub fn normalize<Tz: TimeZone>(instant: DateTime<Tz>) -> DateTime<Utc> {
    instant.with_timezone(&Utc)
}

/// Affichage CLI et CSV : RFC 3339, suffixe `Z`, fractions de seconde conservées.
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse un instant saisi côté glue (CLI, CSV).
///
/// Formats acceptés, dans l'ordre :
/// - RFC 3339 (`2021-01-01T09:00:00+02:00`, `2021-01-01T09:00:00Z`)
/// - précision minute avec décalage (`2021-01-01T09:00Z`, `2021-01-01T09:00+02:00`)
/// - date-heure sans fuseau (`2021-01-01T09:00[:00]`), lue en UTC
/// - date seule (`2021-01-01`), minuit UTC
pub fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>, ParseInstantError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    if let Some(naive) = raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M") {
            return Ok(utc_offset(dt));
        }
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Ok(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(utc_offset(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(utc_offset(midnight));
        }
    }
    Err(ParseInstantError(raw.to_string()))
}

fn utc_offset(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).fixed_offset()
}
