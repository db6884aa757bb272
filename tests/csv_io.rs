#![forbid(unsafe_code)]
use chrono::{Duration, TimeZone, Utc};
use creneau::io::{export_shifts_csv, export_shifts_json, import_shifts_csv};
use creneau::time::{format_utc, parse_instant};
use creneau::{MemoryStorage, Shift, ShiftId, ShiftQuery, ShiftService};
use std::fs;
use tempfile::tempdir;

#[test]
fn import_accepts_mixed_timestamp_formats() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("in.csv");
    fs::write(
        &path,
        "employee,start,end\n\
         alice,2021-01-01T09:00Z,2021-01-01T17:00:00Z\n\
         bob , 2021-01-01T11:00+02:00 , 2021-01-01 19:00\n",
    )
    .unwrap();

    let rows = import_shifts_csv(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].employee.as_deref(), Some("bob"));
    assert_eq!(rows[1].start, Some(parse_instant("2021-01-01T09:00Z").unwrap()));

    let service = ShiftService::new(MemoryStorage::new());
    service.import_shifts(rows).unwrap();
    assert_eq!(service.list_shifts(&ShiftQuery::all()).unwrap().len(), 2);
}

#[test]
fn import_rejects_rows_without_employee() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("in.csv");
    fs::write(&path, "employee,start,end\n,2021-01-01T09:00Z,2021-01-01T17:00Z\n").unwrap();
    let err = import_shifts_csv(&path).unwrap_err();
    assert!(err.to_string().contains("empty employee"), "{err:#}");
}

#[test]
fn import_reports_bad_timestamps() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("in.csv");
    fs::write(&path, "employee,start,end\nalice,tomorrow,2021-01-01T17:00Z\n").unwrap();
    let err = import_shifts_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("invalid date/datetime: tomorrow"), "{err:#}");
}

#[test]
fn export_csv_uses_utc_rfc3339() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let shifts = vec![
        Shift {
            id: ShiftId::new("s-1"),
            employee: "alice".into(),
            start: Utc.with_ymd_and_hms(2021, 1, 1, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2021, 1, 1, 17, 0, 0).unwrap(),
        },
        Shift {
            id: ShiftId::new("s-2"),
            employee: "bob".into(),
            start: Utc.with_ymd_and_hms(2021, 1, 2, 22, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2021, 1, 3, 6, 0, 0).unwrap(),
        },
    ];
    export_shifts_csv(&path, &shifts).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(content.trim_end(), @r"
    id,employee,start,end
    s-1,alice,2021-01-01T09:00:00Z,2021-01-01T17:00:00Z
    s-2,bob,2021-01-02T22:00:00Z,2021-01-03T06:00:00Z
    ");
}

#[test]
fn export_json_is_loadable_as_shifts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.json");
    let shifts = vec![Shift::new(
        "alice",
        Utc.with_ymd_and_hms(2021, 1, 1, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2021, 1, 1, 17, 0, 0).unwrap(),
    )];
    export_shifts_json(&path, &shifts).unwrap();
    let back: Vec<Shift> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, shifts);
}

#[test]
fn export_csv_keeps_fractional_seconds() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let start = Utc.with_ymd_and_hms(2021, 1, 1, 9, 0, 0).unwrap() + Duration::milliseconds(500);
    let shifts = vec![Shift {
        id: ShiftId::new("s-1"),
        employee: "alice".into(),
        start,
        end: Utc.with_ymd_and_hms(2021, 1, 1, 17, 0, 0).unwrap(),
    }];
    export_shifts_csv(&path, &shifts).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(",alice,2021-01-01T09:00:00.500Z,2021-01-01T17:00:00Z"), "{content}");
    assert_eq!(format_utc(start), "2021-01-01T09:00:00.500Z");
}
