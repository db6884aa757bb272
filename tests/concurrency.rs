#![forbid(unsafe_code)]
use chrono::{Duration, TimeZone, Utc};
use creneau::{JsonStorage, NewShift, ShiftError, ShiftQuery, ShiftService, Storage};
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

#[test]
fn concurrent_adds_are_not_lost() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shifts.json");
    let service = Arc::new(ShiftService::new(JsonStorage::open(&path)));
    let base = Utc.with_ymd_and_hms(2021, 1, 1, 9, 0, 0).unwrap().fixed_offset();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for day in 0..10 {
                    let start = base + Duration::days(day);
                    let end = start + Duration::hours(8);
                    service
                        .add_shift(NewShift::new(format!("emp-{worker}"), start, end))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(service.list_shifts(&ShiftQuery::all()).unwrap().len(), 80);
    assert_eq!(JsonStorage::open(&path).load_all().unwrap().len(), 80);
}

#[test]
fn racing_identical_adds_admit_exactly_one() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("shifts.json"));
    let service = Arc::new(ShiftService::new(storage));
    let start = Utc.with_ymd_and_hms(2021, 1, 1, 9, 0, 0).unwrap().fixed_offset();
    let end = start + Duration::hours(8);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.add_shift(NewShift::new("alice", start, end)))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, ShiftError::Conflict { .. })));
    assert_eq!(service.snapshot().unwrap().len(), 1);
}

#[test]
fn readers_see_complete_collections_while_writing() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("shifts.json"));
    let service = Arc::new(ShiftService::new(storage));
    let base = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap().fixed_offset();

    let writer = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for hour in 0..40 {
                let start = base + Duration::hours(hour * 2);
                service
                    .add_shift(NewShift::new("alice", start, start + Duration::hours(1)))
                    .unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let mut last = 0;
                for _ in 0..50 {
                    let n = service.list_shifts(&ShiftQuery::all()).unwrap().len();
                    assert!(n >= last);
                    last = n;
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(service.snapshot().unwrap().len(), 40);
}
