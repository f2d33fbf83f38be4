use std::fs;
use std::path::PathBuf;

use chrono::Local;
use rust_decimal_macros::dec;
use serial_test::serial;

use crate::functions::{movements, reconcile};
use crate::parsing::parse_shares;
use crate::report::render;
use crate::structs::{ChangeKind, Holding, HoldingId, HoldingSet, SnapshotManager};

fn test_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(".data_test").join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn holding(code: &str, name: &str, shares: &str, weight: Option<rust_decimal::Decimal>) -> Holding {
    Holding {
        id: HoldingId::new(code),
        name: name.to_string(),
        shares: parse_shares(shares),
        weight,
    }
}

/* Two consecutive days against one snapshot store, the way main runs
it: store day one, load it back the next day, diff, render, store
again. */
#[test]
#[serial]
fn two_day_cycle_produces_the_expected_movements() {
    let dir = test_dir("daily_cycle");
    let manager = SnapshotManager::new(&dir, "fund");

    // Day 1: nothing stored yet, everything is a new position.
    let day_one: HoldingSet = vec![
        holding("2330", "TSMC", "2,500,000", Some(dec!(47.2))),
        holding("0050", "Yuanta Taiwan 50", "1,000", Some(dec!(1.1))),
    ]
    .into_iter()
    .collect();

    let previous = manager.load_previous();
    assert!(previous.is_none());

    let changes = reconcile(&day_one, previous.as_ref());
    assert!(changes.iter().all(|c| c.kind == ChangeKind::New));

    let html = render("Test Fund", &day_one, &changes, Local::now());
    fs::write(dir.join("fund.html"), &html).unwrap();
    manager.store_current(&day_one).unwrap();

    // Day 2: TSMC added to, 0050 closed out, 2881 entered.
    let day_two: HoldingSet = vec![
        holding("2330", "TSMC", "2,600,000", Some(dec!(48.0))),
        holding("2881", "Fubon FHC", "800", Some(dec!(0.9))),
    ]
    .into_iter()
    .collect();

    let previous = manager.load_previous().unwrap();
    assert_eq!(previous.len(), 2);

    let changes = reconcile(&day_two, Some(&previous));
    let moved = movements(&changes);
    let kinds: Vec<ChangeKind> = moved.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ChangeKind::New, ChangeKind::Increased, ChangeKind::Exited]
    );

    let exited = moved.iter().find(|c| c.kind == ChangeKind::Exited).unwrap();
    assert_eq!(exited.id, HoldingId::new("0050"));
    assert_eq!(exited.name, "Yuanta Taiwan 50");
    assert_eq!(exited.delta, dec!(-1000));

    let increased = moved
        .iter()
        .find(|c| c.kind == ChangeKind::Increased)
        .unwrap();
    assert_eq!(increased.delta, dec!(100000));

    let html = render("Test Fund", &day_two, &changes, Local::now());
    assert!(html.contains("Fubon FHC"));
    assert!(html.contains("Yuanta Taiwan 50"));

    manager.store_current(&day_two).unwrap();

    // Day 1's file went to the archive, not into the void.
    assert_eq!(fs::read_dir(dir.join("fund")).unwrap().count(), 1);
}

/* Re-running against an unchanged source must diff quiet, not spray
new/exited noise. */
#[test]
#[serial]
fn immediate_rerun_is_all_unchanged() {
    let dir = test_dir("daily_rerun");
    let manager = SnapshotManager::new(&dir, "fund");

    let holdings: HoldingSet = vec![
        holding("2330", "TSMC", "2,500,000", Some(dec!(47.2))),
        holding("0050", "Yuanta Taiwan 50", "1,000", Some(dec!(1.1))),
    ]
    .into_iter()
    .collect();

    manager.store_current(&holdings).unwrap();

    let previous = manager.load_previous().unwrap();
    let changes = reconcile(&holdings, Some(&previous));

    assert_eq!(changes.len(), 2);
    assert!(changes.iter().all(|c| c.kind == ChangeKind::Unchanged));
    assert!(movements(&changes).is_empty());
}
