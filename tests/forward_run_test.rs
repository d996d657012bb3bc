// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Forward runs of known champions.

mod common;

use common::*;

#[test]
fn test_champions() {
    for (encoding, steps, sigma) in [(BB2, 6, 4), (BB3, 21, 5), (BB2X3, 38, 9)] {
        let report = machine(encoding).run(None);
        assert!(report.halted, "{} should halt", encoding);
        assert_eq!(report.steps, steps, "{}", encoding);
        assert_eq!(report.sigma, sigma, "{}", encoding);
        assert_eq!(forward_states(encoding, 1000).len() as u64, steps);
    }
}

#[test]
fn test_report_json() {
    let report = machine(BB2).run(None);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["halted"], true);
    assert_eq!(json["steps"], 6);
    assert_eq!(json["sigma"], 4);
}

#[test]
fn test_runaway_is_cut_off() {
    let report = machine(RUNAWAY).run(Some(1000));
    assert!(!report.halted);
    assert_eq!(report.steps, 1000);
}
