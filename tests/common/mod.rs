// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use bb_reverse::config::SolverConfig;
use bb_reverse::engine::{ReverseSolver, SearchOutcome};
use bb_reverse::machine::{Machine, StateId};

/// BB(2,2) champion: halts after 6 steps.
pub const BB2: &str = "1RB1LB_1LA1RZ";

/// BB(3,2) step champion: halts after 21 steps.
pub const BB3: &str = "1RB1RZ_1LB0RC_1LC1LA";

/// BB(2,3) champion: halts after 38 steps.
pub const BB2X3: &str = "1RB2LB1RZ_2LA2RB1LB";

/// Never halts, but has a halting transition to search back from.
pub const RUNAWAY: &str = "1RA1RZ";

pub fn machine(encoding: &str) -> Machine {
    encoding.parse().unwrap()
}

pub fn solve(encoding: &str, max_depth: usize) -> SearchOutcome {
    ReverseSolver::new(machine(encoding), SolverConfig::new(max_depth))
        .unwrap()
        .search()
}

pub fn letters(chain: &[StateId]) -> String {
    chain.iter().map(|s| s.to_char()).collect()
}

/// States visited by a blank-tape run, first step first.
pub fn forward_states(encoding: &str, limit: u64) -> Vec<StateId> {
    machine(encoding)
        .history(Some(limit))
        .into_iter()
        .map(|(state, _)| state)
        .collect()
}

/// Build a two-symbol encoding from `(write, right, target)` triples, with
/// `halt` naming the one slot that halts. `target` is reduced modulo the
/// state count.
pub fn encode(states: usize, slots: &[(u8, bool, u8)], halt: usize) -> String {
    let blocks: Vec<String> = (0..states)
        .map(|state| {
            (0..2)
                .map(|symbol| {
                    let index = state * 2 + symbol;
                    if index == halt {
                        "1RZ".to_string()
                    } else {
                        let (write, right, target) = slots[index];
                        format!(
                            "{}{}{}",
                            write % 2,
                            if right { 'R' } else { 'L' },
                            (b'A' + target % states as u8) as char
                        )
                    }
                })
                .collect()
        })
        .collect();
    blocks.join("_")
}
