// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Property tests over randomly generated two-symbol machines.
//!
//! 1. **Reversal**: every non-halting transition appears exactly where the
//!    reverse search will look for it, and nowhere else
//! 2. **Encoding**: a machine displays as the text it was parsed from
//! 3. **Soundness and completeness**: the reverse search finds a witness
//!    below the depth cap exactly when a blank-tape run halts that soon, and
//!    the witness is that run

mod common;

use bb_reverse::config::SolverConfig;
use bb_reverse::engine::ReverseSolver;
use bb_reverse::machine::{Direction, ExitPoint, Machine, StateId, Symbol};
use bb_reverse::reverse::{Predecessor, ReversedMachine};
use common::encode;
use proptest::prelude::*;

const MAX_DEPTH: usize = 7;

fn arb_machine() -> impl Strategy<Value = String> {
    (2usize..=3)
        .prop_flat_map(|states| {
            (
                Just(states),
                prop::collection::vec((0u8..2, any::<bool>(), 0u8..3), 6),
                0..states * 2,
            )
        })
        .prop_map(|(states, slots, halt)| encode(states, &slots, halt))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn reversal_files_every_transition(encoding in arb_machine()) {
        let machine: Machine = encoding.parse().unwrap();
        let reversed = ReversedMachine::new(machine.clone());

        let mut moving = 0;
        for (state, symbol, transition) in machine.rules() {
            match transition.next {
                None => prop_assert_eq!(reversed.exits(), &[ExitPoint::new(state, symbol)]),
                Some(target) => {
                    moving += 1;
                    let arrivals = reversed.arrivals(target, transition.direction.opposite(), transition.write);
                    let expected = Predecessor { state, symbol };
                    prop_assert!(arrivals.contains(&expected));
                }
            }
        }

        let mut filed = 0;
        for target in 0..machine.state_count() {
            for direction in Direction::ALL {
                for written in Symbol::all(machine.symbol_count()) {
                    filed += reversed.arrivals(StateId::new(target as u8), direction, written).len();
                }
            }
        }
        prop_assert_eq!(filed, moving);
    }

    #[test]
    fn display_reproduces_encoding(encoding in arb_machine()) {
        let machine: Machine = encoding.parse().unwrap();
        prop_assert_eq!(machine.to_string(), encoding);
    }

    #[test]
    fn witness_is_the_forward_run(encoding in arb_machine()) {
        let machine: Machine = encoding.parse().unwrap();
        let report = machine.run(Some(MAX_DEPTH as u64 - 1));
        let history: Vec<StateId> = machine
            .history(Some(MAX_DEPTH as u64 - 1))
            .into_iter()
            .map(|(state, _)| state)
            .collect();

        let outcome = ReverseSolver::new(machine, SolverConfig::new(MAX_DEPTH))
            .unwrap()
            .search();

        prop_assert_eq!(outcome.success(), report.halted);
        if report.halted {
            prop_assert_eq!(outcome.depth(), Some(report.steps as usize));
            prop_assert_eq!(outcome.forward_chain().unwrap(), history);
        }
    }
}
