// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Forward simulation from the blank tape.
//!
//! Used to cross-check what the backward search finds: a witness chain read
//! in forward order must match the states a blank-tape run visits.

use super::{ExitPoint, Machine, StateId, Symbol};
use crate::tape::Tape;
use serde::Serialize;
use tracing::info;

/// Summary of one forward run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub halted: bool,
    /// Steps executed; the halting transition counts as a step.
    pub steps: u64,
    /// The halting transition taken, if the machine halted.
    pub exit: Option<ExitPoint>,
    /// The state the machine is in when the run stopped, `None` once halted.
    pub final_state: Option<StateId>,
    /// Non-blank cells on the final tape.
    pub sigma: usize,
    /// Cells visited.
    pub width: usize,
}

impl Machine {
    /// Run from the blank tape in the start state until halting or `limit`
    /// steps (`None` runs unbounded).
    pub fn run(&self, limit: Option<u64>) -> RunReport {
        self.run_with(limit, |_, _| {})
    }

    /// The `(state, symbol read)` pair of every step of a blank-tape run.
    pub fn history(&self, limit: Option<u64>) -> Vec<(StateId, Symbol)> {
        let mut steps = Vec::new();
        self.run_with(limit, |state, read| steps.push((state, read)));
        steps
    }

    fn run_with(&self, limit: Option<u64>, mut on_step: impl FnMut(StateId, Symbol)) -> RunReport {
        let mut tape = Tape::blank();
        let mut state = Some(self.start_state());
        let mut exit = None;
        let mut steps = 0u64;

        while let Some(current) = state {
            if limit.is_some_and(|limit| steps >= limit) {
                break;
            }
            let read = tape.read_head();
            on_step(current, read);
            steps += 1;

            let transition = self.transition(current, read);
            tape.write_head(transition.write);
            tape.move_head(transition.direction);
            if transition.is_halt() {
                exit = Some(ExitPoint::new(current, read));
            }
            state = transition.next;
        }

        let report = RunReport {
            halted: state.is_none(),
            steps,
            exit,
            final_state: state,
            sigma: tape.non_blank_count(),
            width: tape.width(),
        };
        info!(
            halted = report.halted,
            steps = report.steps,
            sigma = report.sigma,
            width = report.width,
            "Forward run finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_bb2_halts_in_six() {
        let tm = Machine::from_str("1RB1LB_1LA1RZ").unwrap();
        let report = tm.run(None);
        assert!(report.halted);
        assert_eq!(report.steps, 6);
        assert_eq!(report.sigma, 4);
        assert_eq!(report.exit, Some(ExitPoint::new(StateId::new(1), Symbol::new(1))));
        assert_eq!(report.final_state, None);
    }

    #[test]
    fn test_history_matches_steps() {
        let tm = Machine::from_str("1RB1LB_1LA1RZ").unwrap();
        let states: Vec<char> = tm.history(None).iter().map(|(s, _)| s.to_char()).collect();
        assert_eq!(states, vec!['A', 'B', 'A', 'B', 'A', 'B']);
        assert_eq!(tm.history(None).last(), Some(&(StateId::new(1), Symbol::new(1))));
    }

    #[test]
    fn test_step_limit() {
        // Walks right forever.
        let tm = Machine::from_str("1RA1RZ").unwrap();
        let report = tm.run(Some(50));
        assert!(!report.halted);
        assert_eq!(report.steps, 50);
        assert_eq!(report.sigma, 50);
        assert_eq!(report.final_state, Some(StateId::START));
        assert_eq!(report.exit, None);
    }

    #[test]
    fn test_bb3() {
        // BB(3,2) champion: 21 steps, 5 ones.
        let tm = Machine::from_str("1RB1RZ_1LB0RC_1LC1LA").unwrap();
        let report = tm.run(None);
        assert!(report.halted);
        assert_eq!(report.steps, 21);
        assert_eq!(report.sigma, 5);
    }
}
