// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Depth-bounded backward search from a machine's halting transition.
//!
//! The solver walks the [`ReversedMachine`] from the halting `(state, symbol)`
//! pair toward the start state, looking for a chain of predecessors that ends
//! in the start state on a tape that could be blank.
//!
//! # Architecture
//!
//! The search is depth-first over an explicit stack. Each stack entry is a
//! [`Frame`] for one state on the chain and tracks:
//! - The state and the tape symbol its entry overwrote
//! - Which side of the head is being expanded
//! - The next candidate predecessor on that side
//!
//! Entering a state (`enter`) runs these steps in order:
//! 1. Consult the pruner when the chain length is a multiple of
//!    `prune_interval`; a rejected branch changes nothing
//! 2. Push the state and write its symbol under the head
//! 3. Goal test: start state on a clean tape ends the search
//! 4. Below the depth cap, push a frame that opens the left side
//! 5. At the depth cap, record a bounded chain and undo step 2
//!
//! The main loop feeds each frame's candidates to `enter`. When the left side
//! runs dry the head move is undone and the right side opened; when the
//! right side runs dry the frame is popped and its write undone. On success
//! nothing is undone, so [`ReverseSolver::context`] still shows the witness.
//!
//! # Example
//!
//! ```
//! use bb_reverse::config::SolverConfig;
//! use bb_reverse::engine::ReverseSolver;
//! use bb_reverse::machine::Machine;
//!
//! let machine: Machine = "1RB1LB_1LA1RZ".parse().unwrap();
//! let mut solver = ReverseSolver::new(machine, SolverConfig::new(10)).unwrap();
//! let outcome = solver.search();
//! assert!(outcome.success());
//! assert_eq!(outcome.depth(), Some(6));
//! ```

pub mod outcome;
pub mod pruner;

pub use outcome::{SearchOutcome, SearchStatus};
pub use pruner::{NeverPrune, PruneFn, Pruner};

use crate::config::SolverConfig;
use crate::context::SearchContext;
use crate::error::SolverError;
use crate::machine::{Direction, ExitPoint, Machine, StateId, Symbol};
use crate::reverse::{Predecessor, ReversedMachine};
use crate::state::{Counters, Statistics};
use crate::tape::Tape;
use crate::trie::ResultTrie;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Candidate predecessors on one side of the head.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    direction: Direction,
    /// Symbol the predecessor must have written.
    symbol: u8,
    /// Last symbol to try, inclusive.
    last: u8,
    /// Next index into the arrival list for `symbol`.
    index: usize,
}

impl Cursor {
    /// Move the head to `direction` and enumerate what may have been written
    /// there: the cell's symbol if it is defined, otherwise every symbol.
    fn open(tape: &mut Tape, direction: Direction, symbol_count: usize) -> Self {
        let read = tape.move_head(direction);
        let (symbol, last) = if read.is_undefined() {
            (0, (symbol_count - 1) as u8)
        } else {
            (read.value(), read.value())
        };
        Self {
            direction,
            symbol,
            last,
            index: 0,
        }
    }

    fn next(&mut self, reversed: &ReversedMachine, state: StateId) -> Option<Predecessor> {
        while self.symbol <= self.last {
            let arrivals = reversed.arrivals(state, self.direction, Symbol::new(self.symbol));
            if let Some(&predecessor) = arrivals.get(self.index) {
                self.index += 1;
                return Some(predecessor);
            }
            self.symbol += 1;
            self.index = 0;
        }
        None
    }
}

/// Stack entry for a state being expanded.
#[derive(Debug)]
struct Frame {
    state: StateId,
    /// Tape symbol overwritten when this state was entered.
    old: Symbol,
    cursor: Cursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entered {
    Witness,
    Expanding,
    Closed,
}

pub struct ReverseSolver {
    ctx: SearchContext,
    config: SolverConfig,
    exit: ExitPoint,
    pruner: Box<dyn Pruner>,
    stack: Vec<Frame>,
    statistics: Statistics,
    trie: Option<ResultTrie>,
}

impl ReverseSolver {
    /// Reverse `machine` and pick the halting transition to search from.
    ///
    /// # Errors
    ///
    /// - [`SolverError::NotHalting`] if `config.exit` names a transition
    ///   that does not halt
    /// - [`SolverError::AmbiguousHalt`] if `config.exit` is unset and the
    ///   machine has more than one halting transition
    pub fn new(machine: Machine, config: SolverConfig) -> Result<Self, SolverError> {
        let reversed = ReversedMachine::new(machine);
        let exit = match config.exit {
            Some(exit) if reversed.exits().contains(&exit) => exit,
            Some(exit) => return Err(SolverError::NotHalting { exit }),
            None => reversed.unique_exit().ok_or(SolverError::AmbiguousHalt {
                count: reversed.exits().len(),
            })?,
        };

        Ok(Self {
            ctx: SearchContext::new(reversed),
            config,
            exit,
            pruner: Box::new(NeverPrune),
            stack: Vec::new(),
            statistics: Statistics::new(),
            trie: None,
        })
    }

    /// Replace the default [`NeverPrune`] hook.
    pub fn with_pruner(mut self, pruner: impl Pruner + 'static) -> Self {
        self.pruner = Box::new(pruner);
        self
    }

    pub fn exit(&self) -> ExitPoint {
        self.exit
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The tape and chain as the last search left them: the witness after a
    /// success, the reset state after an exhausted search.
    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    /// Run one search from a fresh tape. May be called again; each call
    /// starts over.
    pub fn search(&mut self) -> SearchOutcome {
        self.ctx.reset();
        self.stack.clear();
        self.statistics = Statistics::new();
        self.trie = self.config.record_chains.then(ResultTrie::new);

        info!(
            machine = %self.ctx.machine(),
            exit = %self.exit,
            max_depth = self.config.max_depth,
            pruner = self.pruner.name(),
            "Starting reverse search"
        );
        let started = Instant::now();
        let found = self.run();
        let elapsed = started.elapsed();

        let status = if found {
            SearchStatus::Witness {
                chain: self.ctx.chain.clone(),
            }
        } else {
            SearchStatus::Exhausted
        };
        let outcome = SearchOutcome::new(status, elapsed, self.trie.take(), self.statistics.clone());
        info!(
            success = outcome.success(),
            results = outcome.result_count,
            bounded = outcome.bounded,
            frames = self.statistics.get(Counters::Frames),
            ?elapsed,
            "Reverse search finished"
        );
        outcome
    }

    fn run(&mut self) -> bool {
        let symbol_count = self.ctx.reversed.symbol_count();
        match self.enter(self.exit.state, self.exit.symbol) {
            Entered::Witness => return true,
            Entered::Closed => return false,
            Entered::Expanding => {}
        }

        while let Some(frame) = self.stack.last_mut() {
            match frame.cursor.next(&self.ctx.reversed, frame.state) {
                Some(predecessor) => {
                    if self.enter(predecessor.state, predecessor.symbol) == Entered::Witness {
                        return true;
                    }
                }
                None => {
                    self.ctx.tape.undo_move(frame.cursor.direction);
                    match frame.cursor.direction {
                        Direction::Left => {
                            frame.cursor = Cursor::open(&mut self.ctx.tape, Direction::Right, symbol_count);
                        }
                        Direction::Right => {
                            let old = frame.old;
                            self.stack.pop();
                            self.ctx.leave(old);
                            self.statistics.increment(Counters::Backtracks);
                        }
                    }
                }
            }
        }
        false
    }

    fn enter(&mut self, state: StateId, symbol: Symbol) -> Entered {
        let interval = self.config.prune_interval;
        if interval > 0 && self.ctx.depth() % interval == 0 {
            self.statistics.increment(Counters::PruneChecks);
            if self.pruner.is_impossible(&self.ctx.tape, &self.ctx.chain) {
                self.statistics.increment(Counters::Pruned);
                trace!(depth = self.ctx.depth(), next = %state, "Pruned");
                return Entered::Closed;
            }
        }

        self.statistics.increment(Counters::Frames);
        let old = self.ctx.enter(state, symbol);

        if self.ctx.at_start() {
            self.statistics.increment(Counters::Witnesses);
            self.record();
            debug!("Start found at a depth of {}", self.ctx.depth());
            return Entered::Witness;
        }

        if self.ctx.depth() < self.config.max_depth.saturating_sub(1) {
            let cursor = Cursor::open(&mut self.ctx.tape, Direction::Left, self.ctx.reversed.symbol_count());
            self.stack.push(Frame { state, old, cursor });
            Entered::Expanding
        } else {
            self.statistics.increment(Counters::BoundedChains);
            self.record();
            self.ctx.leave(old);
            self.statistics.increment(Counters::Backtracks);
            Entered::Closed
        }
    }

    fn record(&mut self) {
        if let Some(trie) = self.trie.as_mut() {
            trie.add_result(&self.ctx.chain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const BB2: &str = "1RB1LB_1LA1RZ";

    fn solver(encoding: &str, max_depth: usize) -> ReverseSolver {
        ReverseSolver::new(encoding.parse().unwrap(), SolverConfig::new(max_depth)).unwrap()
    }

    fn letters(chain: &[StateId]) -> String {
        chain.iter().map(|s| s.to_char()).collect()
    }

    #[test]
    fn test_bb2_witness() {
        let mut solver = solver(BB2, 7);
        let outcome = solver.search();
        assert!(outcome.success());
        assert_eq!(letters(outcome.chain().unwrap()), "BABABA");
        assert_eq!(outcome.result_count, 1);
        assert_eq!(outcome.bounded, 0);
        assert_eq!(outcome.statistics.get(Counters::Frames), 6);
        assert_eq!(outcome.trie.unwrap().to_string(), "1|-1B1A1B1A1B1A");
    }

    #[test]
    fn test_context_keeps_witness() {
        let mut solver = solver(BB2, 7);
        solver.search();
        let ctx = solver.context();
        assert_eq!(letters(&ctx.chain), "BABABA");
        assert!(ctx.at_start());
    }

    #[test]
    fn test_depth_cap_one_below_witness() {
        let mut solver = solver(BB2, 6);
        let outcome = solver.search();
        assert!(!outcome.success());
        assert_eq!(outcome.bounded, 2);
        assert_eq!(outcome.result_count, 2);
        assert_eq!(outcome.trie.unwrap().to_string(), "2|-1B1A1B1A1B");
        assert!(solver.context().is_reset());
    }

    #[test]
    fn test_tiny_depths() {
        for max_depth in [0, 1, 2] {
            let outcome = solver(BB2, max_depth).search();
            assert!(!outcome.success());
            assert_eq!(outcome.bounded, 1);
            assert_eq!(outcome.trie.unwrap().to_string(), "1|-1B");
        }
    }

    #[test]
    fn test_search_is_repeatable() {
        let mut solver = solver(BB2, 6);
        let first = solver.search();
        let second = solver.search();
        assert_eq!(first.statistics, second.statistics);
        assert_eq!(first.trie, second.trie);
    }

    #[test]
    fn test_no_trie() {
        let machine = BB2.parse().unwrap();
        let config = SolverConfig::new(6).with_record_chains(false);
        let outcome = ReverseSolver::new(machine, config).unwrap().search();
        assert!(outcome.trie.is_none());
        assert_eq!(outcome.result_count, 2);
    }

    #[test]
    fn test_prune_everything() {
        let mut solver = solver(BB2, 7).with_pruner(PruneFn::new(|_: &Tape, _: &[StateId]| true));
        let outcome = solver.search();
        assert!(!outcome.success());
        assert_eq!(outcome.result_count, 0);
        assert_eq!(outcome.statistics.get(Counters::Frames), 0);
        assert_eq!(outcome.statistics.get(Counters::Pruned), 1);
        assert_eq!(outcome.trie.unwrap().to_string(), "0|-");
        assert!(solver.context().is_reset());
    }

    #[test]
    fn test_prune_interval() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let machine = BB2.parse().unwrap();
        let config = SolverConfig::new(7).with_prune_interval(1);
        let mut solver = ReverseSolver::new(machine, config)
            .unwrap()
            .with_pruner(PruneFn::new(move |_: &Tape, _: &[StateId]| {
                seen.set(seen.get() + 1);
                false
            }));
        let outcome = solver.search();
        assert!(outcome.success());
        assert_eq!(calls.get(), 6);
        assert_eq!(outcome.statistics.get(Counters::PruneChecks), 6);

        // The default interval only consults the pruner at the root here.
        let outcome = self::solver(BB2, 7).search();
        assert_eq!(outcome.statistics.get(Counters::PruneChecks), 1);
    }

    #[test]
    fn test_prune_interval_zero_never_consults() {
        let machine = BB2.parse().unwrap();
        let config = SolverConfig::new(7).with_prune_interval(0);
        let outcome = ReverseSolver::new(machine, config)
            .unwrap()
            .with_pruner(PruneFn::new(|_: &Tape, _: &[StateId]| true))
            .search();
        assert!(outcome.success());
        assert_eq!(outcome.statistics.get(Counters::PruneChecks), 0);
    }

    #[test]
    fn test_exit_selection() {
        let machine: Machine = "1RB---_1LA---".parse().unwrap();
        match ReverseSolver::new(machine.clone(), SolverConfig::default()) {
            Err(SolverError::AmbiguousHalt { count }) => assert_eq!(count, 2),
            other => panic!("expected AmbiguousHalt, got {:?}", other.map(|s| s.exit())),
        }

        let a1: ExitPoint = "A1".parse().unwrap();
        let solver = ReverseSolver::new(machine.clone(), SolverConfig::default().with_exit(a1)).unwrap();
        assert_eq!(solver.exit(), a1);

        let a0: ExitPoint = "A0".parse().unwrap();
        assert!(matches!(
            ReverseSolver::new(machine, SolverConfig::default().with_exit(a0)),
            Err(SolverError::NotHalting { exit }) if exit == a0
        ));
    }

    #[test]
    fn test_backtracks_balance_frames_when_exhausted() {
        let outcome = solver("1RB1RZ_1LB0RC_1LC1LA", 21).search();
        assert!(!outcome.success());
        assert_eq!(
            outcome.statistics.get(Counters::Frames),
            outcome.statistics.get(Counters::Backtracks)
        );
    }
}
