// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context: the state one reverse search works over.
//!
//! # Two-Tier Design
//!
//! - **Immutable tier**: the [`ReversedMachine`], built once from the forward
//!   machine and only read during search.
//! - **Dynamic tier**: the [`Tape`] and the chain of states entered so far.
//!   Both change on every search step and are restored on backtrack.
//!
//! There is no separate undo log. Each step writes one tape cell and pushes
//! one state; [`SearchContext::enter`] hands back the overwritten symbol and
//! [`SearchContext::leave`] puts it back. Head moves are undone by the solver
//! with the inverse move.

use crate::machine::{Machine, StateId, Symbol};
use crate::reverse::ReversedMachine;
use crate::tape::Tape;

#[derive(Debug, Clone)]
pub struct SearchContext {
    /// Inverted transition table (immutable tier).
    pub reversed: ReversedMachine,

    /// Exploratory tape; unvisited cells are [`Symbol::UNDEFINED`].
    pub tape: Tape,

    /// States entered so far, the halting state first.
    pub chain: Vec<StateId>,
}

impl SearchContext {
    pub fn new(reversed: ReversedMachine) -> Self {
        Self {
            reversed,
            tape: Tape::unconstrained(),
            chain: Vec::with_capacity(64),
        }
    }

    /// The forward machine.
    pub fn machine(&self) -> &Machine {
        self.reversed.forward()
    }

    /// Number of states on the chain.
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    /// Push `state` and write `symbol` under the head. Returns the symbol that
    /// was overwritten, to be handed back to [`Self::leave`].
    pub fn enter(&mut self, state: StateId, symbol: Symbol) -> Symbol {
        self.chain.push(state);
        self.tape.write_head(symbol)
    }

    /// Undo the most recent [`Self::enter`].
    pub fn leave(&mut self, old: Symbol) {
        self.tape.write_head(old);
        self.chain.pop();
    }

    /// True when the current state is the start state and the tape could be
    /// the blank tape.
    pub fn at_start(&self) -> bool {
        self.chain.last() == Some(&self.machine().start_state()) && self.tape.is_clean()
    }

    /// Discard all dynamic state, keeping the reversed machine.
    pub fn reset(&mut self) {
        self.tape = Tape::unconstrained();
        self.chain.clear();
    }

    /// True when nothing is defined on the tape and the chain is empty.
    pub fn is_reset(&self) -> bool {
        self.chain.is_empty() && self.tape.defined_count() == 0
    }
}
