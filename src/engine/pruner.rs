// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pruning hook for the reverse search.
//!
//! The solver consults its pruner every `prune_interval` states of chain
//! length, before entering the next state. A pruner that answers `true`
//! closes that branch without touching the tape or the chain.
//!
//! A pruner must be admissible: it may only reject a branch that cannot reach
//! the start state on a clean tape. The solver does not check this.
//!
//! # Example
//!
//! ```
//! use bb_reverse::engine::{PruneFn, Pruner};
//! use bb_reverse::machine::StateId;
//! use bb_reverse::tape::Tape;
//!
//! // Give up on any branch that has written more than 40 non-blank cells.
//! let mut crowded = PruneFn::new(|tape: &Tape, _chain: &[StateId]| tape.non_blank_count() > 40);
//! assert!(!crowded.is_impossible(&Tape::unconstrained(), &[]));
//! ```

use crate::machine::StateId;
use crate::tape::Tape;
use std::fmt;

pub trait Pruner {
    /// True if no extension of `chain` over `tape` can reach a witness.
    fn is_impossible(&mut self, tape: &Tape, chain: &[StateId]) -> bool;

    /// Name for log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// The default pruner: every branch is possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverPrune;

impl Pruner for NeverPrune {
    fn is_impossible(&mut self, _tape: &Tape, _chain: &[StateId]) -> bool {
        false
    }

    fn name(&self) -> &str {
        "NeverPrune"
    }
}

/// Adapts a closure into a [`Pruner`].
pub struct PruneFn<F> {
    check: F,
}

impl<F> PruneFn<F>
where
    F: FnMut(&Tape, &[StateId]) -> bool,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> Pruner for PruneFn<F>
where
    F: FnMut(&Tape, &[StateId]) -> bool,
{
    fn is_impossible(&mut self, tape: &Tape, chain: &[StateId]) -> bool {
        (self.check)(tape, chain)
    }

    fn name(&self) -> &str {
        "PruneFn"
    }
}

impl<F> fmt::Debug for PruneFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PruneFn")
    }
}
