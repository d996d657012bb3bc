// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! Everything here is a deterministic function of the caller's input: a bad
//! machine encoding, an unusable exit choice, or a malformed trie dump.
//! Running out of search depth is not an error; it shows up as bounded
//! results in [`crate::engine::SearchOutcome`].

use crate::machine::{ExitPoint, StateId, Symbol};
use thiserror::Error;

/// A machine encoding that cannot be parsed.
///
/// `block` is the zero-based index of the `_`-separated state block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("empty machine encoding")]
    Empty,

    #[error("state block {block} has length {len}, not a multiple of 3")]
    BadBlockLength { block: usize, len: usize },

    #[error("state block {block} has length {len}, expected {expected}")]
    InconsistentBlock {
        block: usize,
        expected: usize,
        len: usize,
    },

    #[error("invalid symbol {ch:?} in state block {block}")]
    BadSymbol { block: usize, ch: char },

    #[error("symbol {symbol} in state block {block} is outside the {symbol_count}-symbol alphabet")]
    SymbolOutOfRange {
        block: usize,
        symbol: Symbol,
        symbol_count: usize,
    },

    #[error("invalid direction {ch:?} in state block {block}")]
    BadDirection { block: usize, ch: char },

    #[error("invalid state {ch:?} in state block {block}; valid states are 'A'-'Y' and '-' or 'Z' for halted")]
    BadState { block: usize, ch: char },

    #[error("state block {block} targets state {state}, but the machine has {state_count} states")]
    StateOutOfRange {
        block: usize,
        state: StateId,
        state_count: usize,
    },

    #[error("more than 25 states")]
    TooManyStates,

    #[error("{count} symbols per state; at most 10 are supported")]
    TooManySymbols { count: usize },

    #[error("no halting transition found; valid characters for the halt state are '-' and 'Z'")]
    NoHaltingTransition,

    #[error("invalid exit {text:?}; expected a state letter 'A'-'Y' and a symbol digit, e.g. B1")]
    BadExit { text: String },
}

/// Reasons a reverse search cannot be set up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("machine has {count} halting transitions; choose one explicitly")]
    AmbiguousHalt { count: usize },

    #[error("{exit} is not a halting transition")]
    NotHalting { exit: ExitPoint },

    #[error("start state {state} is outside the {state_count}-state machine")]
    StartOutOfRange { state: StateId, state_count: usize },
}

/// A textual trie dump that cannot be read back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieParseError {
    #[error("missing '|' between result count and tree")]
    MissingSeparator,

    #[error("invalid result count")]
    BadCount,

    #[error("invalid node label at offset {pos}")]
    BadLabel { pos: usize },

    #[error("tree ended early")]
    UnexpectedEnd,

    #[error("unexpected input after tree at offset {pos}")]
    TrailingInput { pos: usize },

    #[error("repeated child label at offset {pos}")]
    DuplicateChild { pos: usize },

    #[error("child count {count} at offset {pos} exceeds the 25 possible labels")]
    TooManyChildren { pos: usize, count: usize },
}
