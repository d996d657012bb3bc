// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Turing machine definitions in the compact `1RB1LB_1LA1RZ` text format.
//!
//! Each `_`-separated block describes one state (`A`, `B`, ...). A block holds
//! one `<write><direction><next>` triple per symbol read, in symbol order, so
//! the alphabet size is the first block's length divided by three. A next
//! state of `Z` or `-` halts.
//!
//! Anything after the first character outside `[0-9A-Z_-]` is ignored, so an
//! encoding may carry trailing metadata (`1RB1LB_1LA1RZ 6 steps`).

pub mod run;
pub mod symbol;

pub use run::RunReport;
pub use symbol::{Direction, StateId, Symbol, MAX_STATES, MAX_SYMBOLS};

use crate::error::{EncodingError, SolverError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// One entry of the transition table: what to write, where to move, and
/// which state follows (`None` halts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub write: Symbol,
    pub direction: Direction,
    pub next: Option<StateId>,
}

impl Transition {
    pub fn is_halt(&self) -> bool {
        self.next.is_none()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let next = self.next.map_or('Z', StateId::to_char);
        write!(f, "{}{}{}", self.write, self.direction, next)
    }
}

/// A `(state, symbol)` pair whose transition halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExitPoint {
    pub state: StateId,
    pub symbol: Symbol,
}

impl ExitPoint {
    pub fn new(state: StateId, symbol: Symbol) -> Self {
        Self { state, symbol }
    }
}

impl fmt::Display for ExitPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.state, self.symbol)
    }
}

impl FromStr for ExitPoint {
    type Err = EncodingError;

    /// Parse a state letter followed by a symbol digit, e.g. `B1`. The halt
    /// state cannot be an exit.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let bad = || EncodingError::BadExit {
            text: text.to_string(),
        };
        let mut chars = text.chars();
        let state = match chars.next().map(StateId::from_char) {
            Some(Ok(Some(state))) => state,
            _ => return Err(bad()),
        };
        let symbol = match chars.next() {
            Some(ch @ '0'..='9') => Symbol::new(ch as u8 - b'0'),
            _ => return Err(bad()),
        };
        match chars.next() {
            None => Ok(ExitPoint { state, symbol }),
            Some(_) => Err(bad()),
        }
    }
}

/// A parsed Turing machine.
///
/// The table is fixed once parsed. Only the start state may change, so a
/// caller can seed the backward search's goal with an alternative state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    symbol_count: usize,
    /// `table[state][symbol]`
    table: Vec<Vec<Transition>>,
    start_state: StateId,
    encoding: String,
}

fn is_encoding_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch.is_ascii_uppercase() || ch == '_' || ch == '-'
}

fn parse_transition(block: usize, triple: &[char]) -> Result<Transition, EncodingError> {
    let write = Symbol::from_char(triple[0]).ok_or(EncodingError::BadSymbol { block, ch: triple[0] })?;
    let direction =
        Direction::from_char(triple[1]).ok_or(EncodingError::BadDirection { block, ch: triple[1] })?;
    let next = StateId::from_char(triple[2]).map_err(|ch| EncodingError::BadState { block, ch })?;
    Ok(Transition {
        write,
        direction,
        next,
    })
}

impl FromStr for Machine {
    type Err = EncodingError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let table_text = text.split(|c: char| !is_encoding_char(c)).next().unwrap_or("");
        if table_text.is_empty() {
            return Err(EncodingError::Empty);
        }

        let blocks: Vec<Vec<char>> = table_text.split('_').map(|b| b.chars().collect()).collect();
        if blocks.len() > MAX_STATES {
            return Err(EncodingError::TooManyStates);
        }
        let first_len = blocks[0].len();
        if first_len == 0 {
            return Err(EncodingError::Empty);
        }
        if first_len % 3 != 0 {
            return Err(EncodingError::BadBlockLength {
                block: 0,
                len: first_len,
            });
        }
        let symbol_count = first_len / 3;
        if symbol_count > MAX_SYMBOLS {
            return Err(EncodingError::TooManySymbols {
                count: symbol_count,
            });
        }
        let state_count = blocks.len();

        let mut table = Vec::with_capacity(state_count);
        for (block, chars) in blocks.iter().enumerate() {
            if chars.len() % 3 != 0 {
                return Err(EncodingError::BadBlockLength {
                    block,
                    len: chars.len(),
                });
            }
            if chars.len() != first_len {
                return Err(EncodingError::InconsistentBlock {
                    block,
                    expected: first_len,
                    len: chars.len(),
                });
            }
            let mut row = Vec::with_capacity(symbol_count);
            for triple in chars.chunks(3) {
                let transition = parse_transition(block, triple)?;
                if let Some(state) = transition.next {
                    if state.as_usize() >= state_count {
                        return Err(EncodingError::StateOutOfRange {
                            block,
                            state,
                            state_count,
                        });
                    }
                    // The written symbol of a halting transition is never read back.
                    if transition.write.as_usize() >= symbol_count {
                        return Err(EncodingError::SymbolOutOfRange {
                            block,
                            symbol: transition.write,
                            symbol_count,
                        });
                    }
                }
                row.push(transition);
            }
            table.push(row);
        }

        if !table.iter().flatten().any(Transition::is_halt) {
            return Err(EncodingError::NoHaltingTransition);
        }

        info!(states = state_count, symbols = symbol_count, "Built machine {}", table_text);

        Ok(Machine {
            symbol_count,
            table,
            start_state: StateId::START,
            encoding: text.to_string(),
        })
    }
}

impl Machine {
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    pub fn state_count(&self) -> usize {
        self.table.len()
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Override the state a blank-tape run starts from.
    pub fn set_start_state(&mut self, state: StateId) -> Result<(), SolverError> {
        if state.as_usize() >= self.state_count() {
            return Err(SolverError::StartOutOfRange {
                state,
                state_count: self.state_count(),
            });
        }
        self.start_state = state;
        Ok(())
    }

    /// The text this machine was parsed from, including any trailing metadata.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// The transition taken in `state` when reading `symbol`.
    ///
    /// # Panics
    ///
    /// Panics if either argument is outside the machine (including `UNDEFINED`).
    pub fn transition(&self, state: StateId, symbol: Symbol) -> &Transition {
        &self.table[state.as_usize()][symbol.as_usize()]
    }

    /// Every `(state, symbol, transition)` entry, state-major.
    pub fn rules(&self) -> impl Iterator<Item = (StateId, Symbol, &Transition)> + '_ {
        self.table.iter().enumerate().flat_map(|(s, row)| {
            row.iter()
                .enumerate()
                .map(move |(r, t)| (StateId::new(s as u8), Symbol::new(r as u8), t))
        })
    }

    /// The halting `(state, symbol)` pairs, in table order.
    pub fn halting(&self) -> impl Iterator<Item = ExitPoint> + '_ {
        self.rules()
            .filter(|(_, _, t)| t.is_halt())
            .map(|(state, symbol, _)| ExitPoint { state, symbol })
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.table.iter().enumerate() {
            if i > 0 {
                write!(f, "_")?;
            }
            for t in row {
                write!(f, "{}", t)?;
            }
        }
        Ok(())
    }
}
