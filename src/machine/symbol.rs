// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tape symbols, head directions and state identifiers.
//!
//! These are the small value types shared by the forward machine, the tape
//! and the reversed machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of symbols an encoding can name (digits `0`..`9`).
pub const MAX_SYMBOLS: usize = 10;

/// Largest number of states an encoding can name (letters `A`..`Y`).
pub const MAX_STATES: usize = 25;

/// A tape symbol in the range `0..symbol_count`, or [`Symbol::UNDEFINED`].
///
/// `UNDEFINED` marks a cell nothing has constrained yet. The reverse search
/// uses it for its exploratory frontier; forward simulation never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(u8);

impl Symbol {
    /// The canonical blank symbol.
    pub const BLANK: Symbol = Symbol(0);

    /// Sentinel for a cell that has never been constrained.
    pub const UNDEFINED: Symbol = Symbol(u8::MAX);

    /// Create a new symbol, panicking if out of range.
    ///
    /// # Panics
    ///
    /// Panics if `value >= MAX_SYMBOLS`.
    pub fn new(value: u8) -> Self {
        assert!((value as usize) < MAX_SYMBOLS, "Symbol out of range: {}", value);
        Self(value)
    }

    /// Try to create a new symbol, returning None if out of range.
    pub fn try_new(value: u8) -> Option<Self> {
        if (value as usize) < MAX_SYMBOLS {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Parse an encoding digit. `-` stands for `1`, as in halting slots like `---`.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '-' => Some(Self(1)),
            '0'..='9' => Some(Self(ch as u8 - b'0')),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Get the symbol as a usize (for array indexing).
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub fn is_undefined(self) -> bool {
        self == Self::UNDEFINED
    }

    pub fn is_blank(self) -> bool {
        self == Self::BLANK
    }

    /// Iterate over every symbol of an alphabet of the given size.
    pub fn all(symbol_count: usize) -> impl Iterator<Item = Symbol> {
        (0..symbol_count as u8).map(Symbol)
    }

    pub fn to_char(self) -> char {
        if self.is_undefined() {
            '-'
        } else {
            (b'0' + self.0) as char
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Left or right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Both directions, in the order the reverse search expands them.
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `L` is left; `R` and the halting filler `-` are right.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'L' => Some(Direction::Left),
            'R' | '-' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A machine state, `A` = 0 through `Y` = 24.
///
/// The halting target is not a state; transitions carry it as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateId(u8);

impl StateId {
    /// The conventional start state `A`.
    pub const START: StateId = StateId(0);

    /// Create a new state id, panicking if out of range.
    ///
    /// # Panics
    ///
    /// Panics if `value >= MAX_STATES`.
    pub fn new(value: u8) -> Self {
        assert!((value as usize) < MAX_STATES, "State out of range: {}", value);
        Self(value)
    }

    pub fn try_new(value: u8) -> Option<Self> {
        if (value as usize) < MAX_STATES {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Parse a state letter. `Ok(None)` is the halting target (`-` or `Z`).
    pub fn from_char(ch: char) -> Result<Option<Self>, char> {
        match ch {
            '-' | 'Z' => Ok(None),
            'A'..='Y' => Ok(Some(Self(ch as u8 - b'A'))),
            _ => Err(ch),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
