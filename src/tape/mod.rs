// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A lazily materialised, bidirectionally infinite tape.
//!
//! Cells come into existence the first time the head visits them and are
//! never dropped afterwards. Each new cell holds the tape's default symbol:
//! blank for forward simulation, [`Symbol::UNDEFINED`] for the reverse
//! search, where an unvisited cell is unconstrained.
//!
//! Two counters are kept up to date on every write, so that the reverse
//! search's goal test is O(1):
//! - `defined`: materialised cells not holding `UNDEFINED`
//! - `zeros`: materialised cells holding the blank symbol
//!
//! Because cells are never deallocated, a search that moves the head must
//! undo each move with the exact inverse move when it backtracks.

use crate::machine::{Direction, Symbol};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    head: usize,
    default_symbol: Symbol,
    defined: usize,
    zeros: usize,
}

impl Tape {
    /// A tape whose cells all start blank.
    pub fn blank() -> Self {
        Self::with_default(Symbol::BLANK)
    }

    /// A tape whose cells all start undefined.
    pub fn unconstrained() -> Self {
        Self::with_default(Symbol::UNDEFINED)
    }

    /// A single-cell tape; every cell materialised later holds `default_symbol`.
    pub fn with_default(default_symbol: Symbol) -> Self {
        let mut tape = Self {
            cells: VecDeque::with_capacity(64),
            head: 0,
            default_symbol,
            defined: 0,
            zeros: 0,
        };
        tape.materialise(Direction::Right);
        tape
    }

    pub fn default_symbol(&self) -> Symbol {
        self.default_symbol
    }

    pub fn read_head(&self) -> Symbol {
        self.cells[self.head]
    }

    /// Write `symbol` under the head, returning the symbol it replaced.
    pub fn write_head(&mut self, symbol: Symbol) -> Symbol {
        let old = std::mem::replace(&mut self.cells[self.head], symbol);
        self.uncount(old);
        self.count(symbol);
        old
    }

    /// Move the head one cell, creating the cell if it has never been visited.
    /// Returns the symbol under the new head position.
    pub fn move_head(&mut self, direction: Direction) -> Symbol {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.materialise(Direction::Left);
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                if self.head + 1 == self.cells.len() {
                    self.materialise(Direction::Right);
                }
                self.head += 1;
            }
        }
        self.read_head()
    }

    /// Reverse a previous `move_head(direction)`.
    pub fn undo_move(&mut self, direction: Direction) -> Symbol {
        self.move_head(direction.opposite())
    }

    /// The symbol next to the head, without moving or materialising anything.
    pub fn peek(&self, direction: Direction) -> Symbol {
        let neighbour = match direction {
            Direction::Left => self.head.checked_sub(1),
            Direction::Right => Some(self.head + 1),
        };
        neighbour
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(self.default_symbol)
    }

    /// True when every defined cell is blank, i.e. the tape is indistinguishable
    /// from the canonical blank tape.
    pub fn is_clean(&self) -> bool {
        self.zeros == self.defined
    }

    /// Defined cells holding a non-blank symbol (sigma).
    pub fn non_blank_count(&self) -> usize {
        self.defined - self.zeros
    }

    pub fn defined_count(&self) -> usize {
        self.defined
    }

    pub fn zero_count(&self) -> usize {
        self.zeros
    }

    /// Number of materialised cells.
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Offset of the head from the leftmost materialised cell.
    pub fn head_position(&self) -> usize {
        self.head
    }

    /// Append a default cell at one end. Pushing on the left shifts every
    /// index by one, so the head index stays at 0 and now names the new cell.
    fn materialise(&mut self, end: Direction) {
        match end {
            Direction::Left => self.cells.push_front(self.default_symbol),
            Direction::Right => self.cells.push_back(self.default_symbol),
        }
        self.count(self.default_symbol);
    }

    fn count(&mut self, symbol: Symbol) {
        if !symbol.is_undefined() {
            self.defined += 1;
        }
        if symbol.is_blank() {
            self.zeros += 1;
        }
    }

    fn uncount(&mut self, symbol: Symbol) {
        if !symbol.is_undefined() {
            self.defined -= 1;
        }
        if symbol.is_blank() {
            self.zeros -= 1;
        }
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::blank()
    }
}

/// Render runs of four or more equal symbols as `s^n`.
fn push_run(out: &mut String, symbol: char, run: usize, head: bool) {
    if head {
        out.push('[');
        out.push(symbol);
        out.push(']');
    } else if run >= 4 {
        out.push(symbol);
        out.push('^');
        out.push_str(&run.to_string());
    } else {
        out.extend(std::iter::repeat(symbol).take(run));
    }
}

impl fmt::Display for Tape {
    /// Cells left to right, the head cell in brackets, undefined cells as `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        let mut run_symbol = None;
        let mut run = 0;
        for (i, cell) in self.cells.iter().enumerate() {
            let ch = cell.to_char();
            if i == self.head {
                if let Some(prev) = run_symbol.take() {
                    push_run(&mut out, prev, run, false);
                }
                push_run(&mut out, ch, 1, true);
                run = 0;
                continue;
            }
            match run_symbol {
                Some(prev) if prev == ch => run += 1,
                Some(prev) => {
                    push_run(&mut out, prev, run, false);
                    run_symbol = Some(ch);
                    run = 1;
                }
                None => {
                    run_symbol = Some(ch);
                    run = 1;
                }
            }
        }
        if let Some(prev) = run_symbol {
            push_run(&mut out, prev, run, false);
        }
        write!(f, "{}", out)
    }
}
