// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The inverted transition relation.
//!
//! Every forward transition `(s, r) -> (w, d, t)` that does not halt becomes a
//! [`Predecessor`] `(s, r)` filed under state `t`, symbol `w`, and the
//! direction *opposite* `d`. The direction is the side the predecessor's head
//! sat on: if the forward machine moved right into `t`, then stepping back
//! from `t` means looking at the cell to the left.
//!
//! The table is built once and never changes during search.

pub use crate::machine::ExitPoint;

use crate::machine::{Direction, Machine, StateId, Symbol};
use tracing::info;

/// A forward `(state, symbol read)` that leads into the state it is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Predecessor {
    pub state: StateId,
    pub symbol: Symbol,
}

/// Per-state predecessor lists, `[symbol written] -> predecessors`, one table
/// for each side of the head.
#[derive(Debug, Clone, Default)]
struct Arrivals {
    from_left: Vec<Vec<Predecessor>>,
    from_right: Vec<Vec<Predecessor>>,
}

impl Arrivals {
    fn new(symbol_count: usize) -> Self {
        Self {
            from_left: vec![Vec::new(); symbol_count],
            from_right: vec![Vec::new(); symbol_count],
        }
    }

    fn side(&self, direction: Direction) -> &[Vec<Predecessor>] {
        match direction {
            Direction::Left => &self.from_left,
            Direction::Right => &self.from_right,
        }
    }

    fn side_mut(&mut self, direction: Direction) -> &mut Vec<Vec<Predecessor>> {
        match direction {
            Direction::Left => &mut self.from_left,
            Direction::Right => &mut self.from_right,
        }
    }
}

/// A machine with its transitions inverted, for walking backward from a halt.
#[derive(Debug, Clone)]
pub struct ReversedMachine {
    forward: Machine,
    states: Vec<Arrivals>,
    exits: Vec<ExitPoint>,
}

impl ReversedMachine {
    /// Invert `forward` in a single pass over its table.
    pub fn new(forward: Machine) -> Self {
        let mut states = vec![Arrivals::new(forward.symbol_count()); forward.state_count()];
        let mut exits = Vec::new();

        for (state, symbol, transition) in forward.rules() {
            match transition.next {
                None => exits.push(ExitPoint { state, symbol }),
                Some(target) => {
                    let side = states[target.as_usize()].side_mut(transition.direction.opposite());
                    side[transition.write.as_usize()].push(Predecessor { state, symbol });
                }
            }
        }

        info!(
            states = forward.state_count(),
            exits = exits.len(),
            "Reversed machine {}",
            forward
        );

        Self {
            forward,
            states,
            exits,
        }
    }

    pub fn forward(&self) -> &Machine {
        &self.forward
    }

    pub fn symbol_count(&self) -> usize {
        self.forward.symbol_count()
    }

    /// Predecessors of `state` whose head sat on the `direction` side and
    /// wrote `written` there.
    ///
    /// # Panics
    ///
    /// Panics if `state` or `written` is outside the machine.
    pub fn arrivals(&self, state: StateId, direction: Direction, written: Symbol) -> &[Predecessor] {
        &self.states[state.as_usize()].side(direction)[written.as_usize()]
    }

    /// All halting transitions, in table order.
    pub fn exits(&self) -> &[ExitPoint] {
        &self.exits
    }

    /// The last halting transition in table order.
    ///
    /// Only meaningful for machines with a single halt; see [`Self::unique_exit`].
    pub fn exit(&self) -> ExitPoint {
        // Parsing guarantees at least one halting transition.
        self.exits[self.exits.len() - 1]
    }

    /// The halting transition, provided there is exactly one.
    pub fn unique_exit(&self) -> Option<ExitPoint> {
        match self.exits.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pred(state: u8, symbol: u8) -> Predecessor {
        Predecessor {
            state: StateId::new(state),
            symbol: Symbol::new(symbol),
        }
    }

    #[test]
    fn test_bb2_inversion() {
        let rm = ReversedMachine::new(Machine::from_str("1RB1LB_1LA1RZ").unwrap());
        let (a, b) = (StateId::new(0), StateId::new(1));
        let one = Symbol::new(1);

        // A0 -> 1RB: B was entered moving right, so its predecessor is on the left.
        assert_eq!(rm.arrivals(b, Direction::Left, one), &[pred(0, 0)]);
        // A1 -> 1LB
        assert_eq!(rm.arrivals(b, Direction::Right, one), &[pred(0, 1)]);
        // B0 -> 1LA
        assert_eq!(rm.arrivals(a, Direction::Right, one), &[pred(1, 0)]);
        assert!(rm.arrivals(a, Direction::Left, one).is_empty());
        assert!(rm.arrivals(a, Direction::Left, Symbol::BLANK).is_empty());

        assert_eq!(rm.exit(), ExitPoint::new(b, one));
        assert_eq!(rm.unique_exit(), Some(ExitPoint::new(b, one)));
    }

    #[test]
    fn test_shared_target_keeps_scan_order() {
        // A0 -> 1RB and B1 -> 1RB both enter B from the left having written 1.
        let rm = ReversedMachine::new(Machine::from_str("1RB0LA_0RA1RB_1RZ1RZ").unwrap());
        let b = StateId::new(1);
        assert_eq!(rm.arrivals(b, Direction::Left, Symbol::new(1)), &[pred(0, 0), pred(1, 1)]);
    }

    #[test]
    fn test_multiple_exits() {
        let rm = ReversedMachine::new(Machine::from_str("1RB---_1LA---").unwrap());
        assert_eq!(rm.exits().len(), 2);
        assert_eq!(rm.exit(), ExitPoint::new(StateId::new(1), Symbol::new(1)));
        assert_eq!(rm.unique_exit(), None);
    }

    #[test]
    fn test_unreachable_state_has_empty_lists() {
        // Nothing transitions into C.
        let rm = ReversedMachine::new(Machine::from_str("1RB1LA_1LA1RZ_0RA0LA").unwrap());
        let c = StateId::new(2);
        for direction in Direction::ALL {
            for symbol in Symbol::all(2) {
                assert!(rm.arrivals(c, direction, symbol).is_empty());
            }
        }
    }
}
