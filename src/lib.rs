// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backward reachability search for Busy Beaver candidates.
//!
//! Given a Turing machine with a halting transition, search backward from
//! that transition for a chain of steps that starts in the start state on
//! the blank tape. Finding one shows the halt is reachable; the chain length
//! is the number of forward steps.
//!
//! # Architecture
//!
//! The search context uses a two-tier memory model:
//!
//! ## Tier 1: Immutable
//!
//! Built once per machine and only read during search:
//! - The parsed [`machine::Machine`] table
//! - The [`reverse::ReversedMachine`]: for each state, which `(state, symbol)`
//!   pairs lead into it, keyed by the side of the head they sat on and the
//!   symbol they wrote
//!
//! ## Tier 2: Dynamic
//!
//! Changed on every step and restored on backtrack:
//! - The [`tape::Tape`], whose unvisited cells are undefined rather than blank
//! - The chain of states entered so far
//!
//! # Search Algorithm
//!
//! [`engine::ReverseSolver`] runs a depth-bounded depth-first search over an
//! explicit stack. From each state it tries the cell to the left of the head,
//! then the cell to the right. An undefined cell may have held any symbol; a
//! defined one only the symbol it holds. The search stops at the first chain
//! that reaches the start state on a tape with no non-blank cell. Chains that
//! hit the depth cap are recorded in a [`trie::ResultTrie`] as unresolved.
//!
//! # Example
//!
//! ```
//! use bb_reverse::config::SolverConfig;
//!
//! let outcome = bb_reverse::solve("1RB1LB_1LA1RZ", SolverConfig::new(30)).unwrap();
//! assert!(outcome.success());
//! assert_eq!(outcome.depth(), Some(6));
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod machine;
pub mod reverse;
pub mod state;
pub mod tape;
pub mod telemetry;
pub mod trie;

// Re-export commonly used types
pub use config::SolverConfig;
pub use context::SearchContext;
pub use engine::{Pruner, ReverseSolver, SearchOutcome, SearchStatus};
pub use error::{EncodingError, SolverError, TrieParseError};
pub use machine::{Direction, ExitPoint, Machine, StateId, Symbol};
pub use reverse::ReversedMachine;
pub use tape::Tape;
pub use trie::ResultTrie;

/// Parse `encoding` and run one reverse search with `config`.
pub fn solve(encoding: &str, config: SolverConfig) -> Result<SearchOutcome, SolverError> {
    let machine: Machine = encoding.parse()?;
    let mut solver = ReverseSolver::new(machine, config)?;
    Ok(solver.search())
}
