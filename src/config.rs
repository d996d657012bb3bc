// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Solver settings.

use crate::machine::ExitPoint;
use serde::{Deserialize, Serialize};

/// Settings for one reverse search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Chain length cap. Nodes at depth `max_depth - 1` are not expanded;
    /// they are recorded as bounded results instead.
    pub max_depth: usize,
    /// Store discovered chains in a [`crate::trie::ResultTrie`].
    pub record_chains: bool,
    /// Consult the pruning hook whenever the chain length is a multiple of
    /// this. Zero never consults it.
    pub prune_interval: usize,
    /// Halting transition to search back from. Required when the machine has
    /// more than one.
    pub exit: Option<ExitPoint>,
}

impl SolverConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 30;
    pub const DEFAULT_PRUNE_INTERVAL: usize = 10;

    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn with_record_chains(mut self, record_chains: bool) -> Self {
        self.record_chains = record_chains;
        self
    }

    pub fn with_prune_interval(mut self, prune_interval: usize) -> Self {
        self.prune_interval = prune_interval;
        self
    }

    pub fn with_exit(mut self, exit: ExitPoint) -> Self {
        self.exit = Some(exit);
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            record_chains: true,
            prune_interval: Self::DEFAULT_PRUNE_INTERVAL,
            exit: None,
        }
    }
}
