// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! What a reverse search reports back.

use crate::machine::StateId;
use crate::state::{Counters, Statistics};
use crate::trie::ResultTrie;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchStatus {
    /// The start state was reached on a clean tape. `chain` runs from the
    /// halting state back to the start state.
    Witness {
        #[serde(serialize_with = "state_letters")]
        chain: Vec<StateId>,
    },
    /// Every branch was closed by the depth cap, the pruner, or a dead end.
    Exhausted,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    #[serde(flatten)]
    pub status: SearchStatus,

    /// Chains recorded: the witness, if any, plus every bounded chain.
    pub result_count: u64,

    /// Chains cut off by the depth cap. These are unresolved, not evidence
    /// of reachability.
    pub bounded: u64,

    pub elapsed: Duration,

    /// Recorded chains, when the solver was configured to keep them.
    pub trie: Option<ResultTrie>,

    pub statistics: Statistics,
}

impl SearchOutcome {
    pub(crate) fn new(
        status: SearchStatus,
        elapsed: Duration,
        trie: Option<ResultTrie>,
        statistics: Statistics,
    ) -> Self {
        let bounded = statistics.get(Counters::BoundedChains);
        Self {
            status,
            result_count: statistics.get(Counters::Witnesses) + bounded,
            bounded,
            elapsed,
            trie,
            statistics,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.status, SearchStatus::Witness { .. })
    }

    /// The witness chain, halting state first.
    pub fn chain(&self) -> Option<&[StateId]> {
        match &self.status {
            SearchStatus::Witness { chain } => Some(chain),
            SearchStatus::Exhausted => None,
        }
    }

    /// Length of the witness chain, which is the number of forward steps
    /// from the blank tape to the halt, halting step included.
    pub fn depth(&self) -> Option<usize> {
        self.chain().map(<[StateId]>::len)
    }

    /// The witness chain in forward execution order, start state first.
    pub fn forward_chain(&self) -> Option<Vec<StateId>> {
        self.chain().map(|chain| chain.iter().rev().copied().collect())
    }
}

fn state_letters<S: Serializer>(chain: &[StateId], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&chain.iter().map(|s| s.to_char()).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(text: &str) -> Vec<StateId> {
        text.bytes().map(|b| StateId::new(b - b'A')).collect()
    }

    #[test]
    fn test_witness_helpers() {
        let mut statistics = Statistics::new();
        statistics.increment(Counters::Witnesses);
        statistics.increment(Counters::BoundedChains);
        let outcome = SearchOutcome::new(
            SearchStatus::Witness { chain: chain("BAC") },
            Duration::ZERO,
            None,
            statistics,
        );
        assert!(outcome.success());
        assert_eq!(outcome.depth(), Some(3));
        assert_eq!(outcome.forward_chain(), Some(chain("CAB")));
        assert_eq!(outcome.result_count, 2);
        assert_eq!(outcome.bounded, 1);
    }

    #[test]
    fn test_exhausted_helpers() {
        let outcome = SearchOutcome::new(SearchStatus::Exhausted, Duration::ZERO, None, Statistics::new());
        assert!(!outcome.success());
        assert_eq!(outcome.depth(), None);
        assert_eq!(outcome.forward_chain(), None);
    }

    #[test]
    fn test_json_shape() {
        let mut trie = ResultTrie::new();
        trie.add_result(&chain("BA"));
        let outcome = SearchOutcome::new(
            SearchStatus::Witness { chain: chain("BA") },
            Duration::from_millis(3),
            Some(trie),
            Statistics::new(),
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "witness");
        assert_eq!(json["chain"], "BA");
        assert_eq!(json["trie"], "1|-1B1A");
        assert_eq!(json["statistics"]["frames"], 0);
    }
}
