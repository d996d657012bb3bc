// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters are kept by the solver and returned with each search outcome.

use serde::ser::{Serialize, SerializeMap, Serializer};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    /// Search nodes entered (pushed onto the chain).
    Frames,
    /// Chains that reached the start state on a clean tape.
    Witnesses,
    /// Chains cut off by the depth limit.
    BoundedChains,
    /// Nodes left without success, undoing their tape write.
    Backtracks,
    /// Calls to the pruning hook.
    PruneChecks,
    /// Branches the pruning hook rejected.
    Pruned,
}

const COUNT: usize = Counters::COUNT;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Counters, u64)> + '_ {
        Counters::iter().map(|c| (c, self.get(c)))
    }
}

impl Serialize for Statistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COUNT))?;
        for (counter, value) in self.iter() {
            let name: &'static str = counter.into();
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_get() {
        let mut stats = Statistics::new();
        stats.increment(Counters::Frames);
        stats.increment(Counters::Frames);
        stats.increment(Counters::Pruned);
        assert_eq!(stats.get(Counters::Frames), 2);
        assert_eq!(stats.get(Counters::Pruned), 1);
        assert_eq!(stats.get(Counters::Witnesses), 0);
        assert_eq!(stats.iter().count(), COUNT);
    }

    #[test]
    fn test_serialize_names() {
        let mut stats = Statistics::new();
        stats.increment(Counters::BoundedChains);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["bounded_chains"], 1);
        assert_eq!(json["frames"], 0);
    }
}
