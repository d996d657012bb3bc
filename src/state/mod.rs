// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search bookkeeping that is not part of the tape or chain.

pub mod statistics;

pub use statistics::{Counters, Statistics};
