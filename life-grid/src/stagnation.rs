use crate::Grid;
use std::collections::VecDeque;
use std::fmt;
use xxhash_rust::xxh3::xxh3_128_with_seed;

const HISTORY_CAPACITY: usize = 3;

/// Digest of a grid's full content, for equality checks between generations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(u128);

impl Fingerprint {
    pub fn of(grid: &Grid) -> Self {
        let bytes: Vec<u8> = grid.cells_iter().map(|&alive| u8::from(alive)).collect();
        Self(xxh3_128_with_seed(&bytes, grid.size() as u64))
    }
}

/// The most recent fingerprints, oldest first.
#[derive(Clone, Debug, Default)]
pub struct FingerprintHistory {
    entries: VecDeque<Fingerprint>,
}

impl FingerprintHistory {
    pub fn push(&mut self, fingerprint: Fingerprint) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(fingerprint);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn window(&self) -> Option<[Fingerprint; HISTORY_CAPACITY]> {
        if self.entries.len() == HISTORY_CAPACITY {
            Some([self.entries[0], self.entries[1], self.entries[2]])
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Progressing,
    Stagnant,
}

impl Status {
    pub fn is_stagnant(&self) -> bool {
        *self == Status::Stagnant
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Progressing => write!(f, "Progressing"),
            Status::Stagnant => write!(f, "Stagnant"),
        }
    }
}

/// Flags a fixed point or a period-2 oscillation over the last three
/// observed generations.
///
/// Only the oldest entry is compared with the two newer ones; a match
/// between the two newest entries alone is not reported until it becomes
/// the oldest pair.
#[derive(Clone, Debug, Default)]
pub struct StagnationDetector {
    history: FingerprintHistory,
}

impl StagnationDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn observe(&mut self, grid: &Grid) -> Status {
        self.history.push(Fingerprint::of(grid));
        match self.history.window() {
            Some([oldest, middle, newest]) if oldest == newest || oldest == middle => {
                Status::Stagnant
            }
            _ => Status::Progressing,
        }
    }

    pub fn history(&self) -> &FingerprintHistory {
        &self.history
    }
}
