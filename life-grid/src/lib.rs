#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod error;
mod grid;
mod projector;
mod simulation;
mod stagnation;

pub use config::*;
pub use engine::{AutomatonEngine, SEED_ALIVE_PROBABILITY, next_generation};
pub use error::{LifeError, Result};
pub use grid::{Grid, Loc};
pub use projector::{
    CellRect, GeometryProjector, LineSegment, RenderPrimitives, ViewportGeometry, project,
};
pub use simulation::{Simulation, TickOutcome};
pub use stagnation::{Fingerprint, FingerprintHistory, StagnationDetector, Status};

use rand::SeedableRng;
use rand::prelude::*;
use rand::rngs::SmallRng;

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible sequence, for tests and replays.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
