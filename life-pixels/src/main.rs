#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_grid::SimulationConfig;
use life_pixels_support::{AnimateError, animate};

fn main() -> Result<(), AnimateError> {
    env_logger::init();
    let config = SimulationConfig::default();
    log::info!(
        "Starting with {0}x{0} grid, {1} ms tick",
        config.grid_size,
        config.tick_period_millis
    );
    animate(config)
}
