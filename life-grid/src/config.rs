use std::time::Duration;

pub const GRID_SIZE_MIN: usize = 8;
pub const GRID_SIZE_MAX: usize = 128;
pub const GRID_SIZE_DEFAULT: usize = 8;

pub const TICK_PERIOD_MIN_MILLIS: u64 = 20;
pub const TICK_PERIOD_MAX_MILLIS: u64 = 1000;
pub const TICK_PERIOD_DEFAULT_MILLIS: u64 = 750;

/// Settings the user can change while the simulation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub grid_size: usize,
    pub tick_period_millis: u64,
    /// Reseed instead of halting when the grid stagnates.
    pub auto_repeat: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE_DEFAULT,
            tick_period_millis: TICK_PERIOD_DEFAULT_MILLIS,
            auto_repeat: false,
        }
    }
}

impl SimulationConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_millis)
    }

    /// Grid size moved by `delta`, kept within the slider bounds.
    pub fn stepped_grid_size(&self, delta: i64) -> usize {
        let size = self.grid_size as i64 + delta;
        size.clamp(GRID_SIZE_MIN as i64, GRID_SIZE_MAX as i64) as usize
    }

    /// Tick period moved by `delta` milliseconds, kept within the slider bounds.
    pub fn stepped_tick_period(&self, delta: i64) -> u64 {
        let millis = self.tick_period_millis as i64 + delta;
        millis.clamp(TICK_PERIOD_MIN_MILLIS as i64, TICK_PERIOD_MAX_MILLIS as i64) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_sliders() {
        let config = SimulationConfig::default();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.tick_period(), Duration::from_millis(750));
        assert!(!config.auto_repeat);
    }

    #[test]
    fn stepping_clamps_to_bounds() {
        let config = SimulationConfig::default();
        assert_eq!(config.stepped_grid_size(-1), GRID_SIZE_MIN);
        assert_eq!(config.stepped_grid_size(5), 13);
        assert_eq!(config.stepped_grid_size(1000), GRID_SIZE_MAX);
        assert_eq!(config.stepped_tick_period(-10), 740);
        assert_eq!(config.stepped_tick_period(1000), TICK_PERIOD_MAX_MILLIS);
        assert_eq!(config.stepped_tick_period(-1000), TICK_PERIOD_MIN_MILLIS);
    }
}
