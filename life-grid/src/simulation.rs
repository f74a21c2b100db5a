use crate::{
    AutomatonEngine, GeometryProjector, Grid, LifeError, Random, RenderPrimitives, Result,
    SimulationConfig, StagnationDetector, Status, TICK_PERIOD_MAX_MILLIS, TICK_PERIOD_MIN_MILLIS,
};
use log::{debug, info};
use std::time::Duration;

/// What a single tick did to the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// Stagnation with auto-repeat on: a fresh random grid was seeded.
    Reseeded,
    /// Stagnation with auto-repeat off: the simulation stopped running.
    Halted,
}

/// Drives the engine on behalf of a front-end: play/pause/step/reset, and
/// what to do when the grid stops changing.
#[derive(Debug)]
pub struct Simulation {
    engine: AutomatonEngine,
    detector: StagnationDetector,
    projector: GeometryProjector,
    config: SimulationConfig,
    running: bool,
    status: Option<Status>,
}

impl Simulation {
    pub fn new(mut config: SimulationConfig, rand: Random) -> Result<Self> {
        config.tick_period_millis = clamp_tick_period(config.tick_period_millis);
        let mut engine = AutomatonEngine::new(rand);
        engine.seed_random(config.grid_size)?;
        Ok(Self {
            engine,
            detector: StagnationDetector::new(),
            projector: GeometryProjector::new(),
            config,
            running: false,
            status: None,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.engine.grid()
    }

    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    /// Status from the most recent tick, `None` until the first tick after a
    /// reseed.
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn status_text(&self) -> String {
        match self.status {
            Some(status) => format!("Status: {status}"),
            None => "Status: None".to_string(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn play(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Pauses, then advances exactly one generation.
    pub fn step_once(&mut self) -> Result<TickOutcome> {
        self.pause();
        self.tick()
    }

    /// Pauses and replaces the grid with a new random one of the same size.
    pub fn reset(&mut self) -> Result<()> {
        self.pause();
        self.reseed()
    }

    pub fn auto_repeat(&self) -> bool {
        self.config.auto_repeat
    }

    pub fn set_auto_repeat(&mut self, auto_repeat: bool) {
        self.config.auto_repeat = auto_repeat;
    }

    pub fn toggle_auto_repeat(&mut self) -> bool {
        self.config.auto_repeat = !self.config.auto_repeat;
        self.config.auto_repeat
    }

    pub fn tick_period(&self) -> Duration {
        self.config.tick_period()
    }

    /// Sets the tick period, kept within the slider bounds. Returns true when
    /// the simulation is running and its timer should restart at the new rate.
    pub fn set_tick_period(&mut self, millis: u64) -> bool {
        self.config.tick_period_millis = clamp_tick_period(millis);
        self.running
    }

    /// Resizing always reseeds.
    pub fn set_grid_size(&mut self, size: usize) -> Result<()> {
        self.engine.resize(size)?;
        self.config.grid_size = size;
        self.detector.reset();
        self.status = None;
        info!("Grid resized to {size}x{size}");
        Ok(())
    }

    /// Replaces the grid with explicit content, adopting its size.
    pub fn load(&mut self, grid: Grid) {
        self.config.grid_size = grid.size();
        self.engine.seed_with(grid);
        self.detector.reset();
        self.status = None;
    }

    pub fn tick(&mut self) -> Result<TickOutcome> {
        let grid = self.engine.step()?;
        let status = self.detector.observe(grid);
        let population = grid.population();
        self.status = Some(status);
        debug!(
            "Tick {}: {status}, population {population}",
            self.engine.generation()
        );

        if !status.is_stagnant() {
            return Ok(TickOutcome::Advanced);
        }
        if self.config.auto_repeat {
            info!(
                "Stagnant after {} generations, reseeding",
                self.engine.generation()
            );
            self.reseed()?;
            Ok(TickOutcome::Reseeded)
        } else {
            info!(
                "Stagnant after {} generations, halting",
                self.engine.generation()
            );
            self.running = false;
            Ok(TickOutcome::Halted)
        }
    }

    /// Projects the current grid into a `width` x `height` pixel area.
    pub fn primitives(&mut self, width: u32, height: u32) -> Result<&RenderPrimitives> {
        let grid = self.engine.grid().ok_or(LifeError::Uninitialized)?;
        Ok(self.projector.project(grid, width, height))
    }

    fn reseed(&mut self) -> Result<()> {
        self.engine.seed_random(self.config.grid_size)?;
        self.detector.reset();
        self.status = None;
        Ok(())
    }
}

fn clamp_tick_period(millis: u64) -> u64 {
    millis.clamp(TICK_PERIOD_MIN_MILLIS, TICK_PERIOD_MAX_MILLIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation(auto_repeat: bool) -> Simulation {
        let config = SimulationConfig {
            auto_repeat,
            ..SimulationConfig::default()
        };
        Simulation::new(config, Random::from_seed(17)).unwrap()
    }

    #[test]
    fn starts_paused_with_random_grid() {
        let simulation = simulation(false);
        assert!(!simulation.is_running());
        assert_eq!(simulation.grid().map(Grid::size), Some(8));
        assert_eq!(simulation.status(), None);
        assert_eq!(simulation.status_text(), "Status: None");
    }

    #[test]
    fn zero_grid_size_is_rejected() {
        let config = SimulationConfig {
            grid_size: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            Simulation::new(config, Random::from_seed(1)).err(),
            Some(LifeError::InvalidSize(0))
        );

        let mut simulation = simulation(false);
        assert_eq!(simulation.set_grid_size(0), Err(LifeError::InvalidSize(0)));
        assert_eq!(simulation.config().grid_size, 8);
    }

    #[test]
    fn step_once_pauses_and_advances_one_generation() {
        let mut simulation = simulation(false);
        simulation.play();
        simulation.step_once().unwrap();
        assert!(!simulation.is_running());
        assert_eq!(simulation.generation(), 1);
        assert!(simulation.status().is_some());
    }

    #[test]
    fn reset_pauses_and_clears_status() {
        let mut simulation = simulation(false);
        simulation.tick().unwrap();
        simulation.play();
        simulation.reset().unwrap();
        assert!(!simulation.is_running());
        assert_eq!(simulation.generation(), 0);
        assert_eq!(simulation.status(), None);
    }

    #[test]
    fn toggling_auto_repeat() {
        let mut simulation = simulation(false);
        assert!(simulation.toggle_auto_repeat());
        assert!(simulation.auto_repeat());
        simulation.set_auto_repeat(false);
        assert!(!simulation.auto_repeat());
    }

    #[test]
    fn tick_period_follows_setting() {
        let mut simulation = simulation(false);
        assert!(!simulation.set_tick_period(40));
        assert_eq!(simulation.tick_period(), Duration::from_millis(40));
    }

    #[test]
    fn tick_period_change_restarts_running_timer() {
        let mut simulation = simulation(false);
        simulation.play();
        assert!(simulation.set_tick_period(100));
        simulation.pause();
        assert!(!simulation.set_tick_period(200));
    }

    #[test]
    fn tick_period_is_never_zero() {
        let mut simulation = simulation(false);
        simulation.set_tick_period(0);
        assert_eq!(
            simulation.tick_period(),
            Duration::from_millis(TICK_PERIOD_MIN_MILLIS)
        );

        let config = SimulationConfig {
            tick_period_millis: 0,
            ..SimulationConfig::default()
        };
        let simulation = Simulation::new(config, Random::from_seed(2)).unwrap();
        assert_eq!(
            simulation.tick_period(),
            Duration::from_millis(TICK_PERIOD_MIN_MILLIS)
        );
    }

    // Two identical generations in the history; one more tick would report
    // a fixed point unless the history is cleared first.
    fn simulation_about_to_stagnate(auto_repeat: bool) -> Simulation {
        let mut simulation = simulation(auto_repeat);
        simulation.load(Grid::new(8).unwrap());
        simulation.tick().unwrap();
        simulation.tick().unwrap();
        assert_eq!(simulation.detector.history().len(), 2);
        simulation
    }

    fn assert_history_restarts(simulation: &mut Simulation) {
        assert!(simulation.detector.history().is_empty());
        for expected_len in 1..=2 {
            assert_eq!(simulation.tick().unwrap(), TickOutcome::Advanced);
            assert_eq!(simulation.detector.history().len(), expected_len);
        }
    }

    #[test]
    fn set_grid_size_clears_history() {
        let mut simulation = simulation_about_to_stagnate(false);
        simulation.set_grid_size(8).unwrap();
        assert_history_restarts(&mut simulation);
    }

    #[test]
    fn reset_clears_history() {
        let mut simulation = simulation_about_to_stagnate(false);
        simulation.reset().unwrap();
        assert_history_restarts(&mut simulation);
    }

    #[test]
    fn auto_repeat_reseed_clears_history() {
        let mut simulation = simulation_about_to_stagnate(true);
        assert_eq!(simulation.tick().unwrap(), TickOutcome::Reseeded);
        assert_eq!(simulation.status(), None);
        assert_eq!(simulation.generation(), 0);
        assert_history_restarts(&mut simulation);
    }

    #[test]
    fn primitives_follow_grid_size() {
        let mut simulation = simulation(false);
        simulation.set_grid_size(10).unwrap();
        let population = simulation.grid().unwrap().population();
        let primitives = simulation.primitives(200, 100).unwrap();
        assert_eq!(primitives.lines.len(), 22);
        assert_eq!(primitives.cells.len(), population);
    }
}
