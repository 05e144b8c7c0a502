//! Visualiser settings, loadable from JSON.

use std::fmt;
use std::time::Duration;

use gridstar_core::{Grid, Topology};

/// Errors from [`VisualizerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid must be at least 2×2.
    GridTooSmall(usize),
    /// The grid is larger than [`Grid::MAX_SIZE`].
    GridTooLarge(usize),
    /// At least one search step must run per tick.
    ZeroStepsPerTick,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall(n) => write!(f, "config: grid size {n} is too small (minimum 2)"),
            Self::GridTooLarge(n) => write!(
                f,
                "config: grid size {n} is too large (maximum {})",
                Grid::MAX_SIZE
            ),
            Self::ZeroStepsPerTick => f.write_str("config: steps_per_tick must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for the interactive visualiser.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct VisualizerConfig {
    /// Side length of the square grid.
    pub grid_size: usize,
    /// Movement model used for the next search.
    pub topology: Topology,
    /// Delay between animation ticks, in milliseconds.
    pub step_interval_ms: u64,
    /// Engine steps performed per animation tick.
    pub steps_per_tick: usize,
    /// Capture mouse events.
    pub mouse: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            grid_size: 44,
            topology: Topology::EightDirectional,
            step_interval_ms: 16,
            steps_per_tick: 1,
            mouse: true,
        }
    }
}

impl VisualizerConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_steps_per_tick(mut self, steps: usize) -> Self {
        self.steps_per_tick = steps;
        self
    }

    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse = enabled;
        self
    }

    #[inline]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.grid_size > Grid::MAX_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }
        if self.steps_per_tick == 0 {
            return Err(ConfigError::ZeroStepsPerTick);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = VisualizerConfig::default();
        assert_eq!(c.grid_size, 44);
        assert_eq!(c.topology, Topology::EightDirectional);
        assert_eq!(c.step_interval(), Duration::from_millis(16));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_and_validation() {
        let c = VisualizerConfig::default()
            .with_grid_size(1)
            .with_step_interval(Duration::from_millis(40));
        assert_eq!(c.step_interval_ms, 40);
        assert_eq!(c.validate(), Err(ConfigError::GridTooSmall(1)));

        let c = VisualizerConfig::default().with_grid_size(Grid::MAX_SIZE + 1);
        assert_eq!(c.validate(), Err(ConfigError::GridTooLarge(Grid::MAX_SIZE + 1)));

        let c = VisualizerConfig::default().with_steps_per_tick(0);
        assert_eq!(c.validate(), Err(ConfigError::ZeroStepsPerTick));
    }
}
