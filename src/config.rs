//! Simulation configuration
//!
//! Grid size, noise frequency, and tick cadence with the ranges the host
//! engine exposes. Validated once at simulation construction; presets override
//! the grid size at configure time.

use std::time::Duration;

use crate::error::{ConfigurationError, Result};

/// Tunable parameters for one simulation instance.
///
/// `grid_size` applies to [`Pattern::Random`](crate::Pattern::Random) only —
/// preset patterns force the grid to their bitmap's intrinsic width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Side length N of the toroidal N×N grid, 8..=512.
    pub grid_size: u32,
    /// Simplex noise frequency for random seeding, 0.0..=1.0.
    pub noise_frequency: f32,
    /// Fixed tick interval, 1..=1000 ms.
    pub update_interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: 64,
            noise_frequency: 0.22,
            update_interval: Duration::from_millis(200),
        }
    }
}

impl SimulationConfig {
    pub const MIN_GRID_SIZE: u32 = 8;
    pub const MAX_GRID_SIZE: u32 = 512;

    /// Checks every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN_GRID_SIZE..=Self::MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigurationError::GridSizeOutOfRange(self.grid_size));
        }
        if !(0.0..=1.0).contains(&self.noise_frequency) {
            return Err(ConfigurationError::NoiseFrequencyOutOfRange(
                self.noise_frequency,
            ));
        }
        let millis = self.update_interval.as_millis();
        if !(1..=1000).contains(&millis) {
            return Err(ConfigurationError::UpdateIntervalOutOfRange(
                self.update_interval,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn grid_size_bounds() {
        let mut config = SimulationConfig::default();
        config.grid_size = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::GridSizeOutOfRange(7))
        ));
        config.grid_size = 513;
        assert!(config.validate().is_err());
        config.grid_size = 8;
        assert!(config.validate().is_ok());
        config.grid_size = 512;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn noise_frequency_bounds() {
        let mut config = SimulationConfig::default();
        config.noise_frequency = -0.01;
        assert!(config.validate().is_err());
        config.noise_frequency = 1.01;
        assert!(config.validate().is_err());
        config.noise_frequency = 0.0;
        assert!(config.validate().is_ok());
        config.noise_frequency = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn update_interval_bounds() {
        let mut config = SimulationConfig::default();
        config.update_interval = Duration::ZERO;
        assert!(config.validate().is_err());
        config.update_interval = Duration::from_millis(1001);
        assert!(config.validate().is_err());
        config.update_interval = Duration::from_millis(1);
        assert!(config.validate().is_ok());
        config.update_interval = Duration::from_millis(1000);
        assert!(config.validate().is_ok());
    }
}
