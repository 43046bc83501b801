//! Initial-state generation
//!
//! A [`Pattern`] names how a fresh grid is seeded: procedural simplex noise or
//! one of the classic preset bitmaps. [`PatternSource`] turns a pattern plus
//! the configured parameters into the grid a new configuration starts from.

mod noise_field;
mod presets;

pub use presets::{PresetImage, PresetLibrary};

use std::fmt;

use crate::error::Result;
use crate::grid::Grid;

/// Named initial-state generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Smooth simplex noise over the configured grid size, fresh seed per call.
    Random,
    /// The classic five-cell glider.
    Glider,
    /// Gosper's glider gun.
    GosperGlider,
    /// The period-3 pulsar oscillator.
    Pulsar,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Random,
        Pattern::Glider,
        Pattern::GosperGlider,
        Pattern::Pulsar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Random => "Random",
            Pattern::Glider => "Glider",
            Pattern::GosperGlider => "GosperGlider",
            Pattern::Pulsar => "Pulsar",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces the initial grid for one configuration.
pub struct PatternSource;

impl PatternSource {
    /// Loads the initial grid for `pattern`.
    ///
    /// Returns the effective side length alongside the grid: `Random` keeps
    /// `configured_size`, while presets override it with their bitmap's
    /// intrinsic width. A preset with no backing bitmap in `presets` is a
    /// fatal configuration error.
    pub fn load(
        pattern: Pattern,
        presets: &PresetLibrary,
        configured_size: u32,
        noise_frequency: f32,
    ) -> Result<(u32, Grid)> {
        match pattern {
            Pattern::Random => {
                let grid = noise_field::noise_grid(configured_size, noise_frequency);
                Ok((configured_size, grid))
            }
            Pattern::Glider | Pattern::GosperGlider | Pattern::Pulsar => {
                let image = presets.get(pattern)?;
                Ok((image.size(), image.to_grid()))
            }
        }
    }
}
