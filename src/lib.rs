//! gridlife
//!
//! A GPU-accelerated Conway's Game of Life core for embedding in host
//! engines. Seeds a toroidal grid from simplex noise or preset bitmaps,
//! advances generations with a double-buffered compute dispatch, and exposes
//! each generation as a single-channel byte buffer through a small
//! configure/advance interface. Windowing, scene composition, and rendering
//! stay on the host's side of the seam.

pub mod config;
pub mod display;
pub mod error;
pub mod gpu;
pub mod grid;
pub mod pattern;
pub mod simulation;

// Re-export main types for convenience
pub use config::SimulationConfig;
pub use display::{DisplayBridge, LatestFrame};
pub use error::{ConfigurationError, Result};
pub use gpu::{GpuContext, KernelSource};
pub use grid::Grid;
pub use pattern::{Pattern, PresetImage, PresetLibrary};
pub use simulation::{LifeSimulation, LoopState};

/// Creates an idle simulation on a freshly acquired device with default
/// configuration and the given presets.
pub fn default(presets: PresetLibrary) -> Result<LifeSimulation> {
    let gpu = GpuContext::new_blocking()?;
    LifeSimulation::new(gpu, presets, SimulationConfig::default())
}
