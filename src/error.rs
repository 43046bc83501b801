//! Error taxonomy for the simulation core
//!
//! Everything here is fatal at configure time: the simulation cannot run
//! without a valid initial pattern, a compiled kernel, and a live device.
//! There is no transient class — once configured, device operations are
//! expected to succeed.

use std::path::PathBuf;
use std::time::Duration;

use crate::pattern::Pattern;

/// Fatal configuration-time error.
///
/// Raised by [`LifeSimulation::configure`](crate::LifeSimulation::configure)
/// and the constructors feeding into it. Callers should treat any variant as
/// unrecoverable for the current configuration attempt; the simulation is left
/// idle with no partially-constructed device resources.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("preset bitmap for `{0}` is not set")]
    MissingPreset(Pattern),

    #[error("preset bitmap for `{pattern}` must be square, got {width}x{height}")]
    NonSquarePreset {
        pattern: Pattern,
        width: u32,
        height: u32,
    },

    #[error("failed to load preset bitmap `{path}`: {source}")]
    PresetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read compute kernel `{path}`: {source}")]
    KernelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("compute kernel failed validation: {0}")]
    KernelValidation(String),

    #[error("grid size {0} outside supported range 8..=512")]
    GridSizeOutOfRange(u32),

    #[error("noise frequency {0} outside 0.0..=1.0")]
    NoiseFrequencyOutOfRange(f32),

    #[error("update interval {0:?} outside 1..=1000 ms")]
    UpdateIntervalOutOfRange(Duration),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to acquire GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("simulation has not been configured")]
    NotConfigured,

    #[error("texture readback failed: staging buffer could not be mapped")]
    ReadbackFailed,
}

/// Crate-wide result alias.
pub type Result<T, E = ConfigurationError> = std::result::Result<T, E>;
