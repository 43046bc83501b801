//! Preset pattern bitmaps
//!
//! The three non-random patterns load from externally supplied square
//! single-channel images. The library is injected into the simulation at
//! construction instead of resolved from a resource path at configure time.

use std::path::{Path, PathBuf};

use crate::error::{ConfigurationError, Result};
use crate::grid::Grid;
use crate::pattern::Pattern;

/// One decoded preset bitmap: square, single channel, one byte per cell.
#[derive(Debug, Clone)]
pub struct PresetImage {
    size: u32,
    cells: Vec<u8>,
}

impl PresetImage {
    /// Wraps in-memory cells. `cells.len()` must be `size²`; the `pattern`
    /// name is only used for the error message.
    pub fn from_cells(pattern: Pattern, size: u32, cells: Vec<u8>) -> Result<Self> {
        if cells.len() != (size * size) as usize {
            let height = (cells.len() as u32).checked_div(size).unwrap_or(0);
            return Err(ConfigurationError::NonSquarePreset {
                pattern,
                width: size,
                height,
            });
        }
        Ok(Self { size, cells })
    }

    /// Decodes a grayscale PNG from disk. Non-square images are rejected.
    pub fn from_file(pattern: Pattern, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| ConfigurationError::PresetLoad {
            path: PathBuf::from(path),
            source,
        })?;
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();
        if width != height {
            return Err(ConfigurationError::NonSquarePreset {
                pattern,
                width,
                height,
            });
        }
        Ok(Self {
            size: width,
            cells: luma.into_raw(),
        })
    }

    /// Intrinsic side length — this overrides the configured grid size.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn to_grid(&self) -> Grid {
        Grid::from_cells(self.size, self.cells.clone())
    }
}

/// Holds whichever preset bitmaps the host supplied.
///
/// Entries left unset make the corresponding pattern a fatal
/// [`ConfigurationError::MissingPreset`] at configure time.
#[derive(Debug, Default)]
pub struct PresetLibrary {
    glider: Option<PresetImage>,
    gosper_glider: Option<PresetImage>,
    pulsar: Option<PresetImage>,
}

impl PresetLibrary {
    /// A library with no presets: only `Pattern::Random` will configure.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads `glider.png`, `gosper_glider.png`, and `pulsar.png` from a
    /// directory. All three must be present and square.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self::empty()
            .with_glider(PresetImage::from_file(
                Pattern::Glider,
                dir.join("glider.png"),
            )?)
            .with_gosper_glider(PresetImage::from_file(
                Pattern::GosperGlider,
                dir.join("gosper_glider.png"),
            )?)
            .with_pulsar(PresetImage::from_file(
                Pattern::Pulsar,
                dir.join("pulsar.png"),
            )?))
    }

    pub fn with_glider(mut self, image: PresetImage) -> Self {
        self.glider = Some(image);
        self
    }

    pub fn with_gosper_glider(mut self, image: PresetImage) -> Self {
        self.gosper_glider = Some(image);
        self
    }

    pub fn with_pulsar(mut self, image: PresetImage) -> Self {
        self.pulsar = Some(image);
        self
    }

    /// Looks up the bitmap backing `pattern`.
    ///
    /// `Pattern::Random` has no bitmap and reports itself missing.
    pub fn get(&self, pattern: Pattern) -> Result<&PresetImage> {
        let slot = match pattern {
            Pattern::Random => &None,
            Pattern::Glider => &self.glider,
            Pattern::GosperGlider => &self.gosper_glider,
            Pattern::Pulsar => &self.pulsar,
        };
        slot.as_ref()
            .ok_or(ConfigurationError::MissingPreset(pattern))
    }
}
