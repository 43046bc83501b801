//! Simplex-noise grid seeding
//!
//! Smooth coherent noise mapped into the full 0..=255 intensity range. The
//! seed comes from the thread RNG on every call — random configurations are
//! non-reproducible by design.

use noise::{NoiseFn, Simplex};
use rand::Rng;

use crate::grid::Grid;

/// Generates a `size`×`size` grid of simplex noise at `frequency`.
pub fn noise_grid(size: u32, frequency: f32) -> Grid {
    let seed: u32 = rand::rng().random();
    let simplex = Simplex::new(seed);

    let mut grid = Grid::new(size);
    for y in 0..size {
        for x in 0..size {
            let sample = simplex.get([
                f64::from(x) * f64::from(frequency),
                f64::from(y) * f64::from(frequency),
            ]);
            // Simplex output lands in [-1, 1]; remap to the byte range.
            let intensity = ((sample + 1.0) * 0.5 * 255.0).round().clamp(0.0, 255.0) as u8;
            grid.set(x, y, intensity);
        }
    }
    grid
}
