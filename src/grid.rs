//! Host-side cell grid
//!
//! One generation of the simulation as a square single-channel byte field.
//! 0 is dead, 255 is alive; noise seeds use the full continuous range and the
//! kernel thresholds them on the first dispatch.

/// Intensity at or above this value counts as a live cell.
pub const ALIVE_THRESHOLD: u8 = 128;

/// Square N×N field of single-byte cell intensities, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<u8>,
}

impl Grid {
    /// Creates an all-dead grid of side length `size`.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            cells: vec![0; (size * size) as usize],
        }
    }

    /// Wraps an existing row-major cell buffer. `cells.len()` must be `size²`.
    pub fn from_cells(size: u32, cells: Vec<u8>) -> Self {
        assert_eq!(
            cells.len(),
            (size * size) as usize,
            "cell buffer does not match {size}x{size} grid"
        );
        Self { size, cells }
    }

    /// Side length N.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.cells[(y * self.size + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        self.cells[(y * self.size + x) as usize] = value;
    }

    /// Raw row-major bytes, `size²` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Replaces the cell contents from a raw byte buffer of matching length.
    pub fn copy_from_bytes(&mut self, bytes: &[u8]) {
        assert_eq!(bytes.len(), self.cells.len(), "byte buffer size mismatch");
        self.cells.copy_from_slice(bytes);
    }

    /// Copies every cell of `source` into this grid.
    ///
    /// Both grids must share dimensions. This is the merge step that seeds the
    /// output buffer before the first dispatch, so the first readback shows
    /// the initial pattern rather than garbage.
    pub fn merge_from(&mut self, source: &Grid) {
        assert_eq!(self.size, source.size, "merge between mismatched grids");
        for y in 0..self.size {
            for x in 0..self.size {
                self.set(x, y, source.get(x, y));
            }
        }
    }

    /// Number of cells at or above [`ALIVE_THRESHOLD`].
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c >= ALIVE_THRESHOLD).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(16);
        assert_eq!(grid.size(), 16);
        assert_eq!(grid.as_bytes().len(), 256);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn merge_copies_every_cell() {
        let mut source = Grid::new(8);
        source.set(1, 0, 255);
        source.set(7, 7, 200);
        source.set(3, 4, 17);

        let mut dest = Grid::new(8);
        dest.merge_from(&source);
        assert_eq!(dest.as_bytes(), source.as_bytes());
    }

    #[test]
    #[should_panic(expected = "mismatched grids")]
    fn merge_rejects_size_mismatch() {
        let mut dest = Grid::new(8);
        dest.merge_from(&Grid::new(16));
    }

    #[test]
    fn get_set_round_trip() {
        let mut grid = Grid::new(8);
        grid.set(2, 5, 255);
        assert_eq!(grid.get(2, 5), 255);
        assert_eq!(grid.get(5, 2), 0);
        assert_eq!(grid.live_count(), 1);
    }
}
