use rand::Rng;

use crate::snake::Cell;

/// Square playing field of `cells × cells` tiles. Coordinates run from
/// 0 to `cells - 1` on both axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Board {
    cells: u16,
}

impl Board {
    pub fn new(cells: u16) -> Self {
        Board { cells }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let n = self.cells as i32;
        (0..n).contains(&cell.x) && (0..n).contains(&cell.y)
    }

    /// Brings a cell that left the board back in from the opposite edge.
    pub fn wrap(&self, cell: Cell) -> Cell {
        let n = self.cells as i32;
        Cell::new(cell.x.rem_euclid(n), cell.y.rem_euclid(n))
    }

    /// Uniform pick over the whole grid. Snake occupancy is not consulted.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let n = self.cells as i32;
        Cell::new(rng.gen_range(0..n), rng.gen_range(0..n))
    }
}
