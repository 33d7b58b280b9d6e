use super::state::Cell;

/// Square playing field; the only source of truth for coordinate validity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Grid {
    /// A zero size is raised to a single cell
    pub fn new(size: usize) -> Self {
        Self {
            size: i32::try_from(size.max(1)).unwrap_or(i32::MAX),
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Check if a cell lies within the grid bounds
    pub fn is_inside(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.size && cell.y >= 0 && cell.y < self.size
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.size / 2, self.size / 2)
    }

    pub fn cell_count(&self) -> usize {
        self.size() * self.size()
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Cell::new(x, y)))
    }
}
