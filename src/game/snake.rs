use super::{action::Direction, grid::Grid, state::Cell};

/// The snake in the game
///
/// Direction changes are buffered: `set_direction` only fills the pending
/// slot, and `advance` commits it. Reversal checks always compare against the
/// committed direction, so two quick turns inside one tick can never fold the
/// snake back onto its neck.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Cell>,
    /// Direction applied on the last advance
    direction: Direction,
    /// Direction to apply on the next advance
    pending: Direction,
    growing: bool,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self {
            body,
            direction,
            pending: direction,
            growing: false,
        }
    }

    /// Build a snake from an explicit, head-first layout
    pub fn from_cells(cells: Vec<Cell>, direction: Direction) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Self {
            body: cells,
            direction,
            pending: direction,
            growing: false,
        })
    }

    /// Request a turn for the next advance; reversals are ignored
    pub fn set_direction(&mut self, requested: Direction) {
        if !self.direction.is_opposite(requested) {
            self.pending = requested;
        }
    }

    /// Move one cell in the pending direction
    pub fn advance(&mut self) {
        if !self.direction.is_opposite(self.pending) {
            self.direction = self.pending;
        }

        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.growing {
            self.growing = false;
        } else {
            self.body.pop();
        }
    }

    /// Keep the tail on the next advance
    pub fn mark_growth(&mut self) {
        self.growing = true;
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Full body, head first
    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn has_self_collision(&self) -> bool {
        self.body_segments().contains(&self.head())
    }

    pub fn has_wall_collision(&self, grid: &Grid) -> bool {
        !grid.is_inside(self.head())
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
