use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{grid::Grid, state::Cell};

/// Kind of food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Normal,
    Special,
}

impl FoodKind {
    /// Points awarded for eating this kind
    pub fn value(&self) -> u32 {
        match self {
            FoodKind::Normal => 10,
            FoodKind::Special => 50,
        }
    }
}

/// How food placement samples the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    pub max_attempts: u32,
    pub special_chance: f64,
}

impl SpawnPolicy {
    /// `special_chance` as a valid probability; NaN counts as never
    fn special_probability(&self) -> f64 {
        if self.special_chance.is_nan() {
            0.0
        } else {
            self.special_chance.clamp(0.0, 1.0)
        }
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            special_chance: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Cell,
    kind: FoodKind,
}

impl Food {
    pub fn at(position: Cell, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    /// Place food on a random cell not in `occupied`, then roll its kind.
    ///
    /// Gives up after `policy.max_attempts` samples and keeps the last one,
    /// which may sit on the snake.
    pub fn spawn<R: Rng + ?Sized>(
        grid: &Grid,
        occupied: &[Cell],
        rng: &mut R,
        policy: SpawnPolicy,
    ) -> Self {
        let size = grid.size() as i32;
        let mut position = Cell::new(0, 0);
        let mut placed = false;

        for _ in 0..policy.max_attempts.max(1) {
            position = Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if !occupied.contains(&position) {
                placed = true;
                break;
            }
        }

        if !placed {
            tracing::warn!(
                "food placement gave up after {} attempts with {}/{} cells occupied; \
                 accepting occupied cell ({}, {})",
                policy.max_attempts,
                occupied.len(),
                grid.cell_count(),
                position.x,
                position.y
            );
        }

        let kind = if rng.gen_bool(policy.special_probability()) {
            FoodKind::Special
        } else {
            FoodKind::Normal
        };

        Self { position, kind }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn kind(&self) -> FoodKind {
        self.kind
    }

    pub fn value(&self) -> u32 {
        self.kind.value()
    }
}
