use serde::{Deserialize, Serialize};

use super::{
    action::Direction,
    food::{Food, FoodKind},
    snake::Snake,
};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Lifecycle of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Everything that belongs to one run, from start to game over
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub level: u32,
    pub food_eaten: u32,
    /// Current tick interval in milliseconds
    pub speed: u32,
    pub ticks: u64,
}

impl GameSession {
    pub fn new(snake: Snake, food: Food, speed: u32) -> Self {
        Self {
            snake,
            food,
            score: 0,
            level: 1,
            food_eaten: 0,
            speed,
            ticks: 0,
        }
    }
}

/// Final numbers of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    pub level: u32,
    pub food_eaten: u32,
    pub collision: CollisionType,
    pub new_high_score: bool,
}

/// Read-only view handed to the renderer once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub grid_size: usize,
    pub snake: Vec<Cell>,
    pub food: Option<(Cell, FoodKind)>,
    pub score: u32,
    pub level: u32,
    pub food_eaten: u32,
    pub speed: u32,
    pub game_over: Option<GameOverSummary>,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }

    pub fn is_snake(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    /// Kind of the food sitting on `cell`, if any
    pub fn food_at(&self, cell: Cell) -> Option<FoodKind> {
        match self.food {
            Some((pos, kind)) if pos == cell => Some(kind),
            _ => None,
        }
    }
}
