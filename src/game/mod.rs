//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The host drives it through [`GameEngine`] and draws from [`GameSnapshot`].

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod scheduler;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{Difficulty, GameConfig, MIN_GRID_SIZE, Theme};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::{Food, FoodKind, SpawnPolicy};
pub use grid::Grid;
pub use scheduler::TickScheduler;
pub use snake::Snake;
pub use state::{Cell, CollisionType, GameOverSummary, GameSession, GameSnapshot, Phase};
