//! Arcade Snake - a terminal Snake game built around a deterministic core
//!
//! This library provides:
//! - Core game logic and the tick scheduler (game module)
//! - High score and settings persistence (storage module)
//! - TUI rendering (render module)
//! - Keyboard and mouse input mapping (input module)
//! - Sound cues (audio module)
//! - Play statistics (metrics module)
//! - The interactive terminal host (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
