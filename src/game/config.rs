use serde::{Deserialize, Serialize};

/// Smallest grid a session can be played on
pub const MIN_GRID_SIZE: usize = 5;

/// Speed presets, expressed as the tick interval in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Tick interval a fresh session starts with
    pub fn base_speed(&self) -> u32 {
        match self {
            Difficulty::Easy => 150,
            Difficulty::Medium => 100,
            Difficulty::Hard => 60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Colour scheme selected in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Difficulty used for the next session
    pub difficulty: Difficulty,

    // Food
    /// Probability that a freshly spawned food is special
    pub special_food_chance: f64,
    /// Sampling attempts before food placement gives up avoiding the snake
    pub max_spawn_attempts: u32,

    // Progression
    /// Food eaten per level
    pub level_up_every: u32,
    /// Interval reduction applied on each level up (ms)
    pub speed_step: u32,
    /// Fastest allowed tick interval (ms)
    pub min_speed: u32,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 30,
            initial_snake_length: 3,
            difficulty: Difficulty::Medium,
            special_food_chance: 0.1,
            max_spawn_attempts: 100,
            level_up_every: 5,
            speed_step: 5,
            min_speed: 30,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Pull out-of-range values back into what a session can run with.
    ///
    /// The grid is at least [`MIN_GRID_SIZE`] cells wide, the starting body
    /// fits between the center and the left wall, and the special food
    /// chance is a probability (NaN becomes 0).
    pub fn validated(mut self) -> Self {
        self.grid_size = self.grid_size.max(MIN_GRID_SIZE);

        let room = self.grid_size / 2 + 1;
        self.initial_snake_length = self.initial_snake_length.clamp(1, room);

        self.special_food_chance = if self.special_food_chance.is_nan() {
            0.0
        } else {
            self.special_food_chance.clamp(0.0, 1.0)
        };
        self.level_up_every = self.level_up_every.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 30);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.max_spawn_attempts, 100);
        assert_eq!(config.min_speed, 30);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15).with_seed(7);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validated_clamps_unplayable_values() {
        let mut config = GameConfig::new(0);
        config.initial_snake_length = 40;
        config.special_food_chance = f64::NAN;
        config.level_up_every = 0;

        let config = config.validated();
        assert_eq!(config.grid_size, MIN_GRID_SIZE);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.special_food_chance, 0.0);
        assert_eq!(config.level_up_every, 1);
    }

    #[test]
    fn test_validated_keeps_sane_values() {
        let config = GameConfig::default().validated();
        assert_eq!(config.grid_size, 30);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.special_food_chance, 0.1);
        assert_eq!(config.level_up_every, 5);
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::Easy.base_speed(), 150);
        assert_eq!(Difficulty::Medium.base_speed(), 100);
        assert_eq!(Difficulty::Hard.base_speed(), 60);
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }
}
