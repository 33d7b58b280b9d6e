use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::{Difficulty, Theme};

/// Number of entries kept in the high score list
pub const MAX_SCORES: usize = 10;

/// One finished run in the high score list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub score: u32,
    pub level: u32,
    pub food_eaten: u32,
    pub date: DateTime<Utc>,
}

/// Player preferences that survive restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            theme: Theme::Dark,
            sound_enabled: true,
        }
    }
}

/// Score and settings persistence.
///
/// Implementations never surface failures: unreadable data reads as an empty
/// list or default settings, and failed writes are logged and dropped.
pub trait ScoreStore {
    /// High scores, best first, at most [`MAX_SCORES`] entries
    fn scores(&self) -> Vec<ScoreEntry>;

    /// Record a finished run; returns true when it made the top list
    fn save_score(&mut self, score: u32, level: u32, food_eaten: u32) -> bool;

    fn clear_scores(&mut self);

    fn settings(&self) -> Settings;

    fn save_settings(&mut self, settings: &Settings);

    /// Whether `score` would enter the current top list
    fn is_high_score(&self, score: u32) -> bool {
        qualifies(&self.scores(), score)
    }

    fn top_score(&self) -> u32 {
        self.scores().first().map(|entry| entry.score).unwrap_or(0)
    }
}

pub(crate) fn qualifies(scores: &[ScoreEntry], score: u32) -> bool {
    match scores.get(MAX_SCORES - 1) {
        Some(lowest) if scores.len() >= MAX_SCORES => score > lowest.score,
        _ => true,
    }
}

/// Insert keeping descending order and the size bound. Earlier entries win ties.
pub(crate) fn insert_ranked(scores: &mut Vec<ScoreEntry>, entry: ScoreEntry) {
    scores.push(entry);
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(MAX_SCORES);
}

/// Relative age of a score, the way the scores screen shows it
pub fn format_relative(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(date);
    let minutes = age.num_minutes();
    let hours = age.num_hours();
    let days = age.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Store that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: Vec<ScoreEntry>,
    settings: Settings,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn scores(&self) -> Vec<ScoreEntry> {
        self.scores.clone()
    }

    fn save_score(&mut self, score: u32, level: u32, food_eaten: u32) -> bool {
        let is_high = self.is_high_score(score);
        insert_ranked(
            &mut self.scores,
            ScoreEntry {
                score,
                level,
                food_eaten,
                date: Utc::now(),
            },
        );
        is_high
    }

    fn clear_scores(&mut self) {
        self.scores.clear();
    }

    fn settings(&self) -> Settings {
        self.settings
    }

    fn save_settings(&mut self, settings: &Settings) {
        self.settings = *settings;
    }
}
