use std::time::{Duration, Instant};

/// Per-process play statistics shown in the HUD.
///
/// The clock only runs while a session is being played: pausing banks the
/// time played so far, and game over freezes it.
pub struct GameMetrics {
    running_since: Option<Instant>,
    banked: Duration,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Seed the best score, e.g. from the persisted list
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub fn update_at(&mut self, now: Instant) {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.elapsed_time = self.banked + running;
    }

    pub fn on_game_start(&mut self, now: Instant) {
        self.running_since = Some(now);
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pause(&mut self, now: Instant) {
        self.update_at(now);
        self.banked = self.elapsed_time;
        self.running_since = None;
    }

    pub fn on_resume(&mut self, now: Instant) {
        self.running_since = Some(now);
    }

    pub fn on_game_over(&mut self, final_score: u32, now: Instant) {
        self.on_pause(now);
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
