use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::audio::{AudioCue, SoundCue, Speaker};
use crate::game::{Command, Difficulty, GameEngine, Phase, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{RenderContext, Renderer, Screen};
use crate::storage::{ScoreEntry, Settings};

/// How often the host offers the engine a chance to tick
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Redraw rate (~30 FPS)
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    speaker: Speaker,
    settings: Settings,
    /// High scores as last read from the store
    scores: Vec<ScoreEntry>,
    show_scores: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine, settings: Settings, audio: Box<dyn AudioCue>) -> Self {
        engine.set_difficulty(settings.difficulty);
        let top_score = engine.store().top_score();
        let metrics = GameMetrics::new().with_high_score(top_score);
        let scores = engine.store().scores();

        Self {
            engine,
            metrics,
            renderer: Renderer::new(settings.theme),
            input_handler: InputHandler::new(),
            speaker: Speaker::new(audio, settings.sound_enabled),
            settings,
            scores,
            show_scores: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The frame timer only offers ticks; the engine's scheduler decides
        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, Instant::now()),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = frame_timer.tick() => {
                    self.on_frame(Instant::now());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal
                        .draw(|frame| self.draw(frame))
                        .context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.engine.snapshot();
        let ctx = RenderContext {
            screen: self.screen(),
            snapshot: &snapshot,
            metrics: &self.metrics,
            settings: &self.settings,
            scores: &self.scores,
        };
        self.renderer.render(frame, &ctx);
    }

    fn screen(&self) -> Screen {
        match self.engine.phase() {
            Phase::Menu if self.show_scores => Screen::Scores,
            Phase::Menu => Screen::Menu,
            _ => Screen::Game,
        }
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }
                let action = self.input_handler.handle_key_event(key);
                self.apply(action, now);
            }
            Event::Mouse(mouse) => {
                if let Some(direction) = self.input_handler.handle_mouse_event(mouse) {
                    self.engine.set_direction(direction);
                }
            }
            _ => {}
        }
    }

    fn apply(&mut self, action: KeyAction, now: Instant) {
        let in_menu = self.engine.phase() == Phase::Menu;

        match action {
            KeyAction::Turn(direction) => self.engine.set_direction(direction),
            KeyAction::Command(Command::Start) => self.start_game(now),
            KeyAction::Command(Command::TogglePause) => {
                if self.engine.toggle_pause(now) {
                    match self.engine.phase() {
                        Phase::Paused => self.metrics.on_pause(now),
                        _ => self.metrics.on_resume(now),
                    }
                }
            }
            KeyAction::Command(Command::Menu) => {
                if self.show_scores {
                    self.show_scores = false;
                } else if self.engine.menu() {
                    self.metrics.on_pause(now);
                }
            }
            KeyAction::SelectDifficulty(difficulty) if in_menu => {
                self.select_difficulty(difficulty)
            }
            KeyAction::ToggleTheme if in_menu => {
                self.settings.theme = self.settings.theme.toggled();
                self.renderer.set_theme(self.settings.theme);
                self.save_settings();
            }
            KeyAction::ToggleSound if in_menu => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                self.speaker.set_enabled(self.settings.sound_enabled);
                self.save_settings();
            }
            KeyAction::ShowScores if in_menu => {
                self.refresh_scores();
                self.show_scores = true;
            }
            KeyAction::ClearScores if self.show_scores => {
                self.engine.store_mut().clear_scores();
                self.refresh_scores();
            }
            KeyAction::Quit => self.should_quit = true,
            _ => {}
        }
    }

    fn start_game(&mut self, now: Instant) {
        if self.engine.start(now) {
            self.show_scores = false;
            self.metrics.on_game_start(now);
            self.speaker.play(SoundCue::Start);
        }
    }

    fn select_difficulty(&mut self, difficulty: Difficulty) {
        if self.engine.set_difficulty(difficulty) {
            self.settings.difficulty = difficulty;
            self.save_settings();
        }
    }

    fn refresh_scores(&mut self) {
        self.scores = self.engine.store().scores();
    }

    fn save_settings(&mut self) {
        self.engine.store_mut().save_settings(&self.settings);
    }

    fn on_frame(&mut self, now: Instant) {
        if let Some(result) = self.engine.update(now) {
            self.on_step(result, now);
        }
    }

    fn on_step(&mut self, result: StepResult, now: Instant) {
        if result.info.ate_food.is_some() {
            self.speaker.play(SoundCue::Eat);
        }

        if result.terminated {
            let score = self.engine.game_over().map(|s| s.score).unwrap_or(0);
            self.metrics.on_game_over(score, now);
            self.speaker.play(SoundCue::GameOver);
            self.refresh_scores();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
