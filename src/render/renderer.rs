use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::theme::Palette;
use crate::game::{Cell, Difficulty, FoodKind, GameSnapshot, Phase, Theme};
use crate::metrics::GameMetrics;
use crate::storage::{ScoreEntry, Settings, format_relative};

/// Which full-screen view the host is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Scores,
    Game,
}

/// Everything one frame needs; the renderer never looks at engine internals
pub struct RenderContext<'a> {
    pub screen: Screen,
    pub snapshot: &'a GameSnapshot,
    pub metrics: &'a GameMetrics,
    pub settings: &'a Settings,
    pub scores: &'a [ScoreEntry],
}

pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            palette: Palette::for_theme(theme),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.palette = Palette::for_theme(theme);
    }

    pub fn render(&self, frame: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Main area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Center the main area horizontally
        let main_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match ctx.screen {
            Screen::Menu => {
                frame.render_widget(self.render_title(), chunks[0]);
                frame.render_widget(self.render_menu(ctx), main_area);
            }
            Screen::Scores => {
                frame.render_widget(self.render_title(), chunks[0]);
                frame.render_widget(self.render_scores(ctx.scores), main_area);
            }
            Screen::Game => {
                frame.render_widget(self.render_stats(ctx.snapshot, ctx.metrics), chunks[0]);

                if ctx.snapshot.phase == Phase::GameOver {
                    frame.render_widget(self.render_game_over(ctx.snapshot), main_area);
                } else {
                    frame.render_widget(self.render_grid(ctx.snapshot), main_area);
                }

                if ctx.snapshot.phase == Phase::Paused {
                    let popup = centered_rect(main_area, 30, 5);
                    frame.render_widget(Clear, popup);
                    frame.render_widget(self.render_pause(), popup);
                }
            }
        }

        frame.render_widget(self.render_controls(ctx), chunks[2]);
    }

    fn bold(&self, color: ratatui::style::Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn render_title(&self) -> Paragraph<'_> {
        let title = Span::styled("S N A K E", self.bold(self.palette.head));
        Paragraph::new(Line::from(title))
            .alignment(Alignment::Center)
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let mut lines = Vec::new();
        let head = snapshot.head();

        for y in 0..snapshot.grid_size {
            let mut spans = Vec::new();

            for x in 0..snapshot.grid_size {
                let pos = Cell::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled("■ ", self.bold(self.palette.head))
                } else if snapshot.is_snake(pos) {
                    Span::styled("□ ", Style::default().fg(self.palette.body))
                } else if let Some(kind) = snapshot.food_at(pos) {
                    match kind {
                        FoodKind::Normal => Span::styled("O ", self.bold(self.palette.food)),
                        FoodKind::Special => {
                            Span::styled("* ", self.bold(self.palette.special_food))
                        }
                    }
                } else {
                    Span::styled(". ", Style::default().fg(self.palette.empty))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(self.palette.border))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(self.palette.label);
        let value = Style::default().fg(self.palette.text);
        let score = value.add_modifier(Modifier::BOLD);
        let best = metrics.high_score.max(snapshot.score);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), score),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(snapshot.level.to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(best.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.speed), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_pause(&self) -> Paragraph<'_> {
        let muted = Style::default().fg(self.palette.muted);

        Paragraph::new(vec![
            Line::from(Span::styled("PAUSED", self.bold(self.palette.label))),
            Line::from(""),
            Line::from(Span::styled("Space to resume", muted)),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.palette.border)),
        )
    }

    fn render_game_over(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let label = Style::default().fg(self.palette.label);
        let value = self.bold(self.palette.text);
        let muted = Style::default().fg(self.palette.muted);

        let (score, level, food_eaten, new_high) = match snapshot.game_over {
            Some(summary) => (
                summary.score,
                summary.level,
                summary.food_eaten,
                summary.new_high_score,
            ),
            None => (snapshot.score, snapshot.level, snapshot.food_eaten, false),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled("GAME OVER", self.bold(self.palette.alert))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", label),
                Span::styled(score.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Level: ", label),
                Span::styled(level.to_string(), value),
                Span::raw("    "),
                Span::styled("Food Eaten: ", label),
                Span::styled(food_eaten.to_string(), value),
            ]),
        ];

        if new_high {
            let highlight = self.bold(self.palette.special_food);
            text.push(Line::from(""));
            text.push(Line::from(Span::styled("New high score!", highlight)));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", muted),
            Span::styled("Enter", self.bold(self.palette.body)),
            Span::styled(" to play again or ", muted),
            Span::styled("Esc", self.bold(self.palette.alert)),
            Span::styled(" for the menu", muted),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.palette.alert)),
        )
    }

    fn render_menu(&self, ctx: &RenderContext) -> Paragraph<'_> {
        let label = Style::default().fg(self.palette.label);
        let muted = Style::default().fg(self.palette.muted);

        let selected = self.bold(self.palette.head);
        let mut difficulty = vec![Span::styled("Difficulty: ", label)];
        for (key, option) in [
            ('1', Difficulty::Easy),
            ('2', Difficulty::Medium),
            ('3', Difficulty::Hard),
        ] {
            let style = if option == ctx.settings.difficulty {
                selected.add_modifier(Modifier::REVERSED)
            } else {
                muted
            };
            difficulty.push(Span::styled(format!(" {key} {} ", option.label()), style));
            difficulty.push(Span::raw(" "));
        }

        let best = ctx.scores.first().map(|e| e.score).unwrap_or(0);
        let sound = on_off(ctx.settings.sound_enabled);

        let text = vec![
            Line::from(""),
            Line::from(difficulty),
            Line::from(""),
            Line::from(vec![
                Span::styled("Theme: ", label),
                Span::styled(ctx.settings.theme.label(), self.bold(self.palette.text)),
                Span::raw("    "),
                Span::styled("Sound: ", label),
                Span::styled(sound, self.bold(self.palette.text)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Best Score: ", label),
                Span::styled(best.to_string(), self.bold(self.palette.text)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", muted),
                Span::styled("Enter", self.bold(self.palette.body)),
                Span::styled(" to start", muted),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.palette.border))
                .title(" Menu "),
        )
    }

    fn render_scores(&self, scores: &[ScoreEntry]) -> Paragraph<'_> {
        let now = Utc::now();
        let label = Style::default().fg(self.palette.label);
        let value = self.bold(self.palette.text);
        let muted = Style::default().fg(self.palette.muted);
        let mut text = vec![Line::from("")];

        if scores.is_empty() {
            let empty = "No high scores yet. Play to set a record!";
            text.push(Line::from(Span::styled(empty, muted)));
        }

        for (rank, entry) in scores.iter().enumerate() {
            let when = format_relative(entry.date, now);
            text.push(Line::from(vec![
                Span::styled(format!("#{:<3}", rank + 1), label),
                Span::styled(format!("{:>6} pts", entry.score), value),
                Span::styled(format!("   Level {} - {when}", entry.level), muted),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.palette.border))
                .title(" High Scores "),
        )
    }

    fn render_controls(&self, ctx: &RenderContext) -> Paragraph<'_> {
        let key = Style::default().fg(self.palette.head);
        let quit = Style::default().fg(self.palette.alert);

        let spans = match ctx.screen {
            Screen::Menu => vec![
                Span::styled("Enter", key),
                Span::raw(" start | "),
                Span::styled("1/2/3", key),
                Span::raw(" difficulty | "),
                Span::styled("T", key),
                Span::raw(" theme | "),
                Span::styled("M", key),
                Span::raw(" sound | "),
                Span::styled("H", key),
                Span::raw(" scores | "),
                Span::styled("Q", quit),
                Span::raw(" quit"),
            ],
            Screen::Scores => vec![
                Span::styled("Esc", key),
                Span::raw(" back | "),
                Span::styled("C", key),
                Span::raw(" clear | "),
                Span::styled("Q", quit),
                Span::raw(" quit"),
            ],
            Screen::Game => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" or drag to move | "),
                Span::styled("Space", key),
                Span::raw(" pause | "),
                Span::styled("Esc", key),
                Span::raw(" menu | "),
                Span::styled("Q", quit),
                Span::raw(" quit"),
            ],
        };

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "On" } else { "Off" }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
