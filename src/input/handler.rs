use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::{Command, Difficulty, Direction};

/// Terminal columns a drag must cover to count as a horizontal swipe
pub const SWIPE_MIN_COLUMNS: i32 = 4;
/// Terminal rows a drag must cover to count as a vertical swipe
pub const SWIPE_MIN_ROWS: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Command(Command),
    SelectDifficulty(Difficulty),
    ToggleTheme,
    ToggleSound,
    ShowScores,
    ClearScores,
    Quit,
    None,
}

pub struct InputHandler {
    swipe_origin: Option<(u16, u16)>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self { swipe_origin: None }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Lifecycle
            KeyCode::Char(' ') => KeyAction::Command(Command::TogglePause),
            KeyCode::Esc => KeyAction::Command(Command::Menu),
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                KeyAction::Command(Command::Start)
            }

            // Menu settings
            KeyCode::Char('1') => KeyAction::SelectDifficulty(Difficulty::Easy),
            KeyCode::Char('2') => KeyAction::SelectDifficulty(Difficulty::Medium),
            KeyCode::Char('3') => KeyAction::SelectDifficulty(Difficulty::Hard),
            KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::ToggleTheme,
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::ToggleSound,
            KeyCode::Char('h') | KeyCode::Char('H') => KeyAction::ShowScores,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::ClearScores,

            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Turn a left-button drag into a direction once it travels far enough.
    ///
    /// The origin moves to the current pointer after each recognised swipe,
    /// so one long drag can steer several turns.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Option<Direction> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe_origin = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (start_col, start_row) = self.swipe_origin?;
                let dx = i32::from(mouse.column) - i32::from(start_col);
                let dy = i32::from(mouse.row) - i32::from(start_row);

                // A row is roughly two columns tall
                let horizontal = dx.abs() > dy.abs() * 2;
                let direction = match (horizontal, dx > 0, dy > 0) {
                    (true, _, _) if dx.abs() < SWIPE_MIN_COLUMNS => return None,
                    (false, _, _) if dy.abs() < SWIPE_MIN_ROWS => return None,
                    (true, true, _) => Direction::Right,
                    (true, false, _) => Direction::Left,
                    (false, _, true) => Direction::Down,
                    (false, _, false) => Direction::Up,
                };

                self.swipe_origin = Some((mouse.column, mouse.row));
                Some(direction)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.swipe_origin = None;
                None
            }
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
