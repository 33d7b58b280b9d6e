use std::time::{Duration, Instant};

use rand::{SeedableRng, rngs::StdRng};

use super::{
    action::{Command, Direction},
    config::{Difficulty, GameConfig},
    food::{Food, FoodKind, SpawnPolicy},
    grid::Grid,
    scheduler::TickScheduler,
    snake::Snake,
    state::{CollisionType, GameOverSummary, GameSession, GameSnapshot, Phase},
};
use crate::storage::ScoreStore;

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Kind of food eaten this step, if any
    pub ate_food: Option<FoodKind>,
    /// Whether this step moved the session to the next level
    pub leveled_up: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the session ended on this step
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Owns the active session and drives it through its lifecycle.
///
/// The host calls [`GameEngine::update`] from its frame callback as often as
/// it wants; the internal scheduler turns that into at most one tick per
/// speed interval. Pause and menu transitions stop the scheduler, so frames
/// arriving afterwards cannot touch the session.
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
    store: Box<dyn ScoreStore>,
    scheduler: TickScheduler,
    phase: Phase,
    difficulty: Difficulty,
    session: Option<GameSession>,
    game_over: Option<GameOverSummary>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration and store.
    ///
    /// Out-of-range settings are clamped, see [`GameConfig::validated`].
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>) -> Self {
        let config = config.validated();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            grid: Grid::new(config.grid_size),
            difficulty: config.difficulty,
            config,
            rng,
            store,
            scheduler: TickScheduler::new(),
            phase: Phase::Menu,
            session: None,
            game_over: None,
        }
    }

    /// Begin a fresh session from the menu or after a game over
    pub fn start(&mut self, now: Instant) -> bool {
        if matches!(self.phase, Phase::Playing | Phase::Paused) {
            return false;
        }

        let snake = Snake::new(
            self.grid.center(),
            Direction::Right,
            self.config.initial_snake_length,
        );
        let policy = self.spawn_policy();
        let food = Food::spawn(&self.grid, snake.body(), &mut self.rng, policy);
        let speed = self.difficulty.base_speed();

        self.session = Some(GameSession::new(snake, food, speed));
        self.game_over = None;
        self.phase = Phase::Playing;
        self.scheduler.start(now);

        tracing::info!(
            "session started: grid={} difficulty={:?} speed={}ms",
            self.grid.size(),
            self.difficulty,
            speed
        );
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.phase = Phase::Paused;
        self.scheduler.stop();
        tracing::debug!("session paused");
        true
    }

    /// Continue a paused session; the next tick is measured from `now`
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Playing;
        self.scheduler.start(now);
        tracing::debug!("session resumed");
        true
    }

    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Playing => self.pause(),
            Phase::Paused => self.resume(now),
            _ => false,
        }
    }

    /// Drop the current session and return to the menu
    pub fn menu(&mut self) -> bool {
        if self.phase == Phase::Menu {
            return false;
        }
        self.scheduler.stop();
        self.phase = Phase::Menu;
        self.session = None;
        self.game_over = None;
        true
    }

    pub fn handle_command(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::Start => self.start(now),
            Command::TogglePause => self.toggle_pause(now),
            Command::Menu => self.menu(),
        }
    }

    /// Buffer a turn for the next tick; ignored unless playing
    pub fn set_direction(&mut self, direction: Direction) {
        if self.phase != Phase::Playing {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.snake.set_direction(direction);
        }
    }

    /// Select the difficulty for the next session
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if matches!(self.phase, Phase::Playing | Phase::Paused) {
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Frame callback entry point: ticks when the speed interval has elapsed
    pub fn update(&mut self, now: Instant) -> Option<StepResult> {
        let speed = self.session.as_ref()?.speed;
        if self.phase != Phase::Playing {
            return None;
        }

        if self
            .scheduler
            .poll(now, Duration::from_millis(u64::from(speed)))
        {
            Some(self.tick())
        } else {
            None
        }
    }

    /// Execute one step of the game, ignoring the scheduler
    pub fn tick(&mut self) -> StepResult {
        if self.phase != Phase::Playing {
            return StepResult::default();
        }
        let Some(session) = self.session.as_mut() else {
            return StepResult::default();
        };

        session.snake.advance();
        session.ticks += 1;

        let collision = if session.snake.has_wall_collision(&self.grid) {
            Some(CollisionType::Wall)
        } else if session.snake.has_self_collision() {
            Some(CollisionType::SelfCollision)
        } else {
            None
        };

        if let Some(collision) = collision {
            self.finish(collision);
            return StepResult {
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision),
                    ..Default::default()
                },
            };
        }

        let mut info = StepInfo::default();

        if session.snake.head() == session.food.position() {
            let eaten = session.food.kind();
            session.snake.mark_growth();
            session.score += eaten.value();
            session.food_eaten += 1;
            info.ate_food = Some(eaten);

            if session.food_eaten % self.config.level_up_every == 0 {
                session.level += 1;
                session.speed = session
                    .speed
                    .saturating_sub(self.config.speed_step)
                    .max(self.config.min_speed);
                info.leveled_up = true;
                tracing::info!(
                    "level {} reached, speed now {}ms",
                    session.level,
                    session.speed
                );
            }

            let policy = SpawnPolicy {
                max_attempts: self.config.max_spawn_attempts,
                special_chance: self.config.special_food_chance,
            };
            session.food = Food::spawn(&self.grid, session.snake.body(), &mut self.rng, policy);
        }

        StepResult {
            terminated: false,
            info,
        }
    }

    fn finish(&mut self, collision: CollisionType) {
        self.phase = Phase::GameOver;
        self.scheduler.stop();

        let Some(session) = self.session.as_ref() else {
            return;
        };
        let new_high_score = self
            .store
            .save_score(session.score, session.level, session.food_eaten);

        tracing::info!(
            "game over ({:?}): score={} level={} food={} high_score={}",
            collision,
            session.score,
            session.level,
            session.food_eaten,
            new_high_score
        );

        self.game_over = Some(GameOverSummary {
            score: session.score,
            level: session.level,
            food_eaten: session.food_eaten,
            collision,
            new_high_score,
        });
    }

    fn spawn_policy(&self) -> SpawnPolicy {
        SpawnPolicy {
            max_attempts: self.config.max_spawn_attempts,
            special_chance: self.config.special_food_chance,
        }
    }

    /// Immutable view of the current state for rendering
    pub fn snapshot(&self) -> GameSnapshot {
        let session = self.session.as_ref();
        let base_speed = self.difficulty.base_speed();

        GameSnapshot {
            phase: self.phase,
            grid_size: self.grid.size(),
            snake: session.map_or_else(Vec::new, |s| s.snake.body().to_vec()),
            food: session.map(|s| (s.food.position(), s.food.kind())),
            score: session.map_or(0, |s| s.score),
            level: session.map_or(1, |s| s.level),
            food_eaten: session.map_or(0, |s| s.food_eaten),
            speed: session.map_or(base_speed, |s| s.speed),
            game_over: self.game_over,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Direct access to the live session, for scripted setups
    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    pub fn game_over(&self) -> Option<&GameOverSummary> {
        self.game_over.as_ref()
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn ScoreStore {
        self.store.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::MIN_GRID_SIZE;
    use crate::game::state::Cell;
    use crate::storage::MemoryStore;

    fn engine(config: GameConfig) -> GameEngine {
        GameEngine::new(config.with_seed(11), Box::new(MemoryStore::new()))
    }

    fn started(config: GameConfig) -> GameEngine {
        let mut engine = engine(config);
        assert!(engine.start(Instant::now()));
        engine
    }

    fn place_food(engine: &mut GameEngine, cell: Cell, kind: FoodKind) {
        engine.session_mut().unwrap().food = Food::at(cell, kind);
    }

    #[test]
    fn test_unplayable_config_is_clamped() {
        let mut config = GameConfig::new(0);
        config.initial_snake_length = 12;
        config.special_food_chance = f64::NAN;
        let engine = started(config);

        assert_eq!(engine.grid().size(), MIN_GRID_SIZE);
        let session = engine.session().unwrap();
        assert_eq!(session.food.kind(), FoodKind::Normal);
        for cell in session.snake.body() {
            assert!(engine.grid().is_inside(*cell));
        }
    }

    #[test]
    fn test_start_resets_session() {
        let engine = started(GameConfig::small());
        let session = engine.session().unwrap();

        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert_eq!(session.food_eaten, 0);
        assert_eq!(session.speed, 100);
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.snake.head(), Cell::new(5, 5));
        assert!(!session.snake.occupies(session.food.position()));
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut engine = started(GameConfig::small());
        place_food(&mut engine, Cell::new(0, 0), FoodKind::Normal);
        engine.tick();

        assert!(!engine.start(Instant::now()));
        assert_eq!(engine.session().unwrap().ticks, 1);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = started(GameConfig::small());
        place_food(&mut engine, Cell::new(0, 0), FoodKind::Normal);

        let result = engine.tick();

        assert!(!result.terminated);
        assert_eq!(result.info.ate_food, None);
        assert_eq!(engine.session().unwrap().snake.head(), Cell::new(6, 5));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = started(GameConfig::small());
        place_food(&mut engine, Cell::new(6, 5), FoodKind::Normal);

        let result = engine.tick();
        let session = engine.session().unwrap();

        assert_eq!(result.info.ate_food, Some(FoodKind::Normal));
        assert_eq!(session.score, 10);
        assert_eq!(session.food_eaten, 1);
        // Growth shows up on the next advance
        assert_eq!(session.snake.len(), 3);
        assert!(session.snake.is_growing());
        assert!(!session.snake.occupies(session.food.position()));
    }

    #[test]
    fn test_special_food_scores_fifty() {
        let mut engine = started(GameConfig::small());
        place_food(&mut engine, Cell::new(6, 5), FoodKind::Special);

        engine.tick();
        assert_eq!(engine.session().unwrap().score, 50);
    }

    #[test]
    fn test_level_up_every_five() {
        let mut engine = started(GameConfig::new(30));

        for eaten in 1..=10u32 {
            let ahead = engine.session().unwrap().snake.head().moved_by(1, 0);
            place_food(&mut engine, ahead, FoodKind::Normal);
            let result = engine.tick();
            let session = engine.session().unwrap();

            assert_eq!(session.food_eaten, eaten);
            assert_eq!(result.info.leveled_up, eaten % 5 == 0);
            assert_eq!(session.level, 1 + eaten / 5);
            assert_eq!(session.speed, 100 - 5 * (eaten / 5));
        }
    }

    #[test]
    fn test_speed_floor() {
        let mut engine = started(GameConfig::new(30).with_difficulty(Difficulty::Hard));
        engine.session_mut().unwrap().speed = 32;
        engine.session_mut().unwrap().food_eaten = 4;
        place_food(&mut engine, Cell::new(16, 15), FoodKind::Normal);

        let result = engine.tick();

        assert!(result.info.leveled_up);
        assert_eq!(engine.session().unwrap().speed, 30);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = started(GameConfig::small());
        {
            let session = engine.session_mut().unwrap();
            session.snake = Snake::new(Cell::new(0, 5), Direction::Left, 3);
            session.food = Food::at(Cell::new(8, 8), FoodKind::Normal);
        }

        let result = engine.tick();

        assert!(result.terminated);
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert!(!engine.is_ticking());
    }

    #[test]
    fn test_self_collision() {
        let mut engine = started(GameConfig::small());
        {
            let session = engine.session_mut().unwrap();
            session.snake = Snake::new(Cell::new(5, 5), Direction::Right, 5);
            session.food = Food::at(Cell::new(0, 0), FoodKind::Normal);
        }

        // Right, Down, Left, Up curls the head back onto the body
        engine.tick();
        engine.set_direction(Direction::Down);
        engine.tick();
        engine.set_direction(Direction::Left);
        engine.tick();
        engine.set_direction(Direction::Up);
        let result = engine.tick();

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_game_over_saves_score() {
        let mut engine = started(GameConfig::small());
        place_food(&mut engine, Cell::new(6, 5), FoodKind::Special);
        engine.tick();
        engine.session_mut().unwrap().food = Food::at(Cell::new(0, 0), FoodKind::Normal);

        while engine.phase() == Phase::Playing {
            engine.tick();
        }

        let summary = engine.game_over().unwrap();
        assert_eq!(summary.score, 50);
        assert_eq!(summary.food_eaten, 1);
        assert!(summary.new_high_score);
        assert_eq!(engine.store().top_score(), 50);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = started(GameConfig::small());
        place_food(&mut engine, Cell::new(0, 0), FoodKind::Normal);

        engine.set_direction(Direction::Left);
        engine.tick();

        let snake = &engine.session().unwrap().snake;
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Cell::new(6, 5));
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = started(GameConfig::small());
        engine.session_mut().unwrap().snake = Snake::new(Cell::new(9, 5), Direction::Right, 3);
        engine.tick();
        let ticks_before = engine.session().unwrap().ticks;

        let result = engine.tick();

        assert_eq!(result, StepResult::default());
        assert_eq!(engine.session().unwrap().ticks, ticks_before);
    }

    #[test]
    fn test_update_respects_speed_interval() {
        let mut engine = engine(GameConfig::small());
        let t0 = Instant::now();
        engine.start(t0);
        place_food(&mut engine, Cell::new(0, 0), FoodKind::Normal);

        assert!(engine.update(t0 + Duration::from_millis(16)).is_none());
        assert!(engine.update(t0 + Duration::from_millis(99)).is_none());
        assert!(engine.update(t0 + Duration::from_millis(100)).is_some());
        assert!(engine.update(t0 + Duration::from_millis(150)).is_none());
        assert_eq!(engine.session().unwrap().ticks, 1);
    }

    #[test]
    fn test_pause_freezes_and_resume_resets_clock() {
        let mut engine = engine(GameConfig::small());
        let t0 = Instant::now();
        engine.start(t0);
        place_food(&mut engine, Cell::new(0, 0), FoodKind::Normal);

        assert!(engine.pause());
        assert_eq!(engine.phase(), Phase::Paused);
        engine.set_direction(Direction::Up);
        assert!(engine.update(t0 + Duration::from_secs(5)).is_none());
        assert_eq!(engine.tick(), StepResult::default());
        assert_eq!(engine.session().unwrap().ticks, 0);
        assert_eq!(
            engine.session().unwrap().snake.pending_direction(),
            Direction::Right
        );

        let resumed = t0 + Duration::from_secs(10);
        assert!(engine.resume(resumed));
        let early = resumed + Duration::from_millis(50);
        let due = resumed + Duration::from_millis(100);
        assert!(engine.update(early).is_none());
        assert!(engine.update(due).is_some());
        assert_eq!(engine.session().unwrap().ticks, 1);
    }

    #[test]
    fn test_menu_stops_ticking() {
        let mut engine = started(GameConfig::small());
        assert!(engine.menu());

        assert_eq!(engine.phase(), Phase::Menu);
        assert!(!engine.is_ticking());
        assert!(engine.session().is_none());
        let later = Instant::now() + Duration::from_secs(1);
        assert!(engine.update(later).is_none());
        assert!(!engine.menu());
    }

    #[test]
    fn test_commands() {
        let mut engine = engine(GameConfig::small());
        let now = Instant::now();

        assert!(!engine.handle_command(Command::TogglePause, now));
        assert!(engine.handle_command(Command::Start, now));
        assert!(engine.handle_command(Command::TogglePause, now));
        assert_eq!(engine.phase(), Phase::Paused);
        assert!(engine.handle_command(Command::TogglePause, now));
        assert_eq!(engine.phase(), Phase::Playing);
        assert!(engine.handle_command(Command::Menu, now));
        assert_eq!(engine.phase(), Phase::Menu);
    }

    #[test]
    fn test_difficulty_applies_on_next_start() {
        let mut engine = engine(GameConfig::small());
        assert!(engine.set_difficulty(Difficulty::Easy));
        engine.start(Instant::now());
        assert_eq!(engine.session().unwrap().speed, 150);

        assert!(!engine.set_difficulty(Difficulty::Hard));
        assert_eq!(engine.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_play_again_from_game_over() {
        let mut engine = started(GameConfig::small());
        engine.session_mut().unwrap().snake = Snake::new(Cell::new(9, 5), Direction::Right, 3);
        engine.tick();
        assert_eq!(engine.phase(), Phase::GameOver);

        assert!(engine.start(Instant::now()));
        assert_eq!(engine.phase(), Phase::Playing);
        assert!(engine.game_over().is_none());
        assert_eq!(engine.session().unwrap().snake.head(), Cell::new(5, 5));
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut engine = engine(GameConfig::small());
        let idle = engine.snapshot();
        assert_eq!(idle.phase, Phase::Menu);
        assert!(idle.snake.is_empty());
        assert!(idle.food.is_none());

        engine.start(Instant::now());
        place_food(&mut engine, Cell::new(2, 2), FoodKind::Special);
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.phase, Phase::Playing);
        assert_eq!(snapshot.grid_size, 10);
        assert_eq!(snapshot.head(), Some(Cell::new(5, 5)));
        assert_eq!(snapshot.food, Some((Cell::new(2, 2), FoodKind::Special)));
    }
}
