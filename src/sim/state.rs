//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameWorld`]; the renderer only
//! ever sees a [`Snapshot`].

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for Start
    #[default]
    Splash,
    /// Active gameplay
    Running,
    /// Game is paused (positions frozen)
    Paused,
    /// Player reached the win threshold
    PlayerWin,
    /// PC reached the win threshold
    PcWin,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Splash => "Splash",
            GameMode::Running => "Running",
            GameMode::Paused => "Paused",
            GameMode::PlayerWin => "Player wins",
            GameMode::PcWin => "PC wins",
        }
    }

    /// Whether the playfield should be drawn in this mode
    pub fn shows_playfield(&self) -> bool {
        !matches!(self, GameMode::Splash)
    }
}

/// Which side of the arena a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle
    Pc,
    /// Right paddle
    Player,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Pc, Side::Player];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Pc => 0,
            Side::Player => 1,
        }
    }

    /// Mode entered when this side wins the match
    pub fn win_mode(self) -> GameMode {
        match self {
            Side::Pc => GameMode::PcWin,
            Side::Player => GameMode::PlayerWin,
        }
    }
}

/// Axis-aligned rectangle in arena pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered in the arena
    pub const fn centered(w: i32, h: i32) -> Self {
        Self::new((ARENA_WIDTH - w) / 2, (ARENA_HEIGHT - h) / 2, w, h)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    fn from_parts(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }
}

/// Match score, both counters in `[0, WIN_THRESHOLD]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub pc: u32,
    pub player: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Pc => self.pc,
            Side::Player => self.player,
        }
    }

    /// Add a point for `side` and return the new count
    pub fn increment(&mut self, side: Side) -> u32 {
        let counter = match side {
            Side::Pc => &mut self.pc,
            Side::Player => &mut self.player,
        };
        *counter += 1;
        *counter
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A paddle; x is fixed per side, only y moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub pos: IVec2,
    pub size: IVec2,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Pc => PC_PADDLE_X,
            Side::Player => PLAYER_PADDLE_X,
        };
        Self {
            side,
            pos: IVec2::new(x, 0),
            size: IVec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    /// Lowest y the paddle may occupy
    pub const MIN_Y: i32 = PADDING;
    /// Highest y the paddle may occupy
    pub const MAX_Y: i32 = ARENA_HEIGHT - PADDLE_HEIGHT - PADDING;

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.pos, self.size)
    }

    /// Center vertically
    pub fn recenter(&mut self) {
        self.pos.y = (ARENA_HEIGHT - self.size.y) / 2;
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    pub size: IVec2,
    /// Pixels per tick; dy is never clamped
    pub vel: IVec2,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: IVec2::ZERO,
            size: IVec2::splat(BALL_SIZE),
            vel: IVec2::ZERO,
        }
    }
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.pos, self.size)
    }

    /// Center in the arena (velocity untouched)
    pub fn recenter(&mut self) {
        self.pos = IVec2::new(
            (ARENA_WIDTH - self.size.x) / 2,
            (ARENA_HEIGHT - self.size.y) / 2,
        );
    }

    /// Apply one tick of velocity
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
    }
}

/// Something that happened during the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ModeChanged { from: GameMode, to: GameMode },
    Scored { side: Side, score: Score },
    WallBounce,
    PaddleHit { side: Side },
}

/// Read-only view handed to the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub score: Score,
    /// Indexed by [`Side::index`]
    pub paddles: [Rect; 2],
    pub ball: Rect,
    pub frame: u64,
}

/// Complete game state, owned by the frame loop
#[derive(Debug, Clone)]
pub struct GameWorld {
    /// Run seed for reproducibility
    pub seed: u64,
    pub mode: GameMode,
    pub score: Score,
    /// Indexed by [`Side::index`]
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    /// Frames simulated so far
    pub frame: u64,
    /// Events raised during the current tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameWorld {
    /// Create a world in Splash mode with default geometry
    pub fn new(seed: u64) -> Self {
        let mut world = Self {
            seed,
            mode: GameMode::Splash,
            score: Score::default(),
            paddles: [Paddle::new(Side::Pc), Paddle::new(Side::Player)],
            ball: Ball::default(),
            frame: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        for paddle in &mut world.paddles {
            paddle.recenter();
        }
        world.ball.recenter();
        world
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Take the events raised since the last tick started
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            score: self.score,
            paddles: [self.paddles[0].rect(), self.paddles[1].rect()],
            ball: self.ball.rect(),
            frame: self.frame,
        }
    }
}
