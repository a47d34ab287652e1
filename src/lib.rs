//! Twin Pong - a two-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (game state machine, physics, collisions)
//! - `input`: Named keys, per-frame key snapshots and bindings
//! - `renderer`: Drawing surface abstraction and per-frame draw calls
//! - `platform`: Terminal/headless platforms and the frame loop
//! - `settings`: Runtime configuration

pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: i32 = 640;
    pub const ARENA_HEIGHT: i32 = 480;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 20;
    pub const PADDLE_HEIGHT: i32 = 80;
    /// Left (PC) paddle x position
    pub const PC_PADDLE_X: i32 = 10;
    /// Right (player) paddle x position
    pub const PLAYER_PADDLE_X: i32 = ARENA_WIDTH - 30;
    /// Gap kept between a paddle and the top/bottom edge
    pub const PADDING: i32 = 10;
    /// Pixels a paddle moves per frame while a key is held
    pub const PADDLE_STEP: i32 = 5;
    /// The player paddle reacts this many pixels before its face
    pub const CONTACT_BAND: i32 = 5;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 15;
    /// Magnitude of each velocity component after a reset
    pub const BALL_SPEED: i32 = 2;

    /// Points needed to win a match
    pub const WIN_THRESHOLD: u32 = 10;

    /// Splash image blit size
    pub const SPLASH_WIDTH: i32 = 100;
    pub const SPLASH_HEIGHT: i32 = 60;
}
