//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, integer positions only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod fsm;
pub mod physics;
pub mod state;
pub mod tick;

pub use fsm::{UxAction, award_point, handle_movement_input, handle_ux_input, next_mode};
pub use physics::{Contact, advance, check_and_resolve_contact, dy_adjustment, move_paddle, reset_positions};
pub use state::{Ball, GameEvent, GameMode, GameWorld, Paddle, Rect, Score, Side, Snapshot};
pub use tick::{TickInput, tick};
