//! One simulation tick per frame
//!
//! Order: UX transitions, then (only while Running) paddle movement and the
//! ball advance. Paused, Splash and the win screens skip physics entirely.

use super::fsm::{UxAction, handle_movement_input, handle_ux_input};
use super::physics::advance;
use super::state::{GameMode, GameWorld, Side};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Start/confirm pressed this frame
    pub start: bool,
    /// Pause toggle pressed this frame
    pub pause: bool,
    /// Cancel/back pressed this frame
    pub cancel: bool,
    /// Held direction for the left paddle (-1 up, 0 none, +1 down)
    pub pc_direction: i32,
    /// Held direction for the right paddle (-1 up, 0 none, +1 down)
    pub player_direction: i32,
}

impl TickInput {
    /// Whether the key for `action` went down this frame
    pub fn fired(&self, action: UxAction) -> bool {
        match action {
            UxAction::Start => self.start,
            UxAction::Pause => self.pause,
            UxAction::Cancel => self.cancel,
        }
    }

    pub fn direction(&self, side: Side) -> i32 {
        match side {
            Side::Pc => self.pc_direction,
            Side::Player => self.player_direction,
        }
    }
}

/// Advance the game by one frame
pub fn tick(world: &mut GameWorld, input: &TickInput) {
    world.events.clear();
    world.frame += 1;

    handle_ux_input(world, input);

    if world.mode != GameMode::Running {
        return;
    }

    handle_movement_input(world, input);
    advance(world);
}
