//! Collision detection and response for the rectangular arena
//!
//! Contact is decided on the ball's position *before* it moves, and the
//! (possibly reflected) velocity is applied in the same tick. A bounce is
//! therefore visible one frame after it was resolved.

use glam::IVec2;
use log::debug;
use rand::Rng;

use super::fsm;
use super::state::{Ball, GameEvent, GameWorld, Paddle, Rect, Side};
use crate::consts::*;

/// Outcome of a contact check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Nothing touched
    None,
    /// Ball left the arena; the given side earns the point
    Scored(Side),
    /// Ball hit the top or bottom wall
    Wall,
    /// Ball was returned by the given side's paddle
    Paddle(Side),
}

/// Center both paddles and the ball, and serve with a fresh random velocity.
///
/// dx is ±BALL_SPEED with even odds; dy is -BALL_SPEED one time in four and
/// +BALL_SPEED otherwise.
pub fn reset_positions(world: &mut GameWorld) {
    for paddle in &mut world.paddles {
        paddle.recenter();
    }
    world.ball.recenter();

    let (sign_x, sign_y) = {
        let rng = world.rng();
        let sign_x = if rng.random_range(0..2) == 0 { -1 } else { 1 };
        let sign_y = if rng.random_range(0..4) == 0 { -1 } else { 1 };
        (sign_x, sign_y)
    };
    world.ball.vel = IVec2::new(sign_x, sign_y) * BALL_SPEED;
    debug!("Serve: ball velocity {:?}", world.ball.vel);
}

/// Move a paddle one step up (`direction < 0`) or down (`direction > 0`).
///
/// The move is dropped entirely if it would carry the paddle past the padding
/// at either edge, so y always stays in `[Paddle::MIN_Y, Paddle::MAX_Y]`.
pub fn move_paddle(world: &mut GameWorld, side: Side, direction: i32) {
    let direction = direction.signum();
    let paddle = world.paddle_mut(side);
    let target = paddle.pos.y + direction * PADDLE_STEP;

    if direction < 0 && target < Paddle::MIN_Y {
        return;
    }
    if direction > 0 && target > Paddle::MAX_Y {
        return;
    }
    paddle.pos.y = target;
}

/// Change to dy when the ball's top edge meets a paddle at `contact_y`.
///
/// Zones are measured from the paddle top with strict comparisons:
///
/// | offset from top         | dy  |
/// |-------------------------|-----|
/// | `<= H/4`                | +3  |
/// | `> H/4`, `<= H/2`       | +2  |
/// | `> H/2`, `<= H/2 + H/4` | -1  |
/// | `> H/2 + H/4`           | -3  |
pub fn dy_adjustment(contact_y: i32, paddle: &Rect) -> i32 {
    let offset = contact_y - paddle.y;
    let half = paddle.h / 2;
    let quarter = paddle.h / 4;

    if offset > half + quarter {
        -3
    } else if offset > half {
        -1
    } else if offset > quarter {
        2
    } else {
        3
    }
}

/// Ball's top edge strictly inside the paddle's vertical span
#[inline]
fn within_span(paddle: &Rect, y: i32) -> bool {
    y > paddle.y && y < paddle.bottom()
}

/// Check the ball against arena edges and paddles and resolve the first hit.
///
/// Priority: left edge, right edge, top/bottom wall, player paddle, PC paddle.
/// Only the player paddle alters dy by contact zone.
pub fn check_and_resolve_contact(ball: &mut Ball, paddles: &[Paddle; 2]) -> Contact {
    let b = ball.rect();

    if b.x < 0 {
        return Contact::Scored(Side::Player);
    }
    if b.right() > ARENA_WIDTH {
        return Contact::Scored(Side::Pc);
    }
    if b.y < 0 || b.bottom() > ARENA_HEIGHT {
        ball.vel.y = ball.vel.y.saturating_neg();
        return Contact::Wall;
    }

    let player = paddles[Side::Player.index()].rect();
    if b.right() > player.x - CONTACT_BAND {
        if within_span(&player, b.y) {
            ball.vel.x = -ball.vel.x;
            ball.vel.y = ball.vel.y.saturating_add(dy_adjustment(b.y, &player));
            return Contact::Paddle(Side::Player);
        }
        return Contact::None;
    }

    let pc = paddles[Side::Pc.index()].rect();
    if b.x < pc.right() && within_span(&pc, b.y) {
        ball.vel.x = -ball.vel.x;
        return Contact::Paddle(Side::Pc);
    }

    Contact::None
}

/// Advance the ball by one tick.
///
/// Resolves contact first (awarding a point through the state machine when the
/// ball leaves the arena), then always applies the current velocity.
pub fn advance(world: &mut GameWorld) -> Contact {
    let contact = check_and_resolve_contact(&mut world.ball, &world.paddles);
    match contact {
        Contact::Scored(side) => fsm::award_point(world, side),
        Contact::Wall => world.events.push(GameEvent::WallBounce),
        Contact::Paddle(side) => world.events.push(GameEvent::PaddleHit { side }),
        Contact::None => {}
    }

    world.ball.step();
    contact
}
