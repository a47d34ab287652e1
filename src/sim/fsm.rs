//! Game state machine
//!
//! Owns mode transitions. UX keys (start/pause/cancel) are handled here as
//! discrete actions; movement keys only ever move paddles and never change the
//! mode. Scoring transitions are triggered from the physics step.

use log::{debug, info};

use super::physics::{move_paddle, reset_positions};
use super::state::{GameEvent, GameMode, GameWorld, Side};
use super::tick::TickInput;
use crate::consts::WIN_THRESHOLD;

/// Discrete UX actions that can trigger a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UxAction {
    Start,
    Pause,
    Cancel,
}

impl UxAction {
    /// Evaluation order when several fire in one frame
    pub const PRIORITY: [UxAction; 3] = [UxAction::Start, UxAction::Pause, UxAction::Cancel];
}

/// Next mode for an action, or `None` if the action does nothing in `mode`
pub fn next_mode(mode: GameMode, action: UxAction) -> Option<GameMode> {
    use GameMode::*;

    match (mode, action) {
        (Splash, UxAction::Start) => Some(Running),

        (Running, UxAction::Pause) => Some(Paused),
        (Paused, UxAction::Pause) => Some(Running),

        // Abandon the match
        (Running | Paused, UxAction::Cancel) => Some(Splash),

        // Match over: play again or back to the title
        (PlayerWin | PcWin, UxAction::Start) => Some(Running),
        (PlayerWin | PcWin, UxAction::Cancel) => Some(Splash),

        _ => None,
    }
}

fn set_mode(world: &mut GameWorld, to: GameMode) {
    let from = world.mode;
    if from == to {
        return;
    }
    debug!("Mode {:?} -> {:?}", from, to);
    world.mode = to;
    world.events.push(GameEvent::ModeChanged { from, to });
}

/// Apply at most one UX transition for this frame.
///
/// Looks only at the start/pause/cancel edges of `input`; paddle directions
/// are ignored. Returns the action that fired, if any.
pub fn handle_ux_input(world: &mut GameWorld, input: &TickInput) -> Option<UxAction> {
    let (action, to) = UxAction::PRIORITY
        .into_iter()
        .filter(|&action| input.fired(action))
        .find_map(|action| next_mode(world.mode, action).map(|to| (action, to)))?;

    if action == UxAction::Start {
        // Every start is a fresh match
        world.score.reset();
        reset_positions(world);
    }
    set_mode(world, to);
    Some(action)
}

/// Move paddles for held direction keys. Does nothing unless Running.
pub fn handle_movement_input(world: &mut GameWorld, input: &TickInput) {
    if world.mode != GameMode::Running {
        return;
    }
    for side in Side::ALL {
        let direction = input.direction(side);
        if direction != 0 {
            move_paddle(world, side, direction);
        }
    }
}

/// Credit `side` with a point, ending the match at the win threshold, and
/// re-serve from the center either way.
pub fn award_point(world: &mut GameWorld, side: Side) {
    let points = world.score.increment(side);
    world.events.push(GameEvent::Scored {
        side,
        score: world.score,
    });
    info!(
        "{:?} scores: PC {} - {} Player",
        side, world.score.pc, world.score.player
    );

    if points >= WIN_THRESHOLD {
        info!("{:?} wins the match", side);
        world.score.reset();
        set_mode(world, side.win_mode());
    } else {
        set_mode(world, GameMode::Running);
    }

    reset_positions(world);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn press(action: UxAction) -> TickInput {
        TickInput {
            start: action == UxAction::Start,
            pause: action == UxAction::Pause,
            cancel: action == UxAction::Cancel,
            ..Default::default()
        }
    }

    #[test]
    fn test_transition_table() {
        use GameMode::*;
        use UxAction::*;

        assert_eq!(next_mode(Splash, Start), Some(Running));
        assert_eq!(next_mode(Splash, Pause), None);
        assert_eq!(next_mode(Splash, Cancel), None);
        assert_eq!(next_mode(Running, Start), None);
        assert_eq!(next_mode(Running, Pause), Some(Paused));
        assert_eq!(next_mode(Running, Cancel), Some(Splash));
        assert_eq!(next_mode(Paused, Pause), Some(Running));
        assert_eq!(next_mode(Paused, Cancel), Some(Splash));
        assert_eq!(next_mode(Paused, Start), None);
        assert_eq!(next_mode(PlayerWin, Start), Some(Running));
        assert_eq!(next_mode(PcWin, Cancel), Some(Splash));
        assert_eq!(next_mode(PcWin, Pause), None);
    }

    #[test]
    fn test_start_resets_match() {
        let mut world = GameWorld::new(5);
        world.score.pc = 4;
        world.ball.pos = IVec2::new(1, 1);
        world.paddles[1].pos.y = 10;

        assert_eq!(handle_ux_input(&mut world, &press(UxAction::Start)), Some(UxAction::Start));
        assert_eq!(world.mode, GameMode::Running);
        assert_eq!(world.score.pc, 0);
        assert_eq!(world.ball.pos, IVec2::new(312, 232));
        assert_eq!(world.paddles[1].pos.y, 200);
        assert_eq!(world.ball.vel.abs(), IVec2::splat(2));
        assert_eq!(
            world.events,
            vec![GameEvent::ModeChanged {
                from: GameMode::Splash,
                to: GameMode::Running
            }]
        );
    }

    #[test]
    fn test_pause_does_not_touch_positions() {
        let mut world = GameWorld::new(5);
        handle_ux_input(&mut world, &press(UxAction::Start));
        let before = world.snapshot();

        handle_ux_input(&mut world, &press(UxAction::Pause));
        assert_eq!(world.mode, GameMode::Paused);
        let after = world.snapshot();
        assert_eq!(after.ball, before.ball);
        assert_eq!(after.paddles, before.paddles);

        handle_ux_input(&mut world, &press(UxAction::Pause));
        assert_eq!(world.mode, GameMode::Running);
    }

    #[test]
    fn test_ux_ignores_movement_keys() {
        let mut world = GameWorld::new(5);
        let input = TickInput {
            player_direction: 1,
            pc_direction: -1,
            ..Default::default()
        };
        assert_eq!(handle_ux_input(&mut world, &input), None);
        assert_eq!(world.mode, GameMode::Splash);
        assert_eq!(world.paddles[0].pos.y, 200);
        assert_eq!(world.paddles[1].pos.y, 200);
    }

    #[test]
    fn test_priority_picks_first_valid_action() {
        let mut world = GameWorld::new(5);
        world.mode = GameMode::Running;
        let input = TickInput {
            start: true,
            pause: true,
            cancel: true,
            ..Default::default()
        };
        // Start is not valid while Running, so Pause wins
        assert_eq!(handle_ux_input(&mut world, &input), Some(UxAction::Pause));
        assert_eq!(world.mode, GameMode::Paused);
    }

    #[test]
    fn test_movement_only_while_running() {
        let mut world = GameWorld::new(5);
        let input = TickInput {
            player_direction: -1,
            pc_direction: 1,
            ..Default::default()
        };

        world.mode = GameMode::Paused;
        handle_movement_input(&mut world, &input);
        assert_eq!(world.paddles[1].pos.y, 200);

        world.mode = GameMode::Running;
        handle_movement_input(&mut world, &input);
        assert_eq!(world.paddle(Side::Player).pos.y, 195);
        assert_eq!(world.paddle(Side::Pc).pos.y, 205);
        assert_eq!(world.mode, GameMode::Running);
    }

    #[test]
    fn test_scoring_below_threshold_keeps_running() {
        let mut world = GameWorld::new(5);
        world.mode = GameMode::Running;
        for expected in 1..WIN_THRESHOLD {
            award_point(&mut world, Side::Player);
            assert_eq!(world.score.player, expected);
            assert_eq!(world.mode, GameMode::Running);
        }
    }

    #[test]
    fn test_scoring_threshold_wins_and_resets() {
        let mut world = GameWorld::new(5);
        world.mode = GameMode::Running;
        award_point(&mut world, Side::Player);
        for _ in 0..WIN_THRESHOLD {
            world.events.clear();
            award_point(&mut world, Side::Pc);
        }
        assert_eq!(world.mode, GameMode::PcWin);
        assert_eq!(world.score.pc, 0);
        assert_eq!(world.score.player, 0);
        assert_eq!(
            world.events,
            vec![
                GameEvent::Scored {
                    side: Side::Pc,
                    score: crate::sim::Score { pc: 10, player: 1 },
                },
                GameEvent::ModeChanged {
                    from: GameMode::Running,
                    to: GameMode::PcWin,
                },
            ]
        );
        assert_eq!(world.ball.pos, IVec2::new(312, 232));
    }

    #[test]
    fn test_player_win_then_play_again() {
        let mut world = GameWorld::new(5);
        world.mode = GameMode::Running;
        for _ in 0..WIN_THRESHOLD {
            award_point(&mut world, Side::Player);
        }
        assert_eq!(world.mode, GameMode::PlayerWin);

        handle_ux_input(&mut world, &press(UxAction::Start));
        assert_eq!(world.mode, GameMode::Running);

        handle_ux_input(&mut world, &press(UxAction::Cancel));
        assert_eq!(world.mode, GameMode::Splash);
    }
}
