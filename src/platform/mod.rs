//! Platform abstraction layer
//!
//! Handles everything outside the simulation:
//! - Keyboard sampling
//! - Drawing surface and frame presentation (with frame pacing)
//! - The frame loop itself
//!
//! Two platforms ship: a crossterm terminal and a headless runner for
//! scripted, output-free runs.

pub mod headless;
pub mod terminal;

use anyhow::Result;
use log::{debug, info};

use crate::input::{KeySet, tick_input};
use crate::renderer::{Canvas, Image, draw_frame};
use crate::sim::{GameEvent, GameWorld, Snapshot, tick};

pub use headless::Headless;
pub use terminal::Terminal;

/// A window-like collaborator: keyboard in, frames out
pub trait Platform {
    type Canvas: Canvas;

    /// Sample the keyboard for this frame
    fn poll_keys(&mut self) -> Result<KeySet>;

    /// Surface for this frame's draw calls
    fn canvas(&mut self) -> &mut Self::Canvas;

    /// Show the finished frame and wait out the rest of the frame budget
    fn present(&mut self, snapshot: &Snapshot) -> Result<()>;
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::ModeChanged { from, to } => info!("{} -> {}", from.as_str(), to.as_str()),
        GameEvent::Scored { side, score } => {
            info!("Point {:?}: PC {} - {} Player", side, score.pc, score.player)
        }
        GameEvent::WallBounce => debug!("Wall bounce"),
        GameEvent::PaddleHit { side } => debug!("{:?} paddle hit", side),
    }
}

/// Run the frame loop until the platform reports Quit.
///
/// One iteration: poll input, tick the simulation, draw, present.
pub fn run<P: Platform>(platform: &mut P, world: &mut GameWorld, splash: &Image) -> Result<()> {
    info!("Starting frame loop (seed {})", world.seed);
    loop {
        let keys = platform.poll_keys()?;
        if keys.quit_requested() {
            info!("Quit after {} frames", world.frame);
            return Ok(());
        }

        tick(world, &tick_input(&keys));
        for event in world.drain_events() {
            log_event(&event);
        }

        let snapshot = world.snapshot();
        draw_frame(platform.canvas(), &snapshot, splash);
        platform.present(&snapshot)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyMask};
    use crate::sim::GameMode;

    fn splash() -> Image {
        Image::from_text("PONG").unwrap()
    }

    #[test]
    fn test_headless_run_starts_and_stops() {
        let mut world = GameWorld::new(11);
        let mut platform = Headless::new(100);
        run(&mut platform, &mut world, &splash()).unwrap();

        assert_eq!(world.frame, 100);
        assert_eq!(world.mode, GameMode::Running);
        assert_eq!(platform.frames_presented(), 100);
        assert_eq!(platform.last_snapshot(), Some(world.snapshot()));
    }

    #[test]
    fn test_scripted_pause_stops_the_ball() {
        let mut world = GameWorld::new(11);
        let script = vec![
            [Key::Space].into_iter().collect(),
            KeyMask::EMPTY,
            [Key::P].into_iter().collect(),
            [Key::P].into_iter().collect(),
            [Key::P].into_iter().collect(),
        ];
        let mut platform = Headless::new(40).with_script(script);
        run(&mut platform, &mut world, &splash()).unwrap();

        // Held P toggles once
        assert_eq!(world.mode, GameMode::Paused);
    }

    #[test]
    fn test_quit_before_first_frame() {
        let mut world = GameWorld::new(11);
        let mut platform = Headless::new(0);
        run(&mut platform, &mut world, &splash()).unwrap();
        assert_eq!(world.frame, 0);
        assert_eq!(platform.frames_presented(), 0);
    }
}
