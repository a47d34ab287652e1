//! Rendering module
//!
//! The game does not own a window. It talks to a [`Canvas`] that accepts
//! filled rectangles, lines and image blits in arena pixel coordinates; the
//! platform decides how those reach the screen.

pub mod image;

use glam::IVec2;

use crate::consts::*;
use crate::sim::{Rect, Snapshot};
pub use image::Image;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

/// Drawing surface provided by the platform
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_line(&mut self, from: IVec2, to: IVec2, color: Color);
    /// Blit an image scaled into `dest`
    fn draw_image(&mut self, image: &Image, dest: Rect);
}

/// Where the splash image goes
pub const SPLASH_DEST: Rect = Rect::centered(SPLASH_WIDTH, SPLASH_HEIGHT);

/// Emit this frame's draw calls for `snapshot`
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, snapshot: &Snapshot, splash: &Image) {
    canvas.clear(Color::BLACK);

    if !snapshot.mode.shows_playfield() {
        canvas.draw_image(splash, SPLASH_DEST);
        return;
    }

    for paddle in &snapshot.paddles {
        canvas.fill_rect(*paddle, Color::WHITE);
    }
    canvas.draw_line(
        IVec2::new(ARENA_WIDTH / 2, 0),
        IVec2::new(ARENA_WIDTH / 2, ARENA_HEIGHT),
        Color::WHITE,
    );
    canvas.fill_rect(snapshot.ball, Color::RED);
}
