//! Headless platform
//!
//! Replays a script of held keys, draws into nothing and never sleeps.
//! Requests Quit once its frame budget is spent.

use anyhow::Result;
use glam::IVec2;

use super::Platform;
use crate::input::{Key, KeyMask, KeySet, KeyTracker};
use crate::renderer::{Canvas, Color, Image};
use crate::sim::{Rect, Snapshot};

/// Canvas that only counts draw calls
#[derive(Debug, Default)]
pub struct NullCanvas {
    pub draw_calls: u64,
}

impl Canvas for NullCanvas {
    fn clear(&mut self, _color: Color) {
        self.draw_calls += 1;
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.draw_calls += 1;
    }

    fn draw_line(&mut self, _from: IVec2, _to: IVec2, _color: Color) {
        self.draw_calls += 1;
    }

    fn draw_image(&mut self, _image: &Image, _dest: Rect) {
        self.draw_calls += 1;
    }
}

pub struct Headless {
    /// Held keys per frame; frames past the end hold nothing
    script: Vec<KeyMask>,
    frames: u64,
    polled: u64,
    presented: u64,
    tracker: KeyTracker,
    canvas: NullCanvas,
    last: Option<Snapshot>,
}

impl Headless {
    /// Run `frames` frames, holding Start on the first one
    pub fn new(frames: u64) -> Self {
        Self {
            script: vec![[Key::Space].into_iter().collect()],
            frames,
            polled: 0,
            presented: 0,
            tracker: KeyTracker::new(),
            canvas: NullCanvas::default(),
            last: None,
        }
    }

    pub fn with_script(mut self, script: Vec<KeyMask>) -> Self {
        self.script = script;
        self
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    pub fn draw_calls(&self) -> u64 {
        self.canvas.draw_calls
    }

    pub fn last_snapshot(&self) -> Option<Snapshot> {
        self.last
    }
}

impl Platform for Headless {
    type Canvas = NullCanvas;

    fn poll_keys(&mut self) -> Result<KeySet> {
        let held = if self.polled >= self.frames {
            [Key::Q].into_iter().collect()
        } else {
            self.script
                .get(self.polled as usize)
                .copied()
                .unwrap_or(KeyMask::EMPTY)
        };
        self.polled += 1;
        Ok(self.tracker.update(held))
    }

    fn canvas(&mut self) -> &mut NullCanvas {
        &mut self.canvas
    }

    fn present(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.presented += 1;
        self.last = Some(*snapshot);
        Ok(())
    }
}
