//! Terminal platform (crossterm)
//!
//! The arena is scaled onto the character grid; the bottom row is a HUD.
//! Terminals that support the keyboard enhancement protocol report key
//! releases, so held state is exact. Elsewhere a press counts as held for
//! `hold_timeout_ms`, and auto-repeat presses are not treated as new edges.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Print, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use glam::IVec2;
use log::warn;

use super::Platform;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::input::{HINT, Key, KeyMask, KeySet};
use crate::renderer::{Canvas, Color, Image};
use crate::settings::Settings;
use crate::sim::{Rect, Snapshot};

/// Without release events, a second press inside this window is auto-repeat
const REPEAT_WINDOW: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::BLACK,
};

/// Character grid the arena is drawn onto
#[derive(Debug)]
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Arena x to column (floor)
    fn col(&self, x: i32) -> i64 {
        (x as i64 * self.cols as i64).div_euclid(ARENA_WIDTH as i64)
    }

    /// Arena y to row (floor)
    fn row(&self, y: i32) -> i64 {
        (y as i64 * self.rows as i64).div_euclid(ARENA_HEIGHT as i64)
    }

    fn set(&mut self, col: i64, row: i64, cell: Cell) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells[idx] = cell;
    }

    pub fn char_at(&self, col: u16, row: u16) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize].ch)
    }

    fn row_cells(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }
}

impl Canvas for CellCanvas {
    fn clear(&mut self, _color: Color) {
        self.cells.fill(BLANK);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let c0 = self.col(rect.x);
        let r0 = self.row(rect.y);
        // Anything visible covers at least one cell
        let c1 = self.col(rect.right() - 1).max(c0);
        let r1 = self.row(rect.bottom() - 1).max(r0);
        let cell = Cell { ch: '█', fg: color };
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.set(col, row, cell);
            }
        }
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2, color: Color) {
        let (mut c, mut r) = (self.col(from.x), self.row(from.y));
        let (c_end, r_end) = (self.col(to.x), self.row(to.y));
        let ch = if c == c_end { '│' } else if r == r_end { '─' } else { '·' };
        let cell = Cell { ch, fg: color };

        // Bresenham over cells
        let dc = (c_end - c).abs();
        let dr = -(r_end - r).abs();
        let sc = if c < c_end { 1 } else { -1 };
        let sr = if r < r_end { 1 } else { -1 };
        let mut err = dc + dr;
        loop {
            self.set(c, r, cell);
            if c == c_end && r == r_end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dr {
                err += dr;
                c += sc;
            }
            if e2 <= dc {
                err += dc;
                r += sr;
            }
        }
    }

    fn draw_image(&mut self, image: &Image, dest: Rect) {
        // Character art is drawn at native size, centered on dest
        let center_col = self.col(dest.x + dest.w / 2);
        let center_row = self.row(dest.y + dest.h / 2);
        let left = center_col - image.width() as i64 / 2;
        let top = center_row - image.height() as i64 / 2;
        for (dy, line) in image.rows().iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    self.set(left + dx as i64, top + dy as i64, Cell { ch, fg: Color::WHITE });
                }
            }
        }
    }
}

fn to_term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn map_key(event: &KeyEvent) -> Option<Key> {
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Key::Q);
    }
    match event.code {
        KeyCode::Char(c) => Key::from_char(c),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// HUD text for the bottom row
fn hud_line(snapshot: &Snapshot) -> String {
    format!(
        " PC {:>2}  {:^11}  {:<2} Player  | {}",
        snapshot.score.pc,
        snapshot.mode.as_str(),
        snapshot.score.player,
        HINT
    )
}

pub struct Terminal {
    out: Stdout,
    canvas: CellCanvas,
    /// Exact held state is available
    reports_release: bool,
    /// When each key was last seen down
    held_at: [Option<Instant>; Key::ALL.len()],
    /// Last press (used to swallow auto-repeat)
    pressed_at: [Option<Instant>; Key::ALL.len()],
    hold_timeout: Duration,
    frame_budget: Duration,
    frame_start: Instant,
}

impl Terminal {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn new(settings: &Settings) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = io::stdout();
        let reports_release = match setup_screen(&mut out, settings) {
            Ok(reports_release) => reports_release,
            Err(e) => {
                restore(&mut out, false);
                return Err(e);
            }
        };

        let (cols, rows) = terminal::size().unwrap_or((80, 25));
        Ok(Self {
            out,
            canvas: CellCanvas::new(cols, rows.saturating_sub(1)),
            reports_release,
            held_at: [None; Key::ALL.len()],
            pressed_at: [None; Key::ALL.len()],
            hold_timeout: Duration::from_millis(settings.hold_timeout_ms),
            frame_budget: settings.frame_duration(),
            frame_start: Instant::now(),
        })
    }

    fn handle_key(&mut self, event: KeyEvent, pressed: &mut KeyMask, now: Instant) {
        let Some(key) = map_key(&event) else {
            return;
        };
        let idx = key as usize;
        match event.kind {
            KeyEventKind::Press => {
                let repeat = !self.reports_release
                    && self.pressed_at[idx].is_some_and(|t| now - t < REPEAT_WINDOW);
                if !repeat {
                    pressed.insert(key);
                }
                self.pressed_at[idx] = Some(now);
                self.held_at[idx] = Some(now);
            }
            KeyEventKind::Repeat => self.held_at[idx] = Some(now),
            KeyEventKind::Release => self.held_at[idx] = None,
        }
    }

    fn held_keys(&mut self, now: Instant) -> KeyMask {
        let mut held = KeyMask::EMPTY;
        for key in Key::ALL {
            let slot = &mut self.held_at[key as usize];
            if let Some(t) = *slot {
                if self.reports_release || now - t < self.hold_timeout {
                    held.insert(key);
                } else {
                    *slot = None;
                }
            }
        }
        held
    }
}

impl Platform for Terminal {
    type Canvas = CellCanvas;

    fn poll_keys(&mut self) -> Result<KeySet> {
        let now = Instant::now();
        let mut pressed = KeyMask::EMPTY;
        while event::poll(Duration::ZERO).context("failed to poll terminal events")? {
            match event::read().context("failed to read terminal event")? {
                Event::Key(key) => self.handle_key(key, &mut pressed, now),
                Event::Resize(cols, rows) => {
                    self.canvas.resize(cols, rows.saturating_sub(1));
                    queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
                }
                _ => {}
            }
        }
        let held = self.held_keys(now).union(pressed);
        Ok(KeySet { held, pressed })
    }

    fn canvas(&mut self) -> &mut CellCanvas {
        &mut self.canvas
    }

    fn present(&mut self, snapshot: &Snapshot) -> Result<()> {
        let (cols, rows) = self.canvas.size();
        for row in 0..rows {
            queue!(self.out, cursor::MoveTo(0, row))?;
            let mut current: Option<Color> = None;
            for cell in self.canvas.row_cells(row) {
                if current != Some(cell.fg) {
                    queue!(self.out, SetForegroundColor(to_term_color(cell.fg)))?;
                    current = Some(cell.fg);
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }

        let hud: String = hud_line(snapshot).chars().take(cols as usize).collect();
        queue!(
            self.out,
            cursor::MoveTo(0, rows),
            SetForegroundColor(style::Color::Grey),
            Print(format!("{:<width$}", hud, width = cols as usize)),
            style::ResetColor
        )?;
        self.out.flush().context("failed to draw frame")?;

        // Frame pacing
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_budget {
            std::thread::sleep(self.frame_budget - elapsed);
        }
        self.frame_start = Instant::now();
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore(&mut self.out, self.reports_release);
    }
}

/// Alternate screen, hidden cursor and (when supported) key release reports.
/// Returns whether releases will be reported.
fn setup_screen(out: &mut Stdout, settings: &Settings) -> Result<bool> {
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All)
    )
    .context("failed to set up the terminal screen")?;

    let reports_release = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
    if reports_release {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("failed to enable key release reporting")?;
    } else {
        warn!(
            "Terminal does not report key releases; holding keys for {} ms per press",
            settings.hold_timeout_ms
        );
    }
    Ok(reports_release)
}

/// Undo [`setup_screen`] and raw mode. Errors are ignored: this runs on the
/// way out, often while another error is being reported.
fn restore(out: &mut Stdout, reports_release: bool) {
    if reports_release {
        let _ = execute!(out, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(
        out,
        style::ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameMode, GameWorld};

    #[test]
    fn test_fill_rect_scales_to_cells() {
        // 64x48 cells: 10 arena pixels per cell
        let mut canvas = CellCanvas::new(64, 48);
        canvas.fill_rect(Rect::new(10, 200, 20, 80), Color::WHITE);
        assert_eq!(canvas.char_at(1, 20), Some('█'));
        assert_eq!(canvas.char_at(2, 27), Some('█'));
        assert_eq!(canvas.char_at(3, 20), Some(' '));
        assert_eq!(canvas.char_at(1, 28), Some(' '));
    }

    #[test]
    fn test_small_rect_still_visible() {
        let mut canvas = CellCanvas::new(20, 10);
        canvas.fill_rect(Rect::new(312, 232, 15, 15), Color::RED);
        assert_eq!(canvas.char_at(9, 4), Some('█'));
    }

    #[test]
    fn test_offscreen_rect_is_clipped() {
        let mut canvas = CellCanvas::new(64, 48);
        canvas.fill_rect(Rect::new(-30, -30, 15, 15), Color::RED);
        assert!((0..48).all(|r| (0..64).all(|c| canvas.char_at(c, r) == Some(' '))));
    }

    #[test]
    fn test_vertical_centerline() {
        let mut canvas = CellCanvas::new(64, 48);
        canvas.draw_line(IVec2::new(320, 0), IVec2::new(320, 480), Color::WHITE);
        assert!((0..48).all(|r| canvas.char_at(32, r) == Some('│')));
        assert_eq!(canvas.char_at(31, 10), Some(' '));
    }

    #[test]
    fn test_image_is_centered() {
        let mut canvas = CellCanvas::new(64, 48);
        let image = Image::from_text("ABCD\nEFGH").unwrap();
        canvas.draw_image(&image, crate::renderer::SPLASH_DEST);
        assert_eq!(canvas.char_at(30, 23), Some('A'));
        assert_eq!(canvas.char_at(33, 24), Some('H'));
    }

    #[test]
    fn test_hud_line() {
        let mut world = GameWorld::new(1);
        world.mode = GameMode::Paused;
        world.score.pc = 3;
        world.score.player = 7;
        let hud = hud_line(&world.snapshot());
        assert!(hud.starts_with(" PC  3"));
        assert!(hud.contains("Paused"));
        assert!(hud.contains("7  Player"));
    }

    #[test]
    fn test_map_key() {
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(map_key(&up), Some(Key::Up));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(Key::Q));
        let other = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(map_key(&other), None);
    }
}
