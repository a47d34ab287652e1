//! Keyboard input
//!
//! Platforms report a [`KeySet`] each frame: which named keys are held, and
//! which went down this frame. UX actions read the key-down edges so a held
//! key fires once; paddle movement reads the held state.

use crate::sim::TickInput;

/// Named keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    P,
    Escape,
    Q,
    Up,
    Down,
    K,
    J,
    W,
    S,
}

impl Key {
    pub const ALL: [Key; 10] = [
        Key::Space,
        Key::P,
        Key::Escape,
        Key::Q,
        Key::Up,
        Key::Down,
        Key::K,
        Key::J,
        Key::W,
        Key::S,
    ];

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Map a typed character to a key (case-insensitive)
    pub fn from_char(c: char) -> Option<Key> {
        match c.to_ascii_lowercase() {
            ' ' => Some(Key::Space),
            'p' => Some(Key::P),
            'q' => Some(Key::Q),
            'k' => Some(Key::K),
            'j' => Some(Key::J),
            'w' => Some(Key::W),
            's' => Some(Key::S),
            _ => None,
        }
    }
}

/// Compact set of keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMask(u16);

impl KeyMask {
    pub const EMPTY: KeyMask = KeyMask(0);

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    /// Keys in `self` that are not in `other`
    pub fn difference(&self, other: KeyMask) -> KeyMask {
        KeyMask(self.0 & !other.0)
    }

    pub fn union(&self, other: KeyMask) -> KeyMask {
        KeyMask(self.0 | other.0)
    }
}

impl FromIterator<Key> for KeyMask {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut mask = KeyMask::EMPTY;
        for key in iter {
            mask.insert(key);
        }
        mask
    }
}

/// Keyboard state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet {
    /// Keys currently down
    pub held: KeyMask,
    /// Keys that went down this frame
    pub pressed: KeyMask,
}

impl KeySet {
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(key)
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key)
    }

    pub fn quit_requested(&self) -> bool {
        self.was_pressed(Key::Q)
    }
}

/// Derives key-down edges from successive held-state snapshots
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    previous: KeyMask,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, held: KeyMask) -> KeySet {
        let pressed = held.difference(self.previous);
        self.previous = held;
        KeySet { held, pressed }
    }
}

const PLAYER_UP: [Key; 2] = [Key::Up, Key::K];
const PLAYER_DOWN: [Key; 2] = [Key::Down, Key::J];
const PC_UP: [Key; 1] = [Key::W];
const PC_DOWN: [Key; 1] = [Key::S];

/// Held direction for one paddle's key pair; down wins if both are held
fn axis(keys: &KeySet, up: &[Key], down: &[Key]) -> i32 {
    if down.iter().any(|&k| keys.is_held(k)) {
        1
    } else if up.iter().any(|&k| keys.is_held(k)) {
        -1
    } else {
        0
    }
}

/// Translate a frame's keys into simulation input using the fixed bindings
pub fn tick_input(keys: &KeySet) -> TickInput {
    TickInput {
        start: keys.was_pressed(Key::Space),
        pause: keys.was_pressed(Key::P),
        cancel: keys.was_pressed(Key::Escape),
        pc_direction: axis(keys, &PC_UP, &PC_DOWN),
        player_direction: axis(keys, &PLAYER_UP, &PLAYER_DOWN),
    }
}

/// Controls hint for the HUD
pub const HINT: &str = "Space:start  P:pause  Esc:back  Q:quit  W/S:left  \u{2191}/\u{2193} K/J:right";
