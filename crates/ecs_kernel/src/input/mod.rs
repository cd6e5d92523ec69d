//! Input state consumed by scenes
//!
//! Raw device polling belongs to the host. The host pushes what it saw through
//! an [`InputSource`] (or straight into a scene's [`InputState`]); game code
//! reads the last key and button with consume-once getters, so a single press
//! is observed by exactly one reader.

use std::collections::VecDeque;

use crate::foundation::math::Vec2;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// 0 key on the main row
    Digit0,
    /// 1 key on the main row
    Digit1,
    /// 2 key on the main row
    Digit2,
    /// 3 key on the main row
    Digit3,
    /// 4 key on the main row
    Digit4,
    /// 5 key on the main row
    Digit5,
    /// 6 key on the main row
    Digit6,
    /// 7 key on the main row
    Digit7,
    /// 8 key on the main row
    Digit8,
    /// 9 key on the main row
    Digit9,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Left shift
    Shift,
    /// Left control
    Control,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Per-scene input snapshot
///
/// Holds at most one pending key and one pending button. A newer press
/// replaces an unread older one. The cursor is a plain position and is never
/// consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    key: Option<KeyCode>,
    button: Option<MouseButton>,
    cursor: Vec2,
}

impl InputState {
    /// Create an empty input state with the cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press
    pub fn press_key(&mut self, key: KeyCode) {
        self.key = Some(key);
    }

    /// Drop the pending key if it is `key`
    pub fn release_key(&mut self, key: KeyCode) {
        if self.key == Some(key) {
            self.key = None;
        }
    }

    /// Record a mouse button press
    pub fn press_button(&mut self, button: MouseButton) {
        self.button = Some(button);
    }

    /// Drop the pending button if it is `button`
    pub fn release_button(&mut self, button: MouseButton) {
        if self.button == Some(button) {
            self.button = None;
        }
    }

    /// Move the cursor
    pub fn move_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Return and clear the pending key
    pub fn take_key(&mut self) -> Option<KeyCode> {
        self.key.take()
    }

    /// Return and clear the pending mouse button
    pub fn take_button(&mut self) -> Option<MouseButton> {
        self.button.take()
    }

    /// Pending key without consuming it
    pub fn peek_key(&self) -> Option<KeyCode> {
        self.key
    }

    /// Pending mouse button without consuming it
    pub fn peek_button(&self) -> Option<MouseButton> {
        self.button
    }

    /// Last known cursor position
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Merge everything a source has produced since the last call
    pub fn pump(&mut self, source: &mut dyn InputSource) {
        if let Some(key) = source.take_key() {
            self.press_key(key);
        }
        if let Some(button) = source.take_button() {
            self.press_button(button);
        }
        if let Some(cursor) = source.cursor() {
            self.move_cursor(cursor);
        }
    }
}

/// Host-side input collaborator
///
/// Key and button getters consume: a value is returned once and then cleared.
pub trait InputSource {
    /// Next key pressed since the last call
    fn take_key(&mut self) -> Option<KeyCode>;

    /// Next mouse button pressed since the last call
    fn take_button(&mut self) -> Option<MouseButton>;

    /// Current cursor position, if the source tracks one
    fn cursor(&self) -> Option<Vec2>;
}

/// Input source fed from a prepared script of events
///
/// Used by headless hosts and tests in place of a window.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    keys: VecDeque<KeyCode>,
    buttons: VecDeque<MouseButton>,
    cursor: Option<Vec2>,
}

impl ScriptedInput {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a key press
    pub fn push_key(&mut self, key: KeyCode) -> &mut Self {
        self.keys.push_back(key);
        self
    }

    /// Queue a button press
    pub fn push_button(&mut self, button: MouseButton) -> &mut Self {
        self.buttons.push_back(button);
        self
    }

    /// Set the cursor position reported from now on
    pub fn set_cursor(&mut self, position: Vec2) -> &mut Self {
        self.cursor = Some(position);
        self
    }

    /// Whether any key or button is still queued
    pub fn is_drained(&self) -> bool {
        self.keys.is_empty() && self.buttons.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn take_key(&mut self) -> Option<KeyCode> {
        self.keys.pop_front()
    }

    fn take_button(&mut self) -> Option<MouseButton> {
        self.buttons.pop_front()
    }

    fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }
}
