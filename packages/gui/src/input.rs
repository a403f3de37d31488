//! Pointer input, as seen by the GUI.

use std::collections::BTreeSet;
use vek::*;


#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Pointer state sampled once per frame by the host, before `Gui::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Cursor position in screen pixels.
    pub cursor: Vec2<i32>,
    /// Set of mouse buttons currently held down.
    pub pressed_mouse_buttons: BTreeSet<MouseButton>,
}

impl InputSnapshot {
    /// Snapshot with the cursor at `x, y` and no buttons down.
    pub fn at(x: i32, y: i32) -> Self {
        InputSnapshot {
            cursor: Vec2::new(x, y),
            pressed_mouse_buttons: BTreeSet::new(),
        }
    }

    /// Builder-style, mark `button` as held down.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.pressed_mouse_buttons.insert(button);
        self
    }

    pub fn cursor_x(&self) -> i32 {
        self.cursor.x
    }

    pub fn cursor_y(&self) -> i32 {
        self.cursor.y
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.pressed_mouse_buttons.contains(&button)
    }
}


/// Mouse state the widgets see during an update pass.
///
/// Keeps the previous frame's cursor position so widgets can tell whether
/// the cursor moved since the last update.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct UiMouseState {
    pub pos: Vec2<i32>,
    pub last_pos: Vec2<i32>,
    pub left_down: bool,
    pub middle_down: bool,
    pub right_down: bool,
}

impl UiMouseState {
    /// Shift the current state to previous and take in a new snapshot.
    pub fn ingest(&mut self, input: &InputSnapshot) {
        self.last_pos = self.pos;
        self.pos = input.cursor;
        self.left_down = input.button_down(MouseButton::Left);
        self.middle_down = input.button_down(MouseButton::Middle);
        self.right_down = input.button_down(MouseButton::Right);
    }

    pub fn moved(&self) -> bool {
        self.pos != self.last_pos
    }
}


#[test]
fn ingest_tracks_previous_position() {
    let mut mouse = UiMouseState::default();
    mouse.ingest(&InputSnapshot::at(5, 7).with_button(MouseButton::Left));
    assert_eq!(mouse.pos, Vec2::new(5, 7));
    assert_eq!(mouse.last_pos, Vec2::new(0, 0));
    assert!(mouse.left_down);
    assert!(!mouse.right_down);
    assert!(mouse.moved());

    mouse.ingest(&InputSnapshot::at(5, 7).with_button(MouseButton::Right));
    assert!(!mouse.moved());
    assert!(!mouse.left_down);
    assert!(mouse.right_down);
}
