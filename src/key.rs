use crate::types::{CompositionClause, Point};

/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A character key, used together with CTRL for shortcuts.
    /// Text input arrives separately as [`InputEvent::ReceivedChar`].
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// The Enter/Return key. Inserts a paragraph break, or a line break with SHIFT.
    Enter,
    Backspace,
    Delete,
    /// Toggles overtype mode.
    Insert,
    Esc,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// The modifier that extends the selection instead of replacing it.
    pub fn extends(self) -> bool {
        self.contains(Modifiers::SHIFT)
    }
}

/// A key press event with optional modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
    /// The event was generated by auto-repeat.
    pub repeat: bool,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self {
            code,
            mods,
            repeat: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Drag,
    Up,
    Cancel,
}

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Identifies the pointer (mouse, finger, pen) across a gesture.
    pub id: u32,
    pub point: Point,
    pub double_click: bool,
    /// Modifiers held when the event was produced.
    pub mods: Modifiers,
}

/// Input method composition lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionEvent {
    /// The in-progress composition text changed.
    Update {
        text: String,
        /// Caret offset inside `text`, in code points.
        caret_offset: usize,
        clauses: Vec<CompositionClause>,
    },
    /// The composition ended with `text` committed. Empty text cancels.
    Finish { text: String },
}

/// Input events that can be processed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press event, used for navigation, editing keys and shortcuts.
    Key(KeyEvent),
    /// A character of committed text input.
    ReceivedChar(char),
    Pointer(PointerEvent),
    Composition(CompositionEvent),
}
