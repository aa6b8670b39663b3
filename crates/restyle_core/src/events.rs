//! Input event model
//!
//! Raw pointer and keyboard events as the hosting document delivers them.
//! The host observes input at the capture phase and forwards each event to
//! the active editing session; the returned [`EventDisposition`] tells the
//! host whether to suppress the page's own handling of that event.

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const Z: KeyCode = KeyCode(0x5A);

    // Special keys
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const TAB: KeyCode = KeyCode(0x09);

    // Arrow keys
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000; // Cmd on macOS, Win on Windows

    /// Create new modifiers from flags
    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    /// Create from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    /// Check if shift is pressed
    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    /// Check if ctrl is pressed
    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    /// Check if alt is pressed
    pub const fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    /// Check if meta (Cmd/Win) is pressed
    pub const fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }

    /// Check if any modifier is pressed
    pub const fn any(&self) -> bool {
        self.bits != 0
    }

    /// Check if command key is pressed (Ctrl on non-macOS, Meta on macOS)
    #[cfg(target_os = "macos")]
    pub const fn command(&self) -> bool {
        self.meta()
    }

    /// Check if command key is pressed (Ctrl on non-macOS, Meta on macOS)
    #[cfg(not(target_os = "macos"))]
    pub const fn command(&self) -> bool {
        self.ctrl()
    }
}

/// A pointer event in page coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub button: u8,
}

impl PointerEvent {
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, button: 0 }
    }
}

/// A keyboard event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    /// Whether this is a repeat event
    pub repeat: bool,
}

impl KeyEvent {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            repeat: false,
        }
    }

    pub fn with_modifiers(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            repeat: false,
        }
    }
}

/// A raw input event from the hosting document
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove(PointerEvent),
    Click(PointerEvent),
    KeyDown(KeyEvent),
}

/// What the host should do with the event after the session saw it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventDisposition {
    /// Let the page handle the event normally
    Pass,
    /// Suppress the page's default action and stop propagation
    Consume,
}
