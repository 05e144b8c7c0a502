//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use gridstar_core::Point;

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// A printable character.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed or dragged.
    Main,
    /// Secondary (right) button pressed or dragged.
    Secondary,
    /// Button released.
    Release,
    /// Mouse moved with no button held.
    Move,
}

/// An input message delivered to the [`Editor`](crate::Editor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    KeyDown(Key),
    /// `pos` is in screen coordinates: row = terminal line, col = column.
    Mouse { action: MouseAction, pos: Point },
    /// The terminal was resized.
    Screen { width: u16, height: u16 },
    /// Request to quit.
    Quit,
}
