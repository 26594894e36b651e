//! Abstract input key event, independent of terminal library.
//!
//! The report dialog's key handling works on `InputKey` so the update logic
//! can be driven by the TUI, the headless runner, or tests without pulling
//! in crossterm.

/// Abstract input key event, independent of terminal library.
/// Converted from crossterm::event::KeyEvent at the TUI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key (letters, digits, symbols, space)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, Ctrl+s, Ctrl+u)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// Space and Enter both "press" the focused control
    pub fn is_activate(&self) -> bool {
        matches!(self, InputKey::Enter | InputKey::Char(' '))
    }
}
