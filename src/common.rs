//! Common types shared by the menu, the input form and the terminal backend.

/// A single decoded keypress.
///
/// The terminal backend translates its native events into this type so the
/// menu and form logic never depend on a particular terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Tab,
    Backspace,
    Delete,
    Esc,
    /// Ctrl-C. Raw mode swallows the signal, so it arrives as a key.
    Interrupt,
    Char(char),
    Other,
}

impl Key {
    /// `q`, `Q` and Ctrl-C leave whatever has keyboard focus.
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Char('q') | Key::Char('Q') | Key::Interrupt)
    }
}
