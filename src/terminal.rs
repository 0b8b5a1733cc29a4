#![cfg(feature = "std")]

//! The screen and keyboard.
//!
//! [`CrosstermTerminal`] owns the real terminal while the client runs: raw
//! mode, the alternate screen and a hidden cursor are switched on in
//! [`CrosstermTerminal::acquire`] and switched back off when the value is
//! dropped, on every way out of the program including panics.

use crate::common::Key;
use crate::config::{Color, Palette, Tone};
use crate::scene::{Canvas, Cell};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, terminal};
use log::debug;
use std::io::{self, Stdout, Write};

/// Somewhere frames can be shown.
pub trait Renderer {
    /// Columns and rows available.
    fn size(&self) -> anyhow::Result<(u16, u16)>;
    fn present(&mut self, frame: &Canvas) -> anyhow::Result<()>;
}

/// Somewhere keys come from. `next_key` blocks until one arrives.
pub trait KeySource {
    fn next_key(&mut self) -> anyhow::Result<Key>;
}

/// Translates a crossterm key event. Returns `None` for releases and
/// repeats.
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let key = match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Esc,
        _ => Key::Other,
    };
    Some(key)
}

fn color(c: Color) -> crossterm::style::Color {
    use crossterm::style::Color as C;
    match c {
        Color::Reset => C::Reset,
        Color::Black => C::Black,
        Color::White => C::White,
        Color::Red => C::Red,
        Color::Cyan => C::Cyan,
        Color::Magenta => C::Magenta,
        Color::Blue => C::Blue,
    }
}

fn restore(out: &mut impl Write) -> io::Result<()> {
    crossterm::execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

/// Makes a panic leave the terminal usable before its message is printed.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore(&mut io::stdout());
        previous(info);
    }));
}

/// Draws through `W`, the real standard output unless a test says
/// otherwise.
pub struct CrosstermTerminal<W: Write = Stdout> {
    out: W,
    palette: Palette,
    /// Last presented frame, for redrawing only what changed.
    shown: Option<Canvas>,
}

impl CrosstermTerminal<Stdout> {
    pub fn acquire(palette: Palette) -> anyhow::Result<Self> {
        CrosstermTerminal::acquire_on(io::stdout(), palette)
    }
}

impl<W: Write> CrosstermTerminal<W> {
    /// Switches to raw mode and the alternate screen, drawing through `out`.
    pub fn acquire_on(mut out: W, palette: Palette) -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(err) = crossterm::execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        ) {
            let _ = restore(&mut out);
            return Err(err.into());
        }
        debug!("terminal acquired");
        Ok(Self { out, palette, shown: None })
    }

    fn queue_tone(&mut self, tone: Tone) -> io::Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(color(tone.fg)),
            SetBackgroundColor(color(tone.bg))
        )?;
        if tone.dim {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        if tone.reverse {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for CrosstermTerminal<W> {
    fn size(&self) -> anyhow::Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn present(&mut self, frame: &Canvas) -> anyhow::Result<()> {
        let previous = self
            .shown
            .take()
            .filter(|p| p.width() == frame.width() && p.height() == frame.height());
        if previous.is_none() {
            queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        }

        let mut current_tone = None;
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let cell = frame.get(x, y).copied().unwrap_or(Cell::BLANK);
                if previous.as_ref().and_then(|p| p.get(x, y)) == Some(&cell) {
                    continue;
                }
                let tone = self.palette.tone(cell.style);
                if current_tone != Some(tone) {
                    self.queue_tone(tone)?;
                    current_tone = Some(tone);
                }
                queue!(self.out, cursor::MoveTo(x, y), Print(cell.ch))?;
            }
        }
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        self.shown = Some(frame.clone());
        Ok(())
    }
}

impl<W: Write> KeySource for CrosstermTerminal<W> {
    fn next_key(&mut self) -> anyhow::Result<Key> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(key) = translate_key(key) {
                        return Ok(key);
                    }
                }
                // Full redraw on the next frame.
                Event::Resize(_, _) => self.shown = None,
                _ => {}
            }
        }
    }
}

impl<W: Write> Drop for CrosstermTerminal<W> {
    fn drop(&mut self) {
        let _ = restore(&mut self.out);
        debug!("terminal released");
    }
}
