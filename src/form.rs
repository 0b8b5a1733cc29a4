//! Modal numeric input form.
//!
//! A form is a vertical stack of single-line fields, one of which is
//! selected. It consumes keys one at a time through
//! [`InputForm::handle_key`] until the user submits or cancels, so whoever
//! owns the keyboard can hand it over for as long as the form is open.

use crate::common::Key;
use crate::config::FIELD_CAPACITY;
use crate::scene::{Canvas, Cell, Style};
use alloc::string::String;
use alloc::vec::Vec;

/// What a field is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any real number: digits, `.` and `-`.
    Float,
    /// A list position: digits only.
    Index,
}

impl FieldKind {
    fn accepts(&self, ch: char) -> bool {
        match self {
            FieldKind::Float => ch.is_ascii_digit() || ch == '.' || ch == '-',
            FieldKind::Index => ch.is_ascii_digit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub kind: FieldKind,
}

impl FormField {
    pub fn new(label: &str, kind: FieldKind) -> Self {
        FormField { label: String::from(label), kind }
    }

    pub fn float(label: &str) -> Self {
        FormField::new(label, FieldKind::Float)
    }

    pub fn index(label: &str) -> Self {
        FormField::new(label, FieldKind::Index)
    }
}

/// Parses raw field text. Anything that is not a complete number (empty,
/// a bare `-`, a stray `.`) yields `None` instead of an error.
pub fn parse_field(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Editable text of one field plus its cursor, counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_at(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, ch: char) {
        if self.len() >= FIELD_CAPACITY {
            return;
        }
        let at = self.byte_at(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.text.remove(at);
    }

    fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_at(self.cursor);
            self.text.remove(at);
        }
    }

    fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }
}

/// Parsed result of a submitted form, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    entries: Vec<(String, Option<f64>)>,
}

impl FormValues {
    pub fn new(entries: Vec<(String, Option<f64>)>) -> Self {
        FormValues { entries }
    }

    /// Value of the field called `label`; `None` when the field was left
    /// unparseable or does not exist.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .and_then(|(_, value)| *value)
    }

    pub fn entries(&self) -> &[(String, Option<f64>)] {
        &self.entries
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Still collecting input.
    Pending,
    Submitted(FormValues),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct InputForm {
    title: String,
    fields: Vec<FormField>,
    buffers: Vec<LineBuffer>,
    selected: usize,
}

impl InputForm {
    /// # Panics
    /// Panics when `fields` is empty; a form needs something to collect.
    pub fn new(title: &str, fields: Vec<FormField>) -> Self {
        assert!(!fields.is_empty(), "input form needs at least one field");
        let buffers = alloc::vec![LineBuffer::default(); fields.len()];
        InputForm {
            title: String::from(title),
            fields,
            buffers,
            selected: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Raw text currently typed into field `index`.
    pub fn text(&self, index: usize) -> Option<&str> {
        self.buffers.get(index).map(|b| b.text.as_str())
    }

    pub fn handle_key(&mut self, key: Key) -> FormOutcome {
        let count = self.fields.len();
        match key {
            Key::Up => self.selected = (self.selected + count - 1) % count,
            Key::Down | Key::Tab => self.selected = (self.selected + 1) % count,
            Key::Enter => return FormOutcome::Submitted(self.values()),
            Key::Esc => return FormOutcome::Cancelled,
            k if k.is_quit() => return FormOutcome::Cancelled,
            Key::Char(ch) => {
                if self.fields[self.selected].kind.accepts(ch) {
                    self.buffers[self.selected].insert(ch);
                }
            }
            Key::Backspace => self.buffers[self.selected].backspace(),
            Key::Delete => self.buffers[self.selected].delete(),
            Key::Left => self.buffers[self.selected].left(),
            Key::Right => self.buffers[self.selected].right(),
            Key::Home => self.buffers[self.selected].cursor = 0,
            Key::End => {
                let buffer = &mut self.buffers[self.selected];
                buffer.cursor = buffer.len();
            }
            _ => {}
        }
        FormOutcome::Pending
    }

    pub fn values(&self) -> FormValues {
        let entries = self
            .fields
            .iter()
            .zip(self.buffers.iter())
            .map(|(field, buffer)| (field.label.clone(), parse_field(&buffer.text)))
            .collect();
        FormValues { entries }
    }

    fn label_width(&self) -> usize {
        self.fields.iter().map(|f| f.label.chars().count()).max().unwrap_or(0)
    }

    /// Width and height of the popup needed to show every field.
    pub fn size(&self) -> (u16, u16) {
        let fields_width = self.label_width() + 1 + FIELD_CAPACITY + 1;
        let width = fields_width.max(self.title.chars().count() + 2);
        (width as u16, self.fields.len() as u16 + 1)
    }

    /// Title centered on the first row, then one `label field` row per entry.
    /// The selected label and field are highlighted and the cursor is drawn
    /// inside the selected field.
    pub fn render(&self) -> Canvas {
        let (width, height) = self.size();
        let mut canvas = Canvas::filled(width, height, Style::Popup);

        let title_len = self.title.chars().count() as u16;
        canvas.put_str(width.saturating_sub(title_len) / 2, 0, &self.title, Style::Popup);

        let field_x = self.label_width() as u16 + 1;
        for (row, (field, buffer)) in self.fields.iter().zip(self.buffers.iter()).enumerate() {
            let y = row as u16 + 1;
            let active = row == self.selected;
            let label_style = if active { Style::Highlight } else { Style::Popup };
            canvas.put_str(0, y, &field.label, label_style);

            if active {
                for x in field_x..field_x + FIELD_CAPACITY as u16 + 1 {
                    canvas.put(x, y, Cell::new(' ', Style::Field));
                }
            }
            let text_style = if active { Style::Field } else { Style::Popup };
            canvas.put_str(field_x, y, &buffer.text, text_style);

            if active {
                let x = field_x + buffer.cursor as u16;
                let ch = buffer.text.chars().nth(buffer.cursor).unwrap_or(' ');
                canvas.put(x, y, Cell::new(ch, Style::Cursor));
            }
        }
        canvas
    }
}
