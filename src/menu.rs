use crate::domain::Coordinate;
use crate::form::{FormField, FormValues, InputForm};
use crate::protocol::ApiRequest;
use crate::scene::{Canvas, Style};
use alloc::vec::Vec;
use core::fmt;

/// The things a player can do from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddUnit,
    SetDestination,
    DeleteUnit,
    AddTarget,
    ClearTargets,
    RunTurn,
}

/// Why a submitted form could not be turned into a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputError {
    /// A coordinate field was empty or not a number.
    Missing(&'static str),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Missing(field) => write!(f, "{} must be a number", field),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

fn coordinate(values: &FormValues) -> Result<Coordinate, InputError> {
    let x = values.get("x").ok_or(InputError::Missing("x"))?;
    let y = values.get("y").ok_or(InputError::Missing("y"))?;
    Ok(Coordinate::new(x, y))
}

/// An unset index means the first unit.
fn index(values: &FormValues) -> usize {
    values.get("idx").map(|v| v as usize).unwrap_or(0)
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::AddUnit,
        Action::SetDestination,
        Action::DeleteUnit,
        Action::AddTarget,
        Action::ClearTargets,
        Action::RunTurn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::AddUnit => "Add unit",
            Action::SetDestination => "Set destination",
            Action::DeleteUnit => "Delete unit",
            Action::AddTarget => "Add target",
            Action::ClearTargets => "Clear targets",
            Action::RunTurn => "Run turn",
        }
    }

    /// A fresh form for actions that need input; `None` for the ones that
    /// call the server directly.
    pub fn form(&self) -> Option<InputForm> {
        let (title, fields) = match self {
            Action::AddUnit => ("Add Unit", alloc::vec![FormField::float("x"), FormField::float("y")]),
            Action::SetDestination => (
                "Set Destination",
                alloc::vec![FormField::float("x"), FormField::float("y"), FormField::index("idx")],
            ),
            Action::DeleteUnit => ("Delete Unit", alloc::vec![FormField::index("idx")]),
            Action::AddTarget => ("Add Target", alloc::vec![FormField::float("x"), FormField::float("y")]),
            Action::ClearTargets | Action::RunTurn => return None,
        };
        Some(InputForm::new(title, fields))
    }

    /// Turns the submitted form (if the action has one) into the single
    /// request this action issues.
    pub fn request(&self, values: Option<&FormValues>) -> Result<ApiRequest, InputError> {
        let empty = FormValues::default();
        let values = values.unwrap_or(&empty);
        match self {
            Action::AddUnit => Ok(ApiRequest::AddUnit(coordinate(values)?)),
            Action::SetDestination => Ok(ApiRequest::SetDestination {
                index: index(values),
                to: coordinate(values)?,
            }),
            Action::DeleteUnit => Ok(ApiRequest::DeleteUnit(index(values))),
            Action::AddTarget => Ok(ApiRequest::AddTarget(coordinate(values)?)),
            Action::ClearTargets => Ok(ApiRequest::ClearTargets),
            Action::RunTurn => Ok(ApiRequest::RunTurn),
        }
    }
}

/// Ordered list of actions with exactly one selected entry.
#[derive(Debug, Clone)]
pub struct ActionMenu {
    actions: Vec<Action>,
    selected: usize,
}

impl Default for ActionMenu {
    fn default() -> Self {
        ActionMenu::new(Action::ALL.to_vec())
    }
}

impl ActionMenu {
    /// # Panics
    /// Panics on an empty list, which would leave nothing to select.
    pub fn new(actions: Vec<Action>) -> Self {
        assert!(!actions.is_empty(), "action menu needs at least one entry");
        ActionMenu { actions, selected: 0 }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Action {
        self.actions[self.selected]
    }

    pub fn move_up(&mut self) {
        self.selected = (self.selected + self.actions.len() - 1) % self.actions.len();
    }

    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % self.actions.len();
    }

    /// One row per action, the selected one highlighted, followed by a key
    /// hint.
    pub fn render(&self, width: u16) -> Canvas {
        let mut canvas = Canvas::new(width, self.actions.len() as u16 + 2);
        for (row, action) in self.actions.iter().enumerate() {
            let style = if row == self.selected { Style::Highlight } else { Style::Plain };
            canvas.put_str(0, row as u16, action.label(), style);
        }
        canvas.put_str(0, self.actions.len() as u16 + 1, "enter: run  q: quit", Style::Plain);
        canvas
    }
}
