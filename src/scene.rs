//! Character canvases and the layer arena the UI is composed from.
//!
//! Every panel on screen (menu, map, debug output, popups) is a [`Layer`]
//! owned by a [`Scene`]. Callers hold a [`LayerHandle`] and update the layer
//! through it; when a panel is no longer wanted it is retired, which removes
//! it from the next composed frame for good.

use crate::config::{Palette, Tone};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// What a cell represents; the [`Palette`] decides how that looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Highlight,
    Ground,
    Base,
    Unit,
    Target,
    Destination,
    Popup,
    Field,
    Cursor,
}

impl Palette {
    pub fn tone(&self, style: Style) -> Tone {
        match style {
            Style::Plain => self.plain,
            Style::Highlight => self.highlight,
            Style::Ground => self.ground,
            Style::Base => self.base,
            Style::Unit => self.unit,
            Style::Target => self.target,
            Style::Destination => self.destination,
            Style::Popup => self.popup,
            Style::Field => self.field,
            Style::Cursor => self.cursor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', style: Style::Plain };

    pub const fn new(ch: char, style: Style) -> Self {
        Cell { ch, style }
    }
}

/// A fixed-size grid of cells. Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Canvas::filled(width, height, Style::Plain)
    }

    pub fn filled(width: u16, height: u16, style: Style) -> Self {
        Canvas {
            width,
            height,
            cells: alloc::vec![Cell::new(' ', style); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Returns `false` when the position is off the canvas.
    pub fn put(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Writes `text` left to right from `(x, y)`, clipped at the right edge.
    /// Control characters become spaces so nothing but glyphs reaches the
    /// screen.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        for (offset, ch) in text.chars().enumerate() {
            let ch = if ch.is_control() { ' ' } else { ch };
            let Some(col) = x.checked_add(offset as u16) else { break };
            if !self.put(col, y, Cell::new(ch, style)) {
                break;
            }
        }
    }

    /// Copies `other` onto this canvas with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, other: &Canvas, x: u16, y: u16) {
        for row in 0..other.height {
            for col in 0..other.width {
                if let (Some(cell), Some(dx), Some(dy)) =
                    (other.get(col, row), x.checked_add(col), y.checked_add(row))
                {
                    self.put(dx, dy, *cell);
                }
            }
        }
    }

    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.ch)
            .collect()
    }

    /// Position of the first occurrence of `needle` on a single row.
    pub fn find(&self, needle: &str) -> Option<(u16, u16)> {
        (0..self.height).find_map(|y| {
            let row = self.row_text(y);
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y))
        })
    }
}

/// A canvas placed at a screen position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub x: u16,
    pub y: u16,
    pub canvas: Canvas,
}

impl Layer {
    pub fn new(x: u16, y: u16, canvas: Canvas) -> Self {
        Layer { x, y, canvas }
    }
}

/// Reference to a layer inside a [`Scene`]. Stays invalid once retired,
/// even if its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The handle was retired or never belonged to this scene.
    StaleHandle,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::StaleHandle => write!(f, "layer handle is no longer live"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SceneError {}

struct Slot {
    generation: u32,
    order: u64,
    layer: Option<Layer>,
}

/// Arena of layers. Layers are drawn in the order they were inserted.
#[derive(Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<usize>,
    next_order: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, layer: Layer) -> LayerHandle {
        let order = self.next_order;
        self.next_order += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.order = order;
                slot.layer = Some(layer);
                LayerHandle { index, generation: slot.generation }
            }
            None => {
                self.slots.push(Slot { generation: 0, order, layer: Some(layer) });
                LayerHandle { index: self.slots.len() - 1, generation: 0 }
            }
        }
    }

    fn slot(&self, handle: LayerHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation && slot.layer.is_some())
    }

    pub fn is_live(&self, handle: LayerHandle) -> bool {
        self.slot(handle).is_some()
    }

    pub fn get(&self, handle: LayerHandle) -> Option<&Layer> {
        self.slot(handle).and_then(|slot| slot.layer.as_ref())
    }

    /// Swaps in new content for a live layer, keeping its place in the
    /// drawing order.
    pub fn replace(&mut self, handle: LayerHandle, layer: Layer) -> Result<(), SceneError> {
        if !self.is_live(handle) {
            return Err(SceneError::StaleHandle);
        }
        self.slots[handle.index].layer = Some(layer);
        Ok(())
    }

    /// Removes a layer from the scene and hands it back.
    pub fn retire(&mut self, handle: LayerHandle) -> Result<Layer, SceneError> {
        if !self.is_live(handle) {
            return Err(SceneError::StaleHandle);
        }
        let slot = &mut self.slots[handle.index];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        slot.layer.take().ok_or(SceneError::StaleHandle)
    }

    /// Number of live layers.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.layer.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens all live layers onto a blank `width` x `height` frame.
    pub fn compose(&self, width: u16, height: u16) -> Canvas {
        let mut live: Vec<&Slot> = self.slots.iter().filter(|slot| slot.layer.is_some()).collect();
        live.sort_by_key(|slot| slot.order);

        let mut frame = Canvas::new(width, height);
        for layer in live.into_iter().filter_map(|slot| slot.layer.as_ref()) {
            frame.blit(&layer.canvas, layer.x, layer.y);
        }
        frame
    }
}
