//! Circular map rendering.
//!
//! Game coordinates are continuous with `y` pointing up; the grid is made of
//! integer cells with rows counting down. A point is scaled by a fixed
//! factor, rounded to the nearest cell and mirrored vertically, with the map
//! center in the middle of the grid.
//!
//! Distances are rounded to whole cells before being compared with the
//! scaled radii, so cells on a boundary always land on the same side.

use crate::config::MAX_GRID_RADIUS;
use crate::domain::{Coordinate, Snapshot};
use crate::scene::{Canvas, Cell, Style};
use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    Terrain,
    Base,
    Destination,
    Unit,
    Target,
}

impl Glyph {
    pub fn cell(&self) -> Cell {
        match self {
            Glyph::Blank => Cell::BLANK,
            Glyph::Terrain => Cell::new('*', Style::Ground),
            Glyph::Base => Cell::new('0', Style::Base),
            Glyph::Destination => Cell::new('+', Style::Destination),
            Glyph::Unit => Cell::new('@', Style::Unit),
            Glyph::Target => Cell::new('X', Style::Target),
        }
    }
}

/// Square grid of glyphs centred on the map origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    radius: i32,
    glyphs: Vec<Glyph>,
}

impl GlyphGrid {
    fn new(radius: i32) -> Self {
        let side = (2 * radius + 1) as usize;
        GlyphGrid {
            radius,
            glyphs: alloc::vec![Glyph::Blank; side * side],
        }
    }

    /// Cells from the center to the edge of the drawn circle.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Number of rows (and columns).
    pub fn side(&self) -> usize {
        (2 * self.radius + 1) as usize
    }

    /// Glyph at grid position `(col, row)`, row 0 at the top.
    pub fn get(&self, col: usize, row: usize) -> Option<Glyph> {
        let side = self.side();
        if col < side && row < side {
            Some(self.glyphs[row * side + col])
        } else {
            None
        }
    }

    /// Glyph at a cell offset from the center, `dy` pointing up.
    pub fn at_offset(&self, dx: i32, dy: i32) -> Option<Glyph> {
        let col = dx + self.radius;
        let row = self.radius - dy;
        if col < 0 || row < 0 {
            return None;
        }
        self.get(col as usize, row as usize)
    }

    fn set(&mut self, col: usize, row: usize, glyph: Glyph) {
        let side = self.side();
        self.glyphs[row * side + col] = glyph;
    }

    pub fn to_canvas(&self) -> Canvas {
        let side = self.side() as u16;
        let mut canvas = Canvas::new(side, side);
        for row in 0..self.side() {
            for col in 0..self.side() {
                if let Some(glyph) = self.get(col, row) {
                    canvas.put(col as u16, row as u16, glyph.cell());
                }
            }
        }
        canvas
    }
}

/// Projects a [`Snapshot`] onto a [`GlyphGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRenderer {
    scale: f64,
    max_radius: i32,
}

impl MapRenderer {
    pub fn new(scale: f64) -> Self {
        MapRenderer { scale, max_radius: MAX_GRID_RADIUS }
    }

    /// Caps the grid at `max_radius` cells from the center. Anything of a
    /// larger map beyond that is clipped like an off-map point.
    pub fn with_max_radius(mut self, max_radius: i32) -> Self {
        self.max_radius = max_radius.clamp(0, MAX_GRID_RADIUS);
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn max_radius(&self) -> i32 {
        self.max_radius
    }

    /// Grid radius, in cells, for a map of `map_radius` game units, never
    /// more than [`max_radius`](Self::max_radius). NaN gives 0.
    pub fn radius_cells(&self, map_radius: f64) -> i32 {
        let cells = libm::trunc(map_radius * self.scale);
        if cells.is_nan() {
            return 0;
        }
        cells.clamp(0.0, self.max_radius as f64) as i32
    }

    /// Classifies the cell `(dx, dy)` cells away from the center.
    pub fn classify(&self, dx: i32, dy: i32, map_radius: f64, base_radius: f64) -> Glyph {
        let distance = libm::round(libm::hypot(dx as f64, dy as f64));
        if distance <= base_radius * self.scale {
            Glyph::Base
        } else if distance <= map_radius * self.scale {
            Glyph::Terrain
        } else {
            Glyph::Blank
        }
    }

    /// Grid `(col, row)` of a game point, or `None` when it falls outside a
    /// grid of the given radius.
    pub fn to_cell(&self, point: Coordinate, radius: i32) -> Option<(usize, usize)> {
        let col = libm::round(point.x * self.scale) as i64 + radius as i64;
        let row = radius as i64 - libm::round(point.y * self.scale) as i64;
        let side = 2 * radius as i64 + 1;
        if (0..side).contains(&col) && (0..side).contains(&row) {
            Some((col as usize, row as usize))
        } else {
            None
        }
    }

    /// Terrain first, then unit destinations, units and targets on top.
    pub fn render(&self, snapshot: &Snapshot) -> GlyphGrid {
        let game = &snapshot.game;
        let radius = self.radius_cells(game.map_radius);
        let mut grid = GlyphGrid::new(radius);

        for row in 0..grid.side() {
            for col in 0..grid.side() {
                let dx = col as i32 - radius;
                let dy = radius - row as i32;
                grid.set(col, row, self.classify(dx, dy, game.map_radius, game.base_radius));
            }
        }

        for unit in &snapshot.units {
            let here = self.to_cell(unit.position(), radius);
            let there = self.to_cell(unit.destination(), radius);
            if let Some((col, row)) = there.filter(|cell| Some(*cell) != here) {
                grid.set(col, row, Glyph::Destination);
            }
        }
        for unit in &snapshot.units {
            if let Some((col, row)) = self.to_cell(unit.position(), radius) {
                grid.set(col, row, Glyph::Unit);
            }
        }
        for target in &snapshot.targets {
            if let Some((col, row)) = self.to_cell(target.position(), radius) {
                grid.set(col, row, Glyph::Target);
            }
        }
        grid
    }
}
