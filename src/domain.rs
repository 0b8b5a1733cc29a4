//! Game data as last seen on the server.
//!
//! The client never owns any of this: every refresh replaces the whole
//! [`Snapshot`], and nothing here is mutated locally.

use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }
}

/// Map geometry from `GET /game`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    pub map_radius: f64,
    pub base_radius: f64,
    pub minimum_unit_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub x: f64,
    pub y: f64,
    pub destination_x: f64,
    pub destination_y: f64,
}

impl Unit {
    /// A unit that has not been given anywhere to go.
    pub fn stationary(at: Coordinate) -> Self {
        Unit::heading(at, at)
    }

    pub fn heading(at: Coordinate, to: Coordinate) -> Self {
        Unit {
            x: at.x,
            y: at.y,
            destination_x: to.x,
            destination_y: to.y,
        }
    }

    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    pub fn destination(&self) -> Coordinate {
        Coordinate::new(self.destination_x, self.destination_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
}

impl Target {
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

impl From<Coordinate> for Target {
    fn from(c: Coordinate) -> Self {
        Target { x: c.x, y: c.y }
    }
}

/// One complete refresh: the result of `GET /game`, `/units` and `/targets`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub game: GameState,
    pub units: Vec<Unit>,
    pub targets: Vec<Target>,
}
