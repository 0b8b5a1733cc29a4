#![cfg(feature = "std")]

//! Decoding of the server's JSON replies.
//!
//! Servers in the wild differ in how they wrap values: plain numbers, tagged
//! scalars such as `{"F32": 5.0}`, coordinate lists wrapped in
//! `{"Coordinates": [...]}`, and any of those encoded a second time as a JSON
//! string. All of these forms decode to the same result here.

use crate::domain::{Coordinate, GameState, Target, Unit};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// A required key was absent.
    MissingField(&'static str),
    /// A value had an unexpected shape.
    Malformed(&'static str),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::MissingField(name) => write!(f, "server reply has no `{}`", name),
            WireError::Malformed(what) => write!(f, "server reply has a malformed {}", what),
        }
    }
}

impl std::error::Error for WireError {}

/// Unwraps a value that was sent as a JSON string holding JSON.
fn unstring(value: &Value) -> Option<Value> {
    match value {
        Value::String(text) => serde_json::from_str(text).ok(),
        _ => None,
    }
}

/// Keys a tagged scalar may be wrapped in.
const SCALAR_TAGS: [&str; 2] = ["F32", "F64"];

fn scalar(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(map) if map.len() == 1 => SCALAR_TAGS
            .iter()
            .find_map(|tag| map.get(*tag))
            .and_then(scalar),
        Value::String(_) => unstring(value).as_ref().and_then(scalar),
        _ => None,
    }
}

fn coordinate(value: &Value) -> Option<Coordinate> {
    match value {
        Value::Object(map) => Some(Coordinate::new(
            map.get("x").and_then(scalar)?,
            map.get("y").and_then(scalar)?,
        )),
        Value::String(_) => unstring(value).as_ref().and_then(coordinate),
        _ => None,
    }
}

fn coordinates(value: &Value) -> Result<Vec<Coordinate>, WireError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| coordinate(item).ok_or(WireError::Malformed("coordinate")))
            .collect(),
        Value::Object(map) => match map.get("Coordinates") {
            Some(inner) => coordinates(inner),
            None => Err(WireError::Malformed("coordinate list")),
        },
        Value::String(_) => match unstring(value) {
            Some(inner) => coordinates(&inner),
            None => Err(WireError::Malformed("coordinate list")),
        },
        _ => Err(WireError::Malformed("coordinate list")),
    }
}

fn field<'a>(body: &'a Value, name: &'static str) -> Result<&'a Value, WireError> {
    body.get(name).ok_or(WireError::MissingField(name))
}

fn radius(body: &Value, name: &'static str) -> Result<f64, WireError> {
    scalar(field(body, name)?).ok_or(WireError::Malformed(name))
}

/// Reply to `GET /game`. `minimum_unit_radius` is optional and defaults to 0.
pub fn decode_game(body: &Value) -> Result<GameState, WireError> {
    let minimum_unit_radius = match body.get("minimum_unit_radius") {
        Some(value) => scalar(value).ok_or(WireError::Malformed("minimum_unit_radius"))?,
        None => 0.0,
    };
    Ok(GameState {
        map_radius: radius(body, "map_radius")?,
        base_radius: radius(body, "base_radius")?,
        minimum_unit_radius,
    })
}

/// Reply to `GET /units`. Destinations pair with positions by index; a unit
/// without one is heading for where it stands.
pub fn decode_units(body: &Value) -> Result<Vec<Unit>, WireError> {
    if body.is_array() {
        return Ok(coordinates(body)?.into_iter().map(Unit::stationary).collect());
    }
    let positions = coordinates(field(body, "positions")?)?;
    let destinations = match body.get("destinations") {
        Some(value) => coordinates(value)?,
        None => Vec::new(),
    };
    Ok(positions
        .into_iter()
        .enumerate()
        .map(|(i, at)| Unit::heading(at, destinations.get(i).copied().unwrap_or(at)))
        .collect())
}

/// Reply to `GET /targets`.
pub fn decode_targets(body: &Value) -> Result<Vec<Target>, WireError> {
    let list = if body.is_array() { body } else { field(body, "targets")? };
    Ok(coordinates(list)?.into_iter().map(Target::from).collect())
}
