//! Commonly used types and utilities for ease of import.

pub use crate::{
    Action, ActionMenu, ApiRequest, ClientConfig, Coordinate, GameState, InputForm, Key,
    MapRenderer, Snapshot, Target, Unit,
};

#[cfg(feature = "std")]
pub use crate::{App, CommandSink, CrosstermTerminal, HttpGameClient, KeySource, Renderer, StateSource};
