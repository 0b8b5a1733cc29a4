#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod common;
mod config;
pub mod domain;
mod form;
mod map;
mod menu;
pub mod protocol;
mod scene;
#[cfg(feature = "std")]
pub mod api;
#[cfg(feature = "std")]
mod app;
#[cfg(feature = "std")]
mod cli;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod terminal;
#[cfg(feature = "std")]
pub mod wire;
pub mod prelude;

pub use common::*;
pub use config::*;
pub use domain::*;
pub use form::*;
pub use map::*;
pub use menu::*;
pub use protocol::*;
pub use scene::*;
#[cfg(feature = "std")]
pub use api::{CommandSink, HttpGameClient, StateSource};
#[cfg(feature = "std")]
pub use app::*;
#[cfg(feature = "std")]
pub use cli::Cli;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use terminal::{CrosstermTerminal, KeySource, Renderer};
