//! Client-side plumbing for Coinfield.
//!
//! This crate owns everything between raw windowing input and the
//! action gateway: pixel/tile coordinate mapping, the client
//! configuration section, and the input dispatcher that turns key
//! presses and pointer-downs into submitted actions. It knows nothing
//! about rendering; the sync crate's entity pool covers that side.

pub mod config;
pub mod grid;
pub mod input;

pub use config::{ClientConfig, ConfigError};
pub use input::{InputDispatcher, InputEvent};
