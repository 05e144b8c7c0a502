//! Terminal front-end for *gridstar*.
//!
//! The core crates never draw anything; this crate is the collaborator that
//! builds the grid from mouse input, drives the [`SearchEngine`] one step
//! per tick and renders whatever state the engine exposes.
//!
//! - [`Editor`] — the model: grid edits, search control, rendering to a
//!   [`Frame`].
//! - [`Driver`] — the back-end seam; [`CrosstermDriver`] is the terminal
//!   implementation.
//! - [`run`] — the poll → update → tick → draw → flush loop.
//!
//! [`SearchEngine`]: gridstar_paths::SearchEngine

mod app;
mod config;
mod driver;
mod editor;
mod frame;
mod msg;

pub use app::{run, run_with};
pub use config::{ConfigError, VisualizerConfig};
pub use driver::{CrosstermDriver, Driver};
pub use editor::{Editor, Flow};
pub use frame::{Color, Frame, FrameCell, ScreenCell};
pub use msg::{Key, MouseAction, Msg};
