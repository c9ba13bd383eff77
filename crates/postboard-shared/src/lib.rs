//! # Postboard Shared
//!
//! Presentation view models built from board state.
//! Front-ends render these instead of reaching into the controller, so the
//! terminal app and any future WASM front-end show the same thing.

pub mod view;

pub use view::{BoardView, FormView, ImageSummary, PostView, TIMESTAMP_FORMAT};
