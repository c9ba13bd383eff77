//! # Postboard Core
//!
//! The domain layer of postboard.
//! This crate holds the post model, the board controller, and the ports the
//! host environment must provide (storage, image encoding, confirmation).
//! It has zero infrastructure dependencies.

pub mod board;
pub mod domain;
pub mod error;
pub mod ports;

pub use board::{Board, EMOJI_PALETTE, RemoveOutcome, SubmitOutcome};
pub use error::DomainError;
