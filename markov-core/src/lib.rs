//! K-th order Markov text model.
//!
//! This crate provides:
//! - A character-level Markov model trained on a circular text
//! - Frequency queries and weighted random sampling with an injected RNG
//! - Text generation and repair of corrupted characters
//! - A word-to-positions index and input helpers used by the CLI
//!
//! The frequency table itself is never exposed; only its queries are.

/// Markov model, repair algorithm and their internal state.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// Input helpers (whole file or standard input).
pub mod io;

/// Word to positions lookup table.
pub mod word_index;

pub use error::{MarkovError, Result};
pub use model::markov_model::MarkovModel;
pub use model::repair::UNKNOWN_CHAR;
pub use word_index::WordIndex;
