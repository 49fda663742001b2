//! Character-level Markov text model.
//!
//! - Fixed-order frequency model (`MarkovModel`)
//! - Corrupted-text repair built on top of it
//! - Internal state management (`State`)

/// Fixed-order Markov model (`k >= 1`).
///
/// Handles circular training, frequency queries, weighted sampling
/// and text generation.
pub mod markov_model;

/// Repair of unknown characters in a corrupted string.
///
/// Adds `replace_unknown` / `replace_marked` to `MarkovModel`.
pub mod repair;

/// Internal representation of a single context (k-gram).
///
/// Tracks outgoing transitions and supports weighted random sampling.
/// This module is not exposed publicly.
mod state;
