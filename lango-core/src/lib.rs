//! Markov-chain word generation library.
//!
//! This crate builds a character-level Markov chain from a list of example
//! words and generates new words from it, including:
//! - Deterministic ranking of the characters seen after each prefix
//! - Vowel/consonant quotas derived from the corpus averages
//! - Quota-steered generation with a forced-advance fallback
//! - Word-list I/O helpers
//!
//! Generation is deterministic: a trained chain always returns the same word.

/// Chain engine, ranker and the small types they share.
pub mod model;

/// I/O utilities (word lists, corpus file listing, path helpers).
pub mod io;

/// Error type returned by chain construction and training.
pub mod error;

pub use error::ChainError;
pub use model::chain::{Chain, MAX_PREFIX_LEN};
pub use model::quota::QuotaRounding;
