//! Top-level module for the chain engine.
//!
//! Contains:
//! - The chain itself (`Chain`): training and quota-steered generation
//! - Ranking of candidate characters (`rank`)
//! - The rolling prefix window (`Prefix`)
//! - Vowel/other classification (`CharClass`)
//! - Quota bookkeeping and rounding policy (`Quota`, `QuotaRounding`)

/// Markov chain trained on a word list.
///
/// Handles corpus ingestion, quota computation, ranking of every prefix's
/// candidates and deterministic word generation.
pub mod chain;

/// Deterministic ordering of candidate characters by frequency.
pub mod rank;

/// Fixed-length rolling window used as the chain key.
pub mod prefix;

/// Binary vowel / other character classification.
pub mod class;

/// Remaining-quota counter and the policy used to average corpus quotas.
pub mod quota;
