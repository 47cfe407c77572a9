use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing or training a [`Chain`](crate::Chain).
///
/// Generation itself never fails: unknown prefixes and exhausted quotas
/// only shorten the generated word.
#[derive(Debug, Error)]
pub enum ChainError {
	/// The prefix window must hold between 1 and `max` characters.
	#[error("prefix length must be between 1 and {max}, got {len}")]
	InvalidPrefixLength { len: usize, max: usize },

	/// `build` was given no words, so no quota can be averaged.
	#[error("cannot build a chain from an empty corpus")]
	EmptyCorpus,

	/// `build` was already called on this chain.
	#[error("chain is already built")]
	AlreadyBuilt,

	/// A word list could not be read.
	#[error("failed to read word list '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Convenience alias for chain results.
pub type Result<T> = std::result::Result<T, ChainError>;
