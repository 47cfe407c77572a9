use std::collections::HashMap;

use log::{debug, trace};

use super::class::CharClass;
use super::prefix::Prefix;
use super::quota::{Quota, QuotaRounding};
use super::rank::rank;
use crate::error::{ChainError, Result};

/// Longest prefix a chain accepts. Every table key holds this many
/// characters, and words are far shorter, so longer windows only add
/// sentinel padding.
pub const MAX_PREFIX_LEN: usize = 32;

/// Character-level Markov chain steered by vowel/consonant quotas.
///
/// The chain maps every prefix (the last `prefix_len` characters, padded
/// with sentinels at the start of a word) to the characters observed right
/// after it, ranked most frequent first.
///
/// ## Lifecycle
/// - [`Chain::new`] creates an empty chain
/// - [`Chain::build`] trains it once on a word list
/// - [`Chain::generate`] can then be called any number of times and never
///   mutates the chain, so a built chain can be shared between readers
///
/// ## Invariants
/// - `prefix_len >= 1`
/// - Every table key has exactly `prefix_len` characters
/// - Every candidate list is ranked and has no duplicates
#[derive(Clone, Debug)]
pub struct Chain {
	prefix_len: usize,
	rounding: QuotaRounding,
	/// Ranked candidates per prefix key.
	/// Example: { "ol" => ['a'], "\0\0" => ['h', 'k', 'o'] }
	table: HashMap<String, Vec<char>>,
	vowel_quota: usize,
	consonant_quota: usize,
	built: bool,
}

/// Training stage of a chain: raw occurrence counts and class totals.
///
/// Lives only for the duration of [`Chain::build`], which ranks it into
/// the final table.
struct Accumulator {
	prefix_len: usize,
	counts: HashMap<String, HashMap<char, usize>>,
	vowels: usize,
	others: usize,
	words: usize,
}

impl Accumulator {
	fn new(prefix_len: usize) -> Self {
		Self { prefix_len, counts: HashMap::new(), vowels: 0, others: 0, words: 0 }
	}

	/// Records every transition of `word`. The prefix restarts empty for
	/// each word, class totals keep accumulating across words.
	fn add_word(&mut self, word: &str) {
		self.words += 1;
		let mut prefix = Prefix::new(self.prefix_len);
		for c in word.chars() {
			match CharClass::of(c) {
				CharClass::Vowel => self.vowels += 1,
				CharClass::Other => self.others += 1,
			}
			*self.counts.entry(prefix.key()).or_default().entry(c).or_insert(0) += 1;
			prefix.shift(c);
		}
	}

	fn ranked(&self) -> HashMap<String, Vec<char>> {
		self.counts.iter().map(|(key, counts)| (key.clone(), rank(counts))).collect()
	}
}

impl Chain {
	/// Creates an empty chain whose prefixes hold `prefix_len` characters,
	/// averaging quotas to the nearest integer.
	///
	/// # Errors
	/// Returns an error unless `1 <= prefix_len <= MAX_PREFIX_LEN`.
	pub fn new(prefix_len: usize) -> Result<Self> {
		Self::with_rounding(prefix_len, QuotaRounding::default())
	}

	/// Same as [`Chain::new`] with an explicit quota rounding policy.
	pub fn with_rounding(prefix_len: usize, rounding: QuotaRounding) -> Result<Self> {
		if !(1..=MAX_PREFIX_LEN).contains(&prefix_len) {
			return Err(ChainError::InvalidPrefixLength { len: prefix_len, max: MAX_PREFIX_LEN });
		}
		Ok(Self {
			prefix_len,
			rounding,
			table: HashMap::new(),
			vowel_quota: 0,
			consonant_quota: 0,
			built: false,
		})
	}

	/// Trains the chain on a word list.
	///
	/// For each word, every character is recorded as a successor of the
	/// prefix preceding it. Once all words are read, the vowel and consonant
	/// quotas are set to the per-word averages and each prefix's successors
	/// are ranked.
	///
	/// Empty words are accepted: they add no transition but still count in
	/// the averages.
	///
	/// # Errors
	/// - `EmptyCorpus` if `words` yields nothing; the chain is left untouched
	/// - `AlreadyBuilt` if the chain was already trained
	pub fn build<I, S>(&mut self, words: I) -> Result<()>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		if self.built {
			return Err(ChainError::AlreadyBuilt);
		}

		let mut accumulator = Accumulator::new(self.prefix_len);
		for word in words {
			accumulator.add_word(word.as_ref());
		}
		if accumulator.words == 0 {
			return Err(ChainError::EmptyCorpus);
		}

		self.vowel_quota = self.rounding.average(accumulator.vowels, accumulator.words);
		self.consonant_quota = self.rounding.average(accumulator.others, accumulator.words);
		self.table = accumulator.ranked();
		self.built = true;

		debug!(
			"built chain from {} words: {} prefixes, {} vowels / {} others, quota {} vowels / {} consonants ({})",
			accumulator.words,
			self.table.len(),
			accumulator.vowels,
			accumulator.others,
			self.vowel_quota,
			self.consonant_quota,
			self.rounding,
		);
		Ok(())
	}

	/// Generates one word.
	///
	/// Starting from an empty prefix, repeatedly picks the best ranked
	/// candidate whose class still has quota left, until the quotas are
	/// spent or the current prefix has no candidates.
	///
	/// When every candidate's class is exhausted, the prefix is advanced
	/// with the top candidate without emitting it (a forced advance).
	/// Forced advances don't use up the budget; a run of them longer than
	/// the number of prefixes is a cycle and ends generation.
	///
	/// The result only depends on the trained chain: an untrained chain
	/// always yields an empty string.
	pub fn generate(&self) -> String {
		if self.table.is_empty() {
			return String::new();
		}

		let mut prefix = Prefix::new(self.prefix_len);
		let mut quota = Quota::new(self.vowel_quota, self.consonant_quota);
		let budget = self.vowel_quota + self.consonant_quota;

		let mut word = String::new();
		let mut produced = 0;
		let mut forced_run = 0;
		while produced < budget {
			let Some(candidates) = self.table.get(&prefix.key()) else {
				break;
			};
			let Some((&first, _)) = candidates.split_first() else {
				break;
			};

			match Self::choose_next(candidates, &mut quota) {
				Some(next) => {
					trace!("'{prefix}' => {candidates:?} => '{next}' {quota}");
					word.push(next);
					prefix.shift(next);
					produced += 1;
					forced_run = 0;
				}
				None => {
					if forced_run >= self.table.len() {
						trace!("'{prefix}' => forced advance cycle, stopping");
						break;
					}
					trace!("'{prefix}' => {candidates:?} => forced '{first}' {quota}");
					prefix.shift(first);
					forced_run += 1;
				}
			}
		}

		word
	}

	/// Returns the first candidate, in ranked order, whose class still has
	/// quota, and consumes one unit of that quota.
	///
	/// Returns `None` without touching `quota` if no candidate fits.
	pub fn choose_next(candidates: &[char], quota: &mut Quota) -> Option<char> {
		candidates.iter().copied().find(|&c| quota.take(CharClass::of(c)))
	}

	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	pub fn rounding(&self) -> QuotaRounding {
		self.rounding
	}

	/// Average number of vowels per training word.
	pub fn vowel_quota(&self) -> usize {
		self.vowel_quota
	}

	/// Average number of non-vowels per training word.
	pub fn consonant_quota(&self) -> usize {
		self.consonant_quota
	}

	pub fn is_built(&self) -> bool {
		self.built
	}

	/// Ranked candidates following `key`, if the prefix was ever seen.
	pub fn candidates(&self, key: &str) -> Option<&[char]> {
		self.table.get(key).map(Vec::as_slice)
	}

	/// Number of distinct prefixes in the table.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}
}
