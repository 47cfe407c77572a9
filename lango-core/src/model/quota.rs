use std::fmt;
use std::str::FromStr;

use super::class::CharClass;

/// How corpus totals are averaged into per-word quotas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuotaRounding {
	/// `floor(total / words)`.
	Floor,
	/// Nearest integer, halves rounded up.
	#[default]
	Nearest,
}

impl QuotaRounding {
	/// Averages `total` over `words`.
	///
	/// `words` must be non-zero, the chain refuses empty corpora before
	/// getting here.
	pub fn average(self, total: usize, words: usize) -> usize {
		match self {
			QuotaRounding::Floor => total / words,
			QuotaRounding::Nearest => (2 * total + words) / (2 * words),
		}
	}
}

impl FromStr for QuotaRounding {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"floor" => Ok(QuotaRounding::Floor),
			"nearest" => Ok(QuotaRounding::Nearest),
			other => Err(format!("unknown rounding '{other}', expected 'floor' or 'nearest'")),
		}
	}
}

impl fmt::Display for QuotaRounding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			QuotaRounding::Floor => f.write_str("floor"),
			QuotaRounding::Nearest => f.write_str("nearest"),
		}
	}
}

/// Remaining vowels and others a generated word may still use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quota {
	pub vowels: usize,
	pub others: usize,
}

impl Quota {
	pub fn new(vowels: usize, others: usize) -> Self {
		Self { vowels, others }
	}

	pub fn remaining(&self, class: CharClass) -> usize {
		match class {
			CharClass::Vowel => self.vowels,
			CharClass::Other => self.others,
		}
	}

	/// Consumes one unit of `class` quota.
	///
	/// Returns `false`, leaving the quota unchanged, if that class is exhausted.
	pub fn take(&mut self, class: CharClass) -> bool {
		let slot = match class {
			CharClass::Vowel => &mut self.vowels,
			CharClass::Other => &mut self.others,
		};
		match slot.checked_sub(1) {
			Some(left) => {
				*slot = left;
				true
			}
			None => false,
		}
	}
}

impl fmt::Display for Quota {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{} {}]", self.vowels, self.others)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_floor_average() {
		assert_eq!(QuotaRounding::Floor.average(9, 4), 2);
		assert_eq!(QuotaRounding::Floor.average(7, 4), 1);
		assert_eq!(QuotaRounding::Floor.average(0, 3), 0);
	}

	#[test]
	fn test_nearest_average() {
		assert_eq!(QuotaRounding::Nearest.average(9, 4), 2);
		assert_eq!(QuotaRounding::Nearest.average(7, 4), 2);
		assert_eq!(QuotaRounding::Nearest.average(6, 4), 2);
		assert_eq!(QuotaRounding::Nearest.average(5, 4), 1);
		assert_eq!(QuotaRounding::Nearest.average(1, 3), 0);
	}

	#[test]
	fn test_integral_averages_agree() {
		for words in 1..10 {
			for per_word in 0..6 {
				let total = per_word * words;
				assert_eq!(QuotaRounding::Floor.average(total, words), per_word);
				assert_eq!(QuotaRounding::Nearest.average(total, words), per_word);
			}
		}
	}

	#[test]
	fn test_parse_rounding() {
		assert_eq!("floor".parse::<QuotaRounding>(), Ok(QuotaRounding::Floor));
		assert_eq!(" Nearest ".parse::<QuotaRounding>(), Ok(QuotaRounding::Nearest));
		assert!("ceil".parse::<QuotaRounding>().is_err());
		assert_eq!(QuotaRounding::default().to_string(), "nearest");
	}

	#[test]
	fn test_take_until_exhausted() {
		let mut quota = Quota::new(1, 0);
		assert!(quota.take(CharClass::Vowel));
		assert!(!quota.take(CharClass::Vowel));
		assert!(!quota.take(CharClass::Other));
		assert_eq!(quota, Quota::new(0, 0));
	}
}
