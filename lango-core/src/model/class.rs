/// Characters counted as vowels. Everything else is [`CharClass::Other`].
pub const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Class driving both quota computation and candidate selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
	Vowel,
	/// Consonants and any non-letter content.
	Other,
}

impl CharClass {
	pub fn of(c: char) -> Self {
		if VOWELS.contains(&c) { CharClass::Vowel } else { CharClass::Other }
	}
}
