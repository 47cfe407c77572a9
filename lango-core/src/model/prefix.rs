use std::fmt;

/// Value filling an empty prefix slot.
pub const SENTINEL: char = '\0';

/// The last `len` characters seen, oldest first.
///
/// A prefix starts filled with [`SENTINEL`] and keeps its length forever:
/// [`Prefix::shift`] drops the oldest character and appends the new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
	window: Vec<char>,
}

impl Prefix {
	/// Creates an empty prefix of `len` sentinel characters.
	pub fn new(len: usize) -> Self {
		Self { window: vec![SENTINEL; len] }
	}

	/// Drops the first character and appends `c`, in place.
	pub fn shift(&mut self, c: char) {
		if let Some(last) = self.window.len().checked_sub(1) {
			self.window.rotate_left(1);
			self.window[last] = c;
		}
	}

	pub fn len(&self) -> usize {
		self.window.len()
	}

	pub fn is_empty(&self) -> bool {
		self.window.is_empty()
	}

	/// Chain table key for this prefix.
	pub fn key(&self) -> String {
		self.window.iter().collect()
	}
}

impl fmt::Display for Prefix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Sentinels are not printable, show them as dots in traces.
		for c in &self.window {
			let shown = if *c == SENTINEL { '.' } else { *c };
			write!(f, "{shown}")?;
		}
		Ok(())
	}
}
