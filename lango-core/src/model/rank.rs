use std::cmp::Reverse;
use std::collections::HashMap;

/// Orders candidate characters by descending occurrence count.
///
/// Ties are broken by ascending character value, so the result never
/// depends on the iteration order of `counts`. Every key appears exactly
/// once in the output.
pub fn rank(counts: &HashMap<char, usize>) -> Vec<char> {
	let mut ranked: Vec<(char, usize)> = counts.iter().map(|(c, n)| (*c, *n)).collect();
	ranked.sort_unstable_by_key(|&(c, n)| (Reverse(n), c));
	ranked.into_iter().map(|(c, _)| c).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rank_by_count_then_char() {
		let counts = HashMap::from([
			('k', 1),
			('a', 4),
			('i', 1),
			('x', 1),
			('o', 4),
			('h', 2),
			('l', 3),
		]);
		assert_eq!(rank(&counts), vec!['a', 'o', 'l', 'h', 'i', 'k', 'x']);
	}

	#[test]
	fn test_rank_empty() {
		assert!(rank(&HashMap::new()).is_empty());
	}

	#[test]
	fn test_rank_keeps_every_key_once() {
		let counts: HashMap<char, usize> = "zyxwvutsrqponmlkjihgfedcba"
			.chars()
			.enumerate()
			.map(|(i, c)| (c, i % 3 + 1))
			.collect();

		let ranked = rank(&counts);
		assert_eq!(ranked.len(), counts.len());
		for pair in ranked.windows(2) {
			let (a, b) = (pair[0], pair[1]);
			assert!(counts[&a] > counts[&b] || (counts[&a] == counts[&b] && a < b));
		}
	}

	#[test]
	fn test_rank_non_ascii() {
		let counts = HashMap::from([('ñ', 2), ('n', 2), ('\0', 1)]);
		assert_eq!(rank(&counts), vec!['n', 'ñ', '\0']);
	}
}
