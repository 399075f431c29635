// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cryptographically secure random strings over a caller-supplied alphabet.

/// Errors from [`secure_random_string`].
#[derive(Debug, thiserror::Error)]
pub enum RandomStringError {
	/// There is nothing to draw characters from.
	#[error("cannot build a random string from an empty alphabet")]
	EmptyAlphabet,

	/// The operating system entropy source failed. There is no fallback.
	#[error("secure random number generator failed: {0}")]
	Entropy(#[from] getrandom::Error),
}

/// Returns a string of `length` characters drawn from `alphabet` using the
/// operating system's CSPRNG.
///
/// Each character is picked by reducing one random byte modulo the alphabet
/// size. For alphabets whose size does not divide 256 this is slightly
/// biased towards the first characters; that bias is accepted here.
///
/// # Errors
///
/// - [`RandomStringError::EmptyAlphabet`] if `alphabet` is empty.
/// - [`RandomStringError::Entropy`] if the entropy source is unavailable.
pub fn secure_random_string(alphabet: &[char], length: usize) -> Result<String, RandomStringError> {
	if alphabet.is_empty() {
		return Err(RandomStringError::EmptyAlphabet);
	}

	let mut bytes = vec![0u8; length];
	getrandom::getrandom(&mut bytes)?;

	Ok(
		bytes
			.iter()
			.map(|byte| alphabet[usize::from(*byte) % alphabet.len()])
			.collect(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn produces_requested_length() {
		let alphabet: Vec<char> = "abc".chars().collect();
		for length in [0, 1, 43, 128, 500] {
			let value = secure_random_string(&alphabet, length).unwrap();
			assert_eq!(value.chars().count(), length);
		}
	}

	#[test]
	fn only_uses_alphabet_characters() {
		let alphabet = ['x', 'y', '~'];
		let value = secure_random_string(&alphabet, 256).unwrap();
		assert!(value.chars().all(|c| alphabet.contains(&c)));
	}

	#[test]
	fn single_character_alphabet_repeats_it() {
		assert_eq!(secure_random_string(&['z'], 5).unwrap(), "zzzzz");
	}

	#[test]
	fn supports_non_ascii_alphabets() {
		let alphabet = ['é', 'ß', '雪'];
		let value = secure_random_string(&alphabet, 64).unwrap();
		assert_eq!(value.chars().count(), 64);
		assert!(value.chars().all(|c| alphabet.contains(&c)));
	}

	#[test]
	fn empty_alphabet_is_rejected() {
		assert!(matches!(
			secure_random_string(&[], 10),
			Err(RandomStringError::EmptyAlphabet)
		));
	}

	#[test]
	fn consecutive_values_differ() {
		let alphabet: Vec<char> = ('a'..='z').collect();
		let first = secure_random_string(&alphabet, 64).unwrap();
		let second = secure_random_string(&alphabet, 64).unwrap();
		assert_ne!(first, second);
	}
}
