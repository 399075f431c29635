// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! PKCE (Proof Key for Code Exchange) for OAuth 2.0, RFC 7636.
//!
//! The verifier travels twice: hashed into the authorization request as the
//! `code_challenge`, then raw in the token request as `code_verifier`. The
//! authorization server binds the two, so a stolen authorization code is
//! useless without the verifier. A pair must never be reused across sign-in
//! attempts.

use sha2::{Digest, Sha256};

use crate::base64url;
use crate::random::{secure_random_string, RandomStringError};
use crate::secret::SecretString;

/// The unreserved URI characters a verifier may contain:
/// `[A-Z] / [a-z] / [0-9] / "-" / "." / "_" / "~"`.
pub const UNRESERVED_CHARACTERS: &str =
	"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// A high-entropy PKCE code verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeVerifier(SecretString);

impl CodeVerifier {
	pub const MIN_LENGTH: usize = 43;
	pub const MAX_LENGTH: usize = 128;

	/// Validates an existing verifier.
	///
	/// Returns `None` if the length is outside `[43, 128]` or any character is
	/// not an unreserved URI character.
	pub fn new(value: impl Into<String>) -> Option<Self> {
		let value = value.into();
		let length = value.chars().count();

		if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
			return None;
		}
		if !value.chars().all(|c| UNRESERVED_CHARACTERS.contains(c)) {
			return None;
		}

		Some(Self(SecretString::new(value)))
	}

	/// A random verifier of the maximum length.
	///
	/// # Errors
	///
	/// Fails only if the operating system entropy source is unavailable.
	pub fn random() -> Result<Self, RandomStringError> {
		Self::random_with_length(Self::MAX_LENGTH)
	}

	/// A random verifier. `length` is clamped into `[43, 128]`.
	///
	/// # Errors
	///
	/// Fails only if the operating system entropy source is unavailable.
	pub fn random_with_length(length: usize) -> Result<Self, RandomStringError> {
		let length = length.clamp(Self::MIN_LENGTH, Self::MAX_LENGTH);
		let alphabet: Vec<char> = UNRESERVED_CHARACTERS.chars().collect();
		let value = secure_random_string(&alphabet, length)?;

		Ok(Self(SecretString::new(value)))
	}

	/// The raw verifier, as sent to the token endpoint.
	pub fn expose(&self) -> &str {
		self.0.expose()
	}

	pub fn len(&self) -> usize {
		self.0.expose().len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.expose().is_empty()
	}
}

/// How the challenge is derived from the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeChallengeMethod {
	/// `BASE64URL(SHA256(verifier))`.
	#[default]
	S256,
	/// The challenge is the verifier itself. Offers no protection against
	/// interception; only compiled for tests or with `insecure-plain-pkce`.
	#[cfg(any(test, feature = "insecure-plain-pkce"))]
	Plain,
}

impl CodeChallengeMethod {
	/// The `code_challenge_method` query value. Case matters on the wire.
	pub fn url_query_parameter_value(&self) -> &'static str {
		match self {
			Self::S256 => "S256",
			#[cfg(any(test, feature = "insecure-plain-pkce"))]
			Self::Plain => "plain",
		}
	}
}

/// A code verifier together with the method used to derive its challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofKeyForCodeExchange {
	code_verifier: CodeVerifier,
	method: CodeChallengeMethod,
}

impl ProofKeyForCodeExchange {
	pub fn new(code_verifier: CodeVerifier, method: CodeChallengeMethod) -> Self {
		Self {
			code_verifier,
			method,
		}
	}

	/// A fresh pair for a new sign-in attempt: 128 random characters, `S256`.
	///
	/// # Errors
	///
	/// Fails only if the operating system entropy source is unavailable.
	pub fn generate() -> Result<Self, RandomStringError> {
		Ok(Self::new(CodeVerifier::random()?, CodeChallengeMethod::S256))
	}

	pub fn code_verifier(&self) -> &CodeVerifier {
		&self.code_verifier
	}

	pub fn method(&self) -> CodeChallengeMethod {
		self.method
	}

	/// The value sent as `code_challenge` in the authorization request.
	pub fn code_challenge(&self) -> String {
		match self.method {
			CodeChallengeMethod::S256 => {
				base64url::encode(Sha256::digest(self.code_verifier.expose().as_bytes()))
			}
			#[cfg(any(test, feature = "insecure-plain-pkce"))]
			CodeChallengeMethod::Plain => self.code_verifier.expose().to_string(),
		}
	}
}
