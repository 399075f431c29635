// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! "base64url" encoding (RFC 4648 §5), as used by PKCE challenges and JWT
//! segments.
//!
//! Encoding never emits padding. Decoding restores any missing padding
//! before handing the input to the standard alphabet, so both padded and
//! unpadded input is accepted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub use base64::DecodeError;

/// Encode `bytes` as unpadded base64url.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
	STANDARD
		.encode(bytes)
		.replace('+', "-")
		.replace('/', "_")
		.trim_end_matches('=')
		.to_string()
}

/// Decode base64url (padded or not) into bytes.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the input has an impossible length (one
/// character past a multiple of four) or contains characters outside the
/// alphabet.
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
	let mut base64 = input.replace('-', "+").replace('_', "/");

	let remainder = base64.len() % 4;
	if remainder != 0 {
		base64.extend(std::iter::repeat('=').take(4 - remainder));
	}

	STANDARD.decode(base64)
}
