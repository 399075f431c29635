// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

/// Path Google appends to the reversed client id to form the redirect URI of
/// an installed application.
const REDIRECT_PATH: &str = "/oauth2callback";

/// An OAuth client id issued by Google for an installed application, such as
/// `123-abc.apps.googleusercontent.com`.
///
/// Only reverse-domain shaped values are accepted: at least two non-empty
/// labels separated by `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoogleClientId(String);

impl GoogleClientId {
	/// Returns `None` when `value` is not in reverse-domain form.
	pub fn new(value: impl Into<String>) -> Option<Self> {
		let value = value.into();
		if value.split('.').filter(|label| !label.is_empty()).count() < 2 {
			return None;
		}
		Some(Self(value))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The custom URL scheme Google redirects to: the client id with its
	/// labels reversed.
	///
	/// `123-abc.apps.googleusercontent.com` becomes
	/// `com.googleusercontent.apps.123-abc`.
	pub fn callback_scheme(&self) -> String {
		self.0.split('.').rev().collect::<Vec<_>>().join(".")
	}

	/// The default redirect URI for this client, e.g.
	/// `com.googleusercontent.apps.123-abc:/oauth2callback`.
	pub fn redirect_uri(&self) -> String {
		format!("{}:{REDIRECT_PATH}", self.callback_scheme())
	}
}

impl fmt::Display for GoogleClientId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for GoogleClientId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn rejects_values_without_a_dot() {
		assert!(GoogleClientId::new("invalid").is_none());
		assert!(GoogleClientId::new("").is_none());
	}

	#[test]
	fn rejects_values_with_only_one_label() {
		assert!(GoogleClientId::new(".").is_none());
		assert!(GoogleClientId::new("abc.").is_none());
		assert!(GoogleClientId::new(".abc").is_none());
	}

	#[test]
	fn accepts_reverse_domain_values() {
		assert!(GoogleClientId::new("a.b.c").is_some());
		assert!(GoogleClientId::new("com.something.something").is_some());
	}

	#[test]
	fn callback_scheme_reverses_labels() {
		let client_id = GoogleClientId::new("123-abc.apps.googleusercontent.com").unwrap();
		assert_eq!(client_id.callback_scheme(), "com.googleusercontent.apps.123-abc");
	}

	#[test]
	fn redirect_uri_follows_installed_app_convention() {
		let client_id = GoogleClientId::new("123-abc245def.apps.googleusercontent.com").unwrap();
		assert_eq!(
			client_id.redirect_uri(),
			"com.googleusercontent.apps.123-abc245def:/oauth2callback"
		);
	}

	proptest! {
		#[test]
		fn reversing_twice_is_identity(labels in proptest::collection::vec("[a-z0-9-]{1,12}", 2..6)) {
			let client_id = GoogleClientId::new(labels.join(".")).unwrap();
			let reversed = GoogleClientId::new(client_id.callback_scheme()).unwrap();
			prop_assert_eq!(reversed.callback_scheme(), client_id.as_str());
		}
	}
}
