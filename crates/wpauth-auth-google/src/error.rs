// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use url::Url;

use crate::random::RandomStringError;
use crate::session::SessionError;
use crate::transport::TransportError;

/// Errors surfaced by a sign-in attempt.
///
/// Capability errors are wrapped unchanged so callers can tell a user
/// cancellation from a network failure.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
	/// The web session completed with neither a callback URL nor an error.
	#[error("web authentication session finished without a callback URL or an error")]
	InconsistentSessionCompletion,

	#[error("web authentication session failed: {0}")]
	Session(#[from] SessionError),

	/// The callback URL is kept whole so the provider's `error` parameters
	/// can be inspected.
	#[error("could not find 'code' parameter in URL '{url}'")]
	MissingCodeParameter { url: Url },

	#[error("failed to encode token request body: {0}")]
	TokenRequestEncoding(#[from] serde_urlencoded::ser::Error),

	#[error("token request failed: {0}")]
	Transport(#[from] TransportError),

	#[error("failed to decode token response: {0}")]
	ResponseDecode(#[from] serde_json::Error),

	#[error("failed to generate PKCE verifier: {0}")]
	SecureRandom(#[from] RandomStringError),
}

impl OAuthError {
	/// True when the user dismissed the browser session.
	pub fn is_cancellation(&self) -> bool {
		matches!(self, Self::Session(SessionError::Cancelled))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_code_message_includes_url() {
		let err = OAuthError::MissingCodeParameter {
			url: Url::parse("https://test.com?error=access_denied").unwrap(),
		};
		assert_eq!(
			err.to_string(),
			"could not find 'code' parameter in URL 'https://test.com/?error=access_denied'"
		);
	}

	#[test]
	fn only_cancelled_sessions_are_cancellations() {
		assert!(OAuthError::from(SessionError::Cancelled).is_cancellation());
		assert!(!OAuthError::from(SessionError::Failed("boom".into())).is_cancellation());
		assert!(!OAuthError::InconsistentSessionCompletion.is_cancellation());
	}
}
