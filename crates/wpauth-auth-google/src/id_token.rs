// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenID Connect ID tokens issued by Google.
//!
//! See <https://developers.google.com/identity/openid-connect/openid-connect#obtainuserinfo>.
//!
//! # Security Note
//!
//! An [`IdToken`] is built from a decoded but *unverified* JWT. Its email is
//! not authenticated until the signature has been checked against Google's
//! published JWKS. [`IdToken::validate_claims`] covers issuer, audience and
//! expiry but not the signature; callers that make authorization decisions
//! from the email must verify the signature themselves, or hand
//! [`IdToken::token`] to a backend that does.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::jwt::{Claims, JsonWebToken};

/// Issuers Google uses in the `iss` claim.
pub const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Reasons an ID token's standard claims were rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdTokenValidationError {
	#[error("ID token is missing the '{0}' claim")]
	MissingClaim(&'static str),

	#[error("ID token issuer '{0}' is not Google")]
	UntrustedIssuer(String),

	#[error("ID token audience does not include '{expected}'")]
	AudienceMismatch { expected: String },

	#[error("ID token expired at {expired_at}")]
	Expired { expired_at: DateTime<Utc> },
}

/// A Google ID token carrying an email claim.
#[derive(Debug, Clone, PartialEq)]
pub struct IdToken {
	jwt: JsonWebToken,
	email: String,
}

impl IdToken {
	/// Returns `None` unless the payload has a string `email` claim, which is
	/// only present when the identity email scope was granted.
	pub fn from_jwt(jwt: JsonWebToken) -> Option<Self> {
		let email = jwt.payload().get("email")?.as_str()?.to_string();
		Some(Self { jwt, email })
	}

	/// Decodes a compact JWT and extracts the email claim.
	pub fn decode(encoded: &str) -> Option<Self> {
		JsonWebToken::decode(encoded).and_then(Self::from_jwt)
	}

	/// The encoded token, suitable for forwarding to a backend.
	pub fn token(&self) -> &str {
		self.jwt.encoded()
	}

	pub fn email(&self) -> &str {
		&self.email
	}

	pub fn claims(&self) -> &Claims {
		self.jwt.payload()
	}

	/// Checks `iss`, `aud` and `exp`. Does not check the signature.
	///
	/// # Errors
	///
	/// Returns the first failing check as an [`IdTokenValidationError`].
	pub fn validate_claims(
		&self,
		expected_audience: &str,
		now: DateTime<Utc>,
	) -> Result<(), IdTokenValidationError> {
		let claims = self.claims();

		let issuer = claims
			.get("iss")
			.and_then(Value::as_str)
			.ok_or(IdTokenValidationError::MissingClaim("iss"))?;
		if !GOOGLE_ISSUERS.contains(&issuer) {
			return Err(IdTokenValidationError::UntrustedIssuer(issuer.to_string()));
		}

		let audience_matches = match claims.get("aud") {
			Some(Value::String(aud)) => aud == expected_audience,
			Some(Value::Array(auds)) => auds
				.iter()
				.any(|aud| aud.as_str() == Some(expected_audience)),
			_ => return Err(IdTokenValidationError::MissingClaim("aud")),
		};
		if !audience_matches {
			return Err(IdTokenValidationError::AudienceMismatch {
				expected: expected_audience.to_string(),
			});
		}

		let expires_at = claims
			.get("exp")
			.and_then(Value::as_i64)
			.and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
			.ok_or(IdTokenValidationError::MissingClaim("exp"))?;
		if expires_at <= now {
			return Err(IdTokenValidationError::Expired {
				expired_at: expires_at,
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::jwt::fixtures;
	use chrono::TimeZone;

	const AUDIENCE: &str = "123-server.apps.googleusercontent.com";

	fn google_token(payload: &str) -> IdToken {
		IdToken::decode(&fixtures::unsigned(r#"{"alg":"RS256","typ":"JWT"}"#, payload)).unwrap()
	}

	fn at(timestamp: i64) -> DateTime<Utc> {
		Utc.timestamp_opt(timestamp, 0).unwrap()
	}

	#[test]
	fn none_without_email_claim() {
		let jwt = JsonWebToken::decode(fixtures::JWT).unwrap();
		assert!(IdToken::from_jwt(jwt).is_none());
	}

	#[test]
	fn none_when_email_is_not_a_string() {
		let encoded = fixtures::unsigned(r#"{"alg":"none"}"#, r#"{"email":42}"#);
		assert!(IdToken::decode(&encoded).is_none());
	}

	#[test]
	fn extracts_email_and_keeps_encoded_token() {
		let jwt = JsonWebToken::decode(fixtures::JWT_WITH_EMAIL).unwrap();
		let token = IdToken::from_jwt(jwt).unwrap();

		assert_eq!(token.email(), fixtures::EMAIL);
		assert_eq!(token.token(), fixtures::JWT_WITH_EMAIL);
	}

	#[test]
	fn decode_rejects_malformed_tokens() {
		assert!(IdToken::decode("invalid").is_none());
	}

	#[test]
	fn validate_accepts_google_token_for_audience() {
		let token = google_token(&format!(
			r#"{{"iss":"https://accounts.google.com","aud":"{AUDIENCE}","exp":1735600000,"email":"a@b.c"}}"#
		));
		assert_eq!(token.validate_claims(AUDIENCE, at(1735596400)), Ok(()));
	}

	#[test]
	fn validate_accepts_bare_issuer_and_audience_array() {
		let token = google_token(&format!(
			r#"{{"iss":"accounts.google.com","aud":["other","{AUDIENCE}"],"exp":1735600000,"email":"a@b.c"}}"#
		));
		assert!(token.validate_claims(AUDIENCE, at(1735596400)).is_ok());
	}

	#[test]
	fn validate_rejects_foreign_issuer() {
		let token = google_token(&format!(
			r#"{{"iss":"https://evil.example","aud":"{AUDIENCE}","exp":1735600000,"email":"a@b.c"}}"#
		));
		assert_eq!(
			token.validate_claims(AUDIENCE, at(1735596400)),
			Err(IdTokenValidationError::UntrustedIssuer(
				"https://evil.example".to_string()
			))
		);
	}

	#[test]
	fn validate_rejects_other_audience() {
		let token = google_token(
			r#"{"iss":"accounts.google.com","aud":"someone-else","exp":1735600000,"email":"a@b.c"}"#,
		);
		assert!(matches!(
			token.validate_claims(AUDIENCE, at(1735596400)),
			Err(IdTokenValidationError::AudienceMismatch { .. })
		));
	}

	#[test]
	fn validate_rejects_expired_token() {
		let token = google_token(&format!(
			r#"{{"iss":"accounts.google.com","aud":"{AUDIENCE}","exp":1735600000,"email":"a@b.c"}}"#
		));
		assert_eq!(
			token.validate_claims(AUDIENCE, at(1735600000)),
			Err(IdTokenValidationError::Expired {
				expired_at: at(1735600000)
			})
		);
	}

	#[test]
	fn validate_reports_missing_claims() {
		let token = google_token(r#"{"email":"a@b.c"}"#);
		assert_eq!(
			token.validate_claims(AUDIENCE, at(0)),
			Err(IdTokenValidationError::MissingClaim("iss"))
		);

		let token = google_token(r#"{"iss":"accounts.google.com","email":"a@b.c"}"#);
		assert_eq!(
			token.validate_claims(AUDIENCE, at(0)),
			Err(IdTokenValidationError::MissingClaim("aud"))
		);
	}
}
