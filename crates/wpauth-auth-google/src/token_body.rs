// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token endpoint request and response bodies (RFC 6749 §4.1.3, §5.1).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client_id::GoogleClientId;
use crate::error::OAuthError;
use crate::id_token::IdToken;
use crate::pkce::{CodeVerifier, ProofKeyForCodeExchange};
use crate::secret::{SecretString, REDACTED};

const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

/// The form posted to the token endpoint to redeem an authorization code.
#[derive(Clone, Serialize)]
pub struct OAuthTokenRequestBody {
	client_id: String,
	client_secret: String,
	code: String,
	code_verifier: String,
	grant_type: String,
	redirect_uri: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	audience: Option<String>,
}

impl OAuthTokenRequestBody {
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		audience: Option<String>,
		code: impl Into<String>,
		code_verifier: &CodeVerifier,
		grant_type: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			code: code.into(),
			code_verifier: code_verifier.expose().to_string(),
			grant_type: grant_type.into(),
			redirect_uri: redirect_uri.into(),
			audience,
		}
	}

	/// The request an installed Google app sends: no client secret, the
	/// reversed-client-id redirect URI and the raw PKCE verifier.
	pub fn google_sign_in(
		client_id: &GoogleClientId,
		audience: Option<&str>,
		code: impl Into<String>,
		pkce: &ProofKeyForCodeExchange,
	) -> Self {
		Self::new(
			client_id.as_str(),
			"",
			audience.map(str::to_string),
			code,
			pkce.code_verifier(),
			AUTHORIZATION_CODE_GRANT,
			client_id.redirect_uri(),
		)
	}

	/// `application/x-www-form-urlencoded` serialization.
	///
	/// # Errors
	///
	/// Returns [`OAuthError::TokenRequestEncoding`] if serialization fails.
	pub fn to_url_encoded(&self) -> Result<String, OAuthError> {
		Ok(serde_urlencoded::to_string(self)?)
	}
}

impl fmt::Debug for OAuthTokenRequestBody {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OAuthTokenRequestBody")
			.field("client_id", &self.client_id)
			.field("code", &REDACTED)
			.field("code_verifier", &REDACTED)
			.field("grant_type", &self.grant_type)
			.field("redirect_uri", &self.redirect_uri)
			.field("audience", &self.audience)
			.finish_non_exhaustive()
	}
}

/// A successful token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokenResponseBody {
	pub access_token: SecretString,
	pub expires_in: u64,
	#[serde(rename = "id_token", default)]
	pub raw_id_token: Option<SecretString>,
	#[serde(default)]
	pub refresh_token: Option<SecretString>,
	pub scope: String,
	pub token_type: String,
}

impl OAuthTokenResponseBody {
	/// The decoded ID token, if one was returned and carries an email.
	pub fn id_token(&self) -> Option<IdToken> {
		self
			.raw_id_token
			.as_ref()
			.and_then(|token| IdToken::decode(token.expose()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::jwt::fixtures;
	use crate::pkce::CodeChallengeMethod;

	fn pairs(encoded: &str) -> Vec<(String, String)> {
		serde_urlencoded::from_str(encoded).unwrap()
	}

	#[test]
	fn encodes_all_fields_in_order() {
		let verifier = CodeVerifier::new("a".repeat(43)).unwrap();
		let body = OAuthTokenRequestBody::new(
			"client_id",
			"client_secret",
			None,
			"code",
			&verifier,
			"grant_type",
			"redirect_uri",
		);

		assert_eq!(
			pairs(&body.to_url_encoded().unwrap()),
			vec![
				("client_id".to_string(), "client_id".to_string()),
				("client_secret".to_string(), "client_secret".to_string()),
				("code".to_string(), "code".to_string()),
				("code_verifier".to_string(), "a".repeat(43)),
				("grant_type".to_string(), "grant_type".to_string()),
				("redirect_uri".to_string(), "redirect_uri".to_string()),
			]
		);
	}

	#[test]
	fn audience_is_appended_when_present() {
		let verifier = CodeVerifier::new("a".repeat(43)).unwrap();
		let body = OAuthTokenRequestBody::new(
			"c",
			"",
			Some("server.apps.googleusercontent.com".to_string()),
			"x",
			&verifier,
			"g",
			"r",
		);

		let encoded = body.to_url_encoded().unwrap();
		assert!(encoded.ends_with("&audience=server.apps.googleusercontent.com"));
	}

	#[test]
	fn google_sign_in_uses_installed_app_values() {
		let client_id = GoogleClientId::new("123-abc.apps.googleusercontent.com").unwrap();
		let pkce = ProofKeyForCodeExchange::new(
			CodeVerifier::new("b".repeat(50)).unwrap(),
			CodeChallengeMethod::S256,
		);
		let body = OAuthTokenRequestBody::google_sign_in(&client_id, None, "4/auth code", &pkce);

		let encoded = body.to_url_encoded().unwrap();
		assert!(encoded.contains("client_secret=&"));
		assert!(encoded.contains("code=4%2Fauth+code"));
		assert!(encoded.contains("grant_type=authorization_code"));
		assert!(encoded.contains(&format!("code_verifier={}", "b".repeat(50))));
		assert!(encoded
			.contains("redirect_uri=com.googleusercontent.apps.123-abc%3A%2Foauth2callback"));
		assert!(!encoded.contains("audience"));
	}

	#[test]
	fn debug_redacts_code_and_verifier() {
		let client_id = GoogleClientId::new("a.b").unwrap();
		let pkce = ProofKeyForCodeExchange::generate().unwrap();
		let body = OAuthTokenRequestBody::google_sign_in(&client_id, None, "sensitive-code", &pkce);

		let debug = format!("{body:?}");
		assert!(!debug.contains("sensitive-code"));
		assert!(!debug.contains(pkce.code_verifier().expose()));
	}

	#[test]
	fn decodes_minimal_response() {
		let body: OAuthTokenResponseBody = serde_json::from_str(
			r#"{"access_token":"token","expires_in":1,"scope":"s","token_type":"t"}"#,
		)
		.unwrap();

		assert_eq!(body.access_token.expose(), "token");
		assert_eq!(body.expires_in, 1);
		assert!(body.raw_id_token.is_none());
		assert!(body.refresh_token.is_none());
		assert!(body.id_token().is_none());
	}

	#[test]
	fn decodes_full_response_with_id_token() {
		let json = format!(
			r#"{{"access_token":"ya29.a0","expires_in":3599,"id_token":"{}","refresh_token":"1//0g","scope":"openid email","token_type":"Bearer"}}"#,
			fixtures::JWT_WITH_EMAIL
		);
		let body: OAuthTokenResponseBody = serde_json::from_str(&json).unwrap();

		assert_eq!(body.refresh_token.as_ref().unwrap().expose(), "1//0g");
		assert_eq!(body.token_type, "Bearer");
		assert_eq!(body.id_token().unwrap().email(), fixtures::EMAIL);
	}

	#[test]
	fn missing_required_field_fails() {
		let result: Result<OAuthTokenResponseBody, _> =
			serde_json::from_str(r#"{"access_token":"token","scope":"s","token_type":"t"}"#);
		assert!(result.is_err());
	}

	#[test]
	fn response_debug_redacts_tokens() {
		let body: OAuthTokenResponseBody = serde_json::from_str(
			&format!(
				r#"{{"access_token":"ya29.secret","expires_in":1,"id_token":"{}","refresh_token":"1//refresh","scope":"s","token_type":"t"}}"#,
				fixtures::JWT_WITH_EMAIL
			),
		)
		.unwrap();
		let debug = format!("{body:?}");
		assert!(!debug.contains("ya29.secret"));
		assert!(!debug.contains("1//refresh"));
		assert!(!debug.contains(fixtures::JWT_WITH_EMAIL));
		assert!(body.id_token().is_some());
	}
}
