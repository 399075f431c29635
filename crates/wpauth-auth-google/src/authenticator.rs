// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Drives one sign-in attempt end to end.

use url::Url;

use crate::auth_url::authorization_url;
use crate::config::GoogleSignInConfig;
use crate::error::OAuthError;
use crate::pkce::ProofKeyForCodeExchange;
use crate::session::WebAuthenticationSession;
use crate::token_body::OAuthTokenResponseBody;
use crate::token_getter::{GoogleOAuthTokenGetter, GoogleOAuthTokenGetting};

/// Orchestrates PKCE generation, the browser session and the token exchange.
///
/// Holds no state between attempts. Every call generates a new PKCE pair, so
/// concurrent or repeated sign-ins never share a verifier.
pub struct GoogleAuthenticator<S, T = GoogleOAuthTokenGetter> {
	config: GoogleSignInConfig,
	session: S,
	token_getter: T,
}

impl<S, T> GoogleAuthenticator<S, T>
where
	S: WebAuthenticationSession,
	T: GoogleOAuthTokenGetting,
{
	pub fn new(config: GoogleSignInConfig, session: S, token_getter: T) -> Self {
		Self {
			config,
			session,
			token_getter,
		}
	}

	pub fn config(&self) -> &GoogleSignInConfig {
		&self.config
	}

	/// Signs the user in and returns the access token.
	///
	/// # Errors
	///
	/// See [`GoogleAuthenticator::sign_in`].
	pub async fn authenticate(&self) -> Result<String, OAuthError> {
		let response = self.sign_in().await?;
		Ok(response.access_token.expose().clone())
	}

	/// Signs the user in and returns the full token response, including the
	/// ID token when the email scope was granted.
	///
	/// # Errors
	///
	/// - [`OAuthError::SecureRandom`] if no PKCE verifier could be generated.
	/// - [`OAuthError::Session`] if the user cancelled or the session failed.
	/// - [`OAuthError::InconsistentSessionCompletion`] if the session returned
	///   neither a URL nor an error.
	/// - [`OAuthError::MissingCodeParameter`] if the callback has no `code`.
	/// - Any error from the token getter, unchanged.
	#[tracing::instrument(
		skip(self),
		fields(client_id = %self.config.client_id),
		name = "GoogleAuthenticator::sign_in"
	)]
	pub async fn sign_in(&self) -> Result<OAuthTokenResponseBody, OAuthError> {
		let pkce = ProofKeyForCodeExchange::generate()?;
		let url = authorization_url(
			&self.config.client_id,
			&pkce,
			&self.config.redirect_uri(),
			&self.config.scopes,
		);

		tracing::debug!(
			callback_scheme = %self.config.callback_scheme,
			scopes = %self.config.scopes_string(),
			"starting web authentication session"
		);
		let callback = self
			.session
			.start(&url, &self.config.callback_scheme)
			.await?
			.ok_or(OAuthError::InconsistentSessionCompletion)?;

		tracing::debug!("web authentication session returned a callback");
		self.request_oauth_token(&callback, &pkce).await
	}

	/// Redeems the authorization code carried by `callback`.
	///
	/// # Errors
	///
	/// [`OAuthError::MissingCodeParameter`] if the URL has no `code`, otherwise
	/// whatever the token getter returns.
	pub async fn request_oauth_token(
		&self,
		callback: &Url,
		pkce: &ProofKeyForCodeExchange,
	) -> Result<OAuthTokenResponseBody, OAuthError> {
		let code = extract_authorization_code(callback)?;
		self
			.token_getter
			.get_token(
				&self.config.client_id,
				self.config.audience.as_deref(),
				&code,
				pkce,
			)
			.await
	}
}

/// The first `code` query parameter of a callback URL.
///
/// # Errors
///
/// Returns [`OAuthError::MissingCodeParameter`] carrying the full URL when
/// there is no `code` parameter.
pub fn extract_authorization_code(callback: &Url) -> Result<String, OAuthError> {
	callback
		.query_pairs()
		.find(|(name, _)| name == "code")
		.map(|(_, value)| value.into_owned())
		.ok_or_else(|| OAuthError::MissingCodeParameter {
			url: callback.clone(),
		})
}
