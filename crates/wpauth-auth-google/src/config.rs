// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::env;

use crate::client_id::GoogleClientId;

/// Scope requested when none is configured. It is what makes Google return
/// an ID token with an `email` claim.
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/userinfo.email";

const CLIENT_ID_VAR: &str = "WPAUTH_GOOGLE_CLIENT_ID";
const AUDIENCE_VAR: &str = "WPAUTH_GOOGLE_AUDIENCE";
const SCOPES_VAR: &str = "WPAUTH_GOOGLE_SCOPES";

/// Errors that can occur when loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	/// A required environment variable was not set.
	#[error("missing environment variable: {0}")]
	MissingEnvVar(String),

	/// A configuration value was empty or invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Settings for a native-app Google sign-in.
///
/// - `client_id`: the installed-app client id from Google Cloud Console.
/// - `audience`: optional server client id. When set, Google issues the ID
///   token for that audience so a backend can accept it.
/// - `scopes`: requested scopes, defaulting to [`DEFAULT_SCOPE`].
/// - `callback_scheme`: URL scheme the browser session listens for. Google
///   only redirects installed apps to the reversed client id, so any other
///   value fails [`GoogleSignInConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleSignInConfig {
	pub client_id: GoogleClientId,
	pub audience: Option<String>,
	pub scopes: Vec<String>,
	pub callback_scheme: String,
}

impl GoogleSignInConfig {
	/// Default scopes and the reversed-client-id callback scheme.
	pub fn new(client_id: GoogleClientId) -> Self {
		Self {
			callback_scheme: client_id.callback_scheme(),
			client_id,
			audience: None,
			scopes: vec![DEFAULT_SCOPE.to_string()],
		}
	}

	pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
		self.audience = Some(audience.into());
		self
	}

	pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
		self.scopes = scopes;
		self
	}

	/// Load configuration from environment variables.
	///
	/// # Environment Variables
	///
	/// - `WPAUTH_GOOGLE_CLIENT_ID` (required)
	/// - `WPAUTH_GOOGLE_AUDIENCE`
	/// - `WPAUTH_GOOGLE_SCOPES`: space- or comma-separated
	///
	/// # Errors
	///
	/// - [`ConfigError::MissingEnvVar`] if the client id is not set.
	/// - [`ConfigError::InvalidConfig`] if any value fails [`Self::validate`].
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_vars(|name| env::var(name).ok())
	}

	/// Like [`Self::from_env`] with an arbitrary variable lookup.
	pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let client_id = var(CLIENT_ID_VAR)
			.ok_or_else(|| ConfigError::MissingEnvVar(CLIENT_ID_VAR.to_string()))?;
		let client_id = GoogleClientId::new(client_id.trim()).ok_or_else(|| {
			ConfigError::InvalidConfig(format!(
				"{CLIENT_ID_VAR} must look like 123-abc.apps.googleusercontent.com"
			))
		})?;

		let mut config = Self::new(client_id);

		if let Some(audience) = var(AUDIENCE_VAR).filter(|v| !v.trim().is_empty()) {
			config.audience = Some(audience.trim().to_string());
		}
		if let Some(scopes) = var(SCOPES_VAR) {
			config.scopes = Self::parse_scopes(&scopes);
		}

		config.validate()?;
		Ok(config)
	}

	/// # Errors
	///
	/// Returns [`ConfigError::InvalidConfig`] if there are no scopes or the
	/// callback scheme is not the one [`Self::redirect_uri`] uses.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.scopes.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"scopes cannot be empty".to_string(),
			));
		}
		let expected = self.client_id.callback_scheme();
		if !self.callback_scheme.eq_ignore_ascii_case(&expected) {
			return Err(ConfigError::InvalidConfig(format!(
				"callback_scheme must be '{expected}' for client id '{}'",
				self.client_id
			)));
		}
		Ok(())
	}

	/// The redirect URI Google sends the authorization code to.
	pub fn redirect_uri(&self) -> String {
		self.client_id.redirect_uri()
	}

	/// Join scopes into a space-separated string for the authorization URL.
	pub fn scopes_string(&self) -> String {
		self.scopes.join(" ")
	}

	/// Parse a scope string into a vector of individual scopes.
	///
	/// Handles both space-separated and comma-separated scope lists.
	pub fn parse_scopes(scope_str: &str) -> Vec<String> {
		scope_str
			.split([' ', ','])
			.map(|s| s.trim().to_string())
			.filter(|s| !s.is_empty())
			.collect()
	}
}
