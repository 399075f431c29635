// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Google Sign-In for native applications.
//!
//! Implements the OAuth 2.0 authorization code flow with PKCE (RFC 7636) and
//! OpenID Connect ID token decoding, as Google documents it for installed
//! apps. The host application provides two capabilities and gets back an
//! access token:
//!
//! - a [`WebAuthenticationSession`] that shows the authorization page and
//!   returns the callback URL, and
//! - a [`DataGetting`] transport that POSTs the token request
//!   ([`ReqwestDataGetter`] is the default).
//!
//! # Flow
//!
//! 1. **PKCE**: a fresh 128-character verifier and its `S256` challenge are
//!    generated for every attempt.
//! 2. **Authorization**: the user is sent to Google with the challenge and
//!    redirected to `<reversed client id>:/oauth2callback?code=...`.
//! 3. **Code Exchange**: the code and the raw verifier are POSTed to
//!    Google's token endpoint. No client secret is sent.
//! 4. **Identity**: the token response may carry an ID token whose `email`
//!    claim identifies the user.
//!
//! # Example
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use url::Url;
//! use wpauth_auth_google::{
//! 	GoogleAuthenticator, GoogleOAuthTokenGetter, GoogleSignInConfig, ReqwestDataGetter,
//! 	SessionError, WebAuthenticationSession,
//! };
//!
//! struct Browser;
//!
//! #[async_trait]
//! impl WebAuthenticationSession for Browser {
//! 	async fn start(&self, url: &Url, _scheme: &str) -> Result<Option<Url>, SessionError> {
//! 		// Open `url`, wait for the redirect...
//! 		# let _ = url;
//! 		Err(SessionError::Cancelled)
//! 	}
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GoogleSignInConfig::from_env()?;
//! let token_getter = GoogleOAuthTokenGetter::new(ReqwestDataGetter::new()?);
//! let authenticator = GoogleAuthenticator::new(config, Browser, token_getter);
//!
//! let response = authenticator.sign_in().await?;
//! if let Some(id_token) = response.id_token() {
//! 	println!("signed in as {}", id_token.email());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Security Considerations
//!
//! - Verifiers, codes and tokens are wrapped in [`SecretString`] or redacted
//!   in `Debug` output, and tracing spans skip them.
//! - The `plain` challenge method is only available with the
//!   `insecure-plain-pkce` feature.
//! - ID token signatures are **not** verified. See [`IdToken`].

pub mod auth_url;
pub mod authenticator;
pub mod base64url;
pub mod client_id;
pub mod config;
pub mod error;
pub mod id_token;
pub mod jwt;
pub mod pkce;
pub mod random;
pub mod secret;
pub mod session;
pub mod token_body;
pub mod token_getter;
pub mod transport;

pub use auth_url::authorization_url;
pub use authenticator::{extract_authorization_code, GoogleAuthenticator};
pub use client_id::GoogleClientId;
pub use config::{ConfigError, GoogleSignInConfig, DEFAULT_SCOPE};
pub use error::OAuthError;
pub use id_token::{IdToken, IdTokenValidationError};
pub use jwt::{JsonWebToken, JwtDecodeError};
pub use pkce::{CodeChallengeMethod, CodeVerifier, ProofKeyForCodeExchange};
pub use random::{secure_random_string, RandomStringError};
pub use secret::{Secret, SecretString};
pub use session::{SessionError, WebAuthenticationSession};
pub use token_body::{OAuthTokenRequestBody, OAuthTokenResponseBody};
pub use token_getter::{GoogleOAuthTokenGetter, GoogleOAuthTokenGetting};
pub use transport::{DataGetting, FormPostRequest, ReqwestDataGetter, TransportError};
