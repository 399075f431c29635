// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization code to token exchange.

use async_trait::async_trait;
use url::Url;

use crate::client_id::GoogleClientId;
use crate::error::OAuthError;
use crate::pkce::ProofKeyForCodeExchange;
use crate::token_body::{OAuthTokenRequestBody, OAuthTokenResponseBody};
use crate::transport::{DataGetting, FormPostRequest, ReqwestDataGetter};

pub(crate) const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Redeems an authorization code at Google's token endpoint.
#[async_trait]
pub trait GoogleOAuthTokenGetting: Send + Sync {
	async fn get_token(
		&self,
		client_id: &GoogleClientId,
		audience: Option<&str>,
		auth_code: &str,
		pkce: &ProofKeyForCodeExchange,
	) -> Result<OAuthTokenResponseBody, OAuthError>;
}

/// [`GoogleOAuthTokenGetting`] that POSTs through a [`DataGetting`].
///
/// Makes exactly one request per call. Retrying is left to the caller; an
/// authorization code can only be redeemed once anyway.
#[derive(Debug, Clone)]
pub struct GoogleOAuthTokenGetter<D = ReqwestDataGetter> {
	data_getter: D,
	token_url: Url,
}

impl<D: DataGetting> GoogleOAuthTokenGetter<D> {
	pub fn new(data_getter: D) -> Self {
		Self {
			data_getter,
			token_url: Url::parse(GOOGLE_TOKEN_URL).expect("invalid token URL"),
		}
	}

	/// Point at a different token endpoint, e.g. a mock server.
	pub fn with_token_url(mut self, token_url: Url) -> Self {
		self.token_url = token_url;
		self
	}

	pub fn token_url(&self) -> &Url {
		&self.token_url
	}

	pub fn data_getter(&self) -> &D {
		&self.data_getter
	}
}

#[async_trait]
impl<D: DataGetting> GoogleOAuthTokenGetting for GoogleOAuthTokenGetter<D> {
	#[tracing::instrument(
		skip(self, auth_code, pkce),
		name = "GoogleOAuthTokenGetter::get_token"
	)]
	async fn get_token(
		&self,
		client_id: &GoogleClientId,
		audience: Option<&str>,
		auth_code: &str,
		pkce: &ProofKeyForCodeExchange,
	) -> Result<OAuthTokenResponseBody, OAuthError> {
		tracing::debug!("exchanging authorization code for tokens");

		let body = OAuthTokenRequestBody::google_sign_in(client_id, audience, auth_code, pkce)
			.to_url_encoded()?;
		let request = FormPostRequest::new(self.token_url.clone(), body);

		let data = self.data_getter.data(request).await?;
		let response: OAuthTokenResponseBody = serde_json::from_slice(&data)?;

		tracing::debug!(
			expires_in = response.expires_in,
			has_id_token = response.raw_id_token.is_some(),
			"token exchange succeeded"
		);
		Ok(response)
	}
}
