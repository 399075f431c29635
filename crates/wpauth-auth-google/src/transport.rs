// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP capability used for the token exchange.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

/// Content type of every OAuth token request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Failure to obtain response bytes.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("HTTP {status}: {body}")]
	Status { status: u16, body: String },

	#[error("{0}")]
	Other(String),
}

/// A URL-form POST.
#[derive(Clone, PartialEq, Eq)]
pub struct FormPostRequest {
	pub url: Url,
	pub content_type: &'static str,
	pub body: Vec<u8>,
}

impl FormPostRequest {
	pub fn new(url: Url, body: impl Into<Vec<u8>>) -> Self {
		Self {
			url,
			content_type: FORM_CONTENT_TYPE,
			body: body.into(),
		}
	}
}

// The body carries the authorization code and verifier.
impl std::fmt::Debug for FormPostRequest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormPostRequest")
			.field("url", &self.url.as_str())
			.field("content_type", &self.content_type)
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Sends a request and returns the response body.
#[async_trait]
pub trait DataGetting: Send + Sync {
	async fn data(&self, request: FormPostRequest) -> Result<Vec<u8>, TransportError>;
}

/// [`DataGetting`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestDataGetter {
	client: Client,
}

impl ReqwestDataGetter {
	/// Builds a client with the standard User-Agent.
	pub fn new() -> Result<Self, TransportError> {
		Ok(Self::with_client(wpauth_common_http::new_client()?))
	}

	pub fn with_client(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl DataGetting for ReqwestDataGetter {
	#[tracing::instrument(skip(self, request), fields(url = %request.url))]
	async fn data(&self, request: FormPostRequest) -> Result<Vec<u8>, TransportError> {
		let response = self
			.client
			.post(request.url)
			.header(CONTENT_TYPE, request.content_type)
			.body(request.body)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			tracing::warn!(status = %status, "token endpoint returned error status");
			return Err(TransportError::Status {
				status: status.as_u16(),
				body,
			});
		}

		Ok(response.bytes().await?.to_vec())
	}
}
