// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The browser session capability supplied by the host application.

use async_trait::async_trait;
use url::Url;

/// How a web authentication session ended without a callback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
	#[error("user cancelled sign-in")]
	Cancelled,

	#[error("{0}")]
	Failed(String),
}

/// Presents the authorization page and waits for the redirect back.
///
/// `Ok(Some(url))` is the callback URL the browser was redirected to.
/// `Ok(None)` means the session reported neither a URL nor an error; the
/// authenticator treats that as an inconsistent completion.
#[async_trait]
pub trait WebAuthenticationSession: Send + Sync {
	async fn start(
		&self,
		authorization_url: &Url,
		callback_scheme: &str,
	) -> Result<Option<Url>, SessionError>;
}
