// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use reqwest::{Client, ClientBuilder};

/// A client builder preset with the wpauth User-Agent.
///
/// No request timeout is set; callers that want one add it here.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds the default client.
///
/// # Errors
///
/// Returns the underlying `reqwest` error if the TLS backend cannot be
/// initialised.
#[tracing::instrument(level = "debug")]
pub fn new_client() -> reqwest::Result<Client> {
	builder().build()
}

/// `wpauth/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"wpauth/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
