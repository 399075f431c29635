// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Browser session driven from a terminal.
//!
//! Installed-app redirect URIs use a custom scheme, so a terminal cannot
//! receive the redirect itself. The user copies the URL the browser failed
//! to open and pastes it back here.

use std::io::{self, Write};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use url::Url;
use wpauth_auth_google::{SessionError, WebAuthenticationSession};

pub struct TerminalSession {
	open_browser: bool,
}

impl TerminalSession {
	pub fn new(open_browser: bool) -> Self {
		Self { open_browser }
	}
}

#[async_trait]
impl WebAuthenticationSession for TerminalSession {
	async fn start(
		&self,
		authorization_url: &Url,
		callback_scheme: &str,
	) -> Result<Option<Url>, SessionError> {
		eprintln!("\nOpen this URL to sign in with Google:\n\n  {authorization_url}\n");

		if self.open_browser {
			if let Err(e) = webbrowser::open(authorization_url.as_str()) {
				debug!(error = %e, "failed to open browser");
				eprintln!("Could not open a browser. Copy the URL above instead.");
			}
		}

		eprint!("Paste the {callback_scheme}: URL you were redirected to (empty to cancel): ");
		io::stderr().flush().ok();

		let mut line = String::new();
		let mut stdin = BufReader::new(tokio::io::stdin());

		tokio::select! {
			_ = tokio::signal::ctrl_c() => {
				eprintln!();
				Err(SessionError::Cancelled)
			}
			read = stdin.read_line(&mut line) => {
				read.map_err(|e| SessionError::Failed(format!("failed to read callback URL: {e}")))?;
				parse_callback(&line, callback_scheme).map(Some)
			}
		}
	}
}

/// Turns a pasted line into the callback URL.
///
/// A blank line cancels. A URL for another scheme is rejected so a pasted
/// authorization URL is not mistaken for the redirect.
pub fn parse_callback(line: &str, callback_scheme: &str) -> Result<Url, SessionError> {
	let line = line.trim();
	if line.is_empty() {
		return Err(SessionError::Cancelled);
	}

	let url = Url::parse(line)
		.map_err(|e| SessionError::Failed(format!("'{line}' is not a URL: {e}")))?;

	if !url.scheme().eq_ignore_ascii_case(callback_scheme) {
		return Err(SessionError::Failed(format!(
			"expected a {callback_scheme}: URL, got a {}: URL",
			url.scheme()
		)));
	}

	Ok(url)
}
