// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wpauth_auth_google::{
	GoogleAuthenticator, GoogleClientId, GoogleOAuthTokenGetter, GoogleSignInConfig, IdToken,
	JsonWebToken, ReqwestDataGetter,
};

use crate::session::TerminalSession;

#[derive(Parser, Debug)]
#[command(name = "wpauth", version, about, long_about = None)]
struct Args {
	/// Log level used when RUST_LOG is not set.
	#[arg(long, default_value = "info")]
	log_level: String,

	/// Emit logs as JSON.
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Sign in with Google and print the access token.
	SignIn {
		/// Installed-app OAuth client id. Falls back to WPAUTH_GOOGLE_CLIENT_ID.
		#[arg(long)]
		client_id: Option<String>,

		/// Server client id the ID token should be issued for.
		#[arg(long)]
		audience: Option<String>,

		/// Print the URL without trying to open a browser.
		#[arg(long)]
		no_browser: bool,

		/// Print the full token response as JSON instead of the access token.
		#[arg(long)]
		json: bool,
	},

	/// Decode an ID token without verifying its signature.
	DecodeIdToken {
		token: String,

		/// Also check issuer, audience and expiry against this audience.
		#[arg(long)]
		audience: Option<String>,
	},
}

fn init_tracing(level: &str, json: bool) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("wpauth={level}")));

	if json {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().json().with_writer(std::io::stderr))
			.init();
	} else {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().compact().with_writer(std::io::stderr))
			.init();
	}
}

fn load_config(client_id: Option<String>, audience: Option<String>) -> Result<GoogleSignInConfig> {
	let mut config = match client_id {
		Some(client_id) => {
			let client_id = GoogleClientId::new(client_id.as_str())
				.with_context(|| format!("'{client_id}' is not a Google client id"))?;
			GoogleSignInConfig::new(client_id)
		}
		None => GoogleSignInConfig::from_env().context("failed to load sign-in configuration")?,
	};

	if audience.is_some() {
		config.audience = audience;
	}
	Ok(config)
}

async fn sign_in(config: GoogleSignInConfig, open_browser: bool, json: bool) -> Result<()> {
	info!(client_id = %config.client_id, "starting Google sign-in");

	let data_getter = ReqwestDataGetter::new().context("failed to build HTTP client")?;
	let authenticator = GoogleAuthenticator::new(
		config,
		TerminalSession::new(open_browser),
		GoogleOAuthTokenGetter::new(data_getter),
	);

	let response = match authenticator.sign_in().await {
		Ok(response) => response,
		Err(e) if e.is_cancellation() => {
			eprintln!("Sign-in cancelled.");
			return Ok(());
		}
		Err(e) => return Err(e).context("Google sign-in failed"),
	};

	let id_token = response.id_token();
	if let Some(id_token) = &id_token {
		info!(email = %id_token.email(), "signed in");
	}

	if json {
		let output = serde_json::json!({
			"access_token": response.access_token.expose(),
			"expires_in": response.expires_in,
			"id_token": response.raw_id_token.as_ref().map(|t| t.expose()),
			"refresh_token": response.refresh_token.as_ref().map(|t| t.expose()),
			"scope": response.scope,
			"token_type": response.token_type,
			"email": id_token.as_ref().map(IdToken::email),
		});
		println!("{}", serde_json::to_string_pretty(&output)?);
	} else {
		println!("{}", response.access_token.expose());
	}
	Ok(())
}

fn decode_id_token(token: &str, audience: Option<&str>) -> Result<()> {
	let jwt = JsonWebToken::try_decode(token).context("not a JWT")?;
	println!(
		"{}",
		serde_json::to_string_pretty(&serde_json::Value::Object(jwt.payload().clone()))?
	);

	let id_token = IdToken::from_jwt(jwt).context("token has no email claim")?;
	eprintln!("email: {}", id_token.email());

	if let Some(audience) = audience {
		id_token
			.validate_claims(audience, chrono::Utc::now())
			.context("claims are not valid")?;
		eprintln!("claims valid for {audience} (signature not verified)");
	}
	Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(&args.log_level, args.json_logs);

	match args.command {
		Command::SignIn {
			client_id,
			audience,
			no_browser,
			json,
		} => {
			let config = load_config(client_id, audience)?;
			sign_in(config, !no_browser, json).await
		}
		Command::DecodeIdToken { token, audience } => decode_id_token(&token, audience.as_deref()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn args_parse_sign_in() {
		let args = Args::try_parse_from([
			"wpauth",
			"--json-logs",
			"sign-in",
			"--client-id",
			"123-abc.apps.googleusercontent.com",
			"--no-browser",
		])
		.unwrap();

		assert!(args.json_logs);
		match args.command {
			Command::SignIn {
				client_id,
				no_browser,
				json,
				..
			} => {
				assert_eq!(client_id.as_deref(), Some("123-abc.apps.googleusercontent.com"));
				assert!(no_browser);
				assert!(!json);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn load_config_prefers_flags() {
		let config = load_config(
			Some("123-abc.apps.googleusercontent.com".to_string()),
			Some("456-server.apps.googleusercontent.com".to_string()),
		)
		.unwrap();

		assert_eq!(config.callback_scheme, "com.googleusercontent.apps.123-abc");
		assert_eq!(
			config.audience.as_deref(),
			Some("456-server.apps.googleusercontent.com")
		);
	}

	#[test]
	fn load_config_rejects_bad_client_id() {
		assert!(load_config(Some("invalid".to_string()), None).is_err());
	}

	#[test]
	fn decode_id_token_rejects_non_jwt() {
		assert!(decode_id_token("invalid", None).is_err());
	}
}
