// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use url::Url;

use crate::client_id::GoogleClientId;
use crate::pkce::ProofKeyForCodeExchange;

pub(crate) const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Build the Google authorization URL for a PKCE authorization code request.
///
/// Query parameters, in order: `client_id`, `response_type=code`,
/// `redirect_uri`, `code_challenge`, `code_challenge_method` and `scope`
/// (space-separated). Values are percent-encoded; an empty `scopes` still
/// produces an empty `scope` parameter.
#[tracing::instrument(skip(pkce))]
pub fn authorization_url(
	client_id: &GoogleClientId,
	pkce: &ProofKeyForCodeExchange,
	redirect_uri: &str,
	scopes: &[String],
) -> Url {
	let mut url = Url::parse(GOOGLE_AUTHORIZE_URL).expect("invalid authorize URL");

	url
		.query_pairs_mut()
		.append_pair("client_id", client_id.as_str())
		.append_pair("response_type", "code")
		.append_pair("redirect_uri", redirect_uri)
		.append_pair("code_challenge", &pkce.code_challenge())
		.append_pair(
			"code_challenge_method",
			pkce.method().url_query_parameter_value(),
		)
		.append_pair("scope", &scopes.join(" "));

	url
}
