//! Browser login entry point: the authorize URL users scan or open, plus its CSRF `state`.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	client::DingtalkClient,
	config::DingtalkConfig,
	error::ConfigError,
	http::{ApiHttpClient, TransportErrorMapper},
};

const STATE_LEN: usize = 32;
const LOGIN_SCOPE: &str = "openid";

/// Authorize handshake metadata returned by [`DingtalkClient::authorize_session`].
#[derive(Clone, Debug)]
pub struct AuthorizeSession {
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Redirect URI DingTalk sends the authorization code to.
	pub redirect_uri: Url,
	/// Fully-formed login URL that callers should send end-users to (or render as a QR code).
	pub authorize_url: Url,
}
impl AuthorizeSession {
	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}
}

impl<C, M> DingtalkClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Starts a browser login that will redirect to `redirect_uri` with `code` and `state`.
	pub fn authorize_session(&self, redirect_uri: &str) -> Result<AuthorizeSession> {
		let redirect_uri =
			Url::parse(redirect_uri).map_err(|source| ConfigError::InvalidRedirect { source })?;

		Ok(build_session(&self.config, redirect_uri, random_state()))
	}
}

fn build_session(config: &DingtalkConfig, redirect_uri: Url, state: String) -> AuthorizeSession {
	let mut authorize_url = config.endpoints.authorize.clone();

	authorize_url
		.query_pairs_mut()
		.append_pair("redirect_uri", redirect_uri.as_str())
		.append_pair("response_type", "code")
		.append_pair("client_id", &config.app_key)
		.append_pair("scope", LOGIN_SCOPE)
		.append_pair("state", &state)
		.append_pair("prompt", "consent");

	AuthorizeSession { state, redirect_uri, authorize_url }
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}
