//! Request descriptors and the shared dispatcher used by every DingTalk endpoint.
//!
//! Each call builds an immutable [`ApiRequest`] and hands it to [`dispatch`], which sends it
//! through an [`ApiHttpClient`], checks the body against both DingTalk error envelopes, and only
//! then decodes the endpoint payload.

pub mod envelope;
pub mod payload;

pub use envelope::*;
pub use payload::*;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::{Method, Request, header::CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, DecodeError},
	http::{ApiHttpClient, TransportErrorMapper},
};

/// Header DingTalk's `api.dingtalk.com` family reads the access token from.
pub const ACCESS_TOKEN_HEADER: &str = "x-acs-dingtalk-access-token";
/// Query parameter the legacy `oapi.dingtalk.com` family reads the access token from.
pub const ACCESS_TOKEN_QUERY: &str = "access_token";

/// DingTalk endpoints called by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
	/// Authorization code / refresh token exchange.
	UserAccessToken,
	/// Contact profile of the user token holder.
	ContactUser,
	/// Mobile number to user id resolution.
	UserByMobile,
	/// App-level access token issuance.
	AppAccessToken,
}
impl ApiEndpoint {
	/// Returns a stable label suitable for errors and log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiEndpoint::UserAccessToken => "user_access_token",
			ApiEndpoint::ContactUser => "contact_user",
			ApiEndpoint::UserByMobile => "user_by_mobile",
			ApiEndpoint::AppAccessToken => "app_access_token",
		}
	}
}
impl Display for ApiEndpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Immutable description of one outbound call.
#[derive(Clone, Debug)]
pub struct ApiRequest<B> {
	/// Endpoint label used for errors and logs.
	pub endpoint: ApiEndpoint,
	/// HTTP method.
	pub method: Method,
	/// Endpoint URL; query pairs are appended to it.
	pub url: Url,
	/// Query pairs appended in order.
	pub query: Vec<(String, String)>,
	/// JSON body, if any.
	pub body: Option<B>,
	/// Token sent through [`ACCESS_TOKEN_HEADER`].
	pub access_token: Option<TokenSecret>,
}
impl ApiRequest<()> {
	/// Describes a body-less `GET`.
	pub fn get(endpoint: ApiEndpoint, url: Url) -> Self {
		Self { endpoint, method: Method::GET, url, query: Vec::new(), body: None, access_token: None }
	}
}
impl<B> ApiRequest<B>
where
	B: Serialize,
{
	/// Describes a `POST` carrying `body` as JSON.
	pub fn post(endpoint: ApiEndpoint, url: Url, body: B) -> Self {
		Self {
			endpoint,
			method: Method::POST,
			url,
			query: Vec::new(),
			body: Some(body),
			access_token: None,
		}
	}

	/// Appends a query pair.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Sends `token` through the DingTalk access token header.
	pub fn with_access_token(mut self, token: TokenSecret) -> Self {
		self.access_token = Some(token);

		self
	}

	/// Renders the descriptor into a transport-level request.
	pub fn to_http_request(&self) -> Result<HttpRequest> {
		let mut url = self.url.clone();

		if !self.query.is_empty() {
			url.query_pairs_mut().extend_pairs(self.query.iter());
		}

		let mut builder = Request::builder().method(self.method.clone()).uri(url.as_str());
		let body = match &self.body {
			Some(body) => {
				builder = builder.header(CONTENT_TYPE, "application/json");

				serde_json::to_vec(body).map_err(|source| ConfigError::RequestBody {
					endpoint: self.endpoint.as_str(),
					source,
				})?
			},
			None => Vec::new(),
		};

		if let Some(token) = &self.access_token {
			builder = builder.header(ACCESS_TOKEN_HEADER, token.expose());
		}

		Ok(builder.body(body).map_err(ConfigError::from)?)
	}
}

/// Sends `request` and decodes the response into `R`.
///
/// Transport failures go through `mapper`. A body carrying either DingTalk error envelope fails
/// with [`Error::Api`] before `R` is decoded.
pub async fn dispatch<C, M, B, R>(http_client: &C, mapper: &M, request: ApiRequest<B>) -> Result<R>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
	B: Serialize,
	R: DeserializeOwned,
{
	let endpoint = request.endpoint;
	let http_request = request.to_http_request()?;
	let handle = http_client.handle();
	let response = handle
		.call(http_request)
		.await
		.map_err(|err| mapper.map_transport_error(endpoint, err))?;
	let status = response.status().as_u16();

	#[cfg(feature = "tracing")]
	tracing::debug!(endpoint = endpoint.as_str(), status, "DingTalk call completed.");

	decode_response(endpoint, status, response.body())
}

/// Checks `body` against the error envelopes, then decodes it into `R`.
pub fn decode_response<R>(endpoint: ApiEndpoint, status: u16, body: &[u8]) -> Result<R>
where
	R: DeserializeOwned,
{
	let envelope = ErrorEnvelope::from_slice(body).map_err(|source| DecodeError::Envelope {
		endpoint: endpoint.as_str(),
		source,
		status,
	})?;

	if let Some(err) = envelope.into_api_error() {
		#[cfg(feature = "tracing")]
		tracing::warn!(
			endpoint = endpoint.as_str(),
			status,
			request_id = err.request_id(),
			"DingTalk returned an error envelope."
		);

		return Err(err.into());
	}

	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
		DecodeError::Payload { endpoint: endpoint.as_str(), source, status }.into()
	})
}
