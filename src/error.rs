//! Client-level error types shared across the dispatcher, cache, and login flow.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Cache-layer failure.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		crate::cache::CacheError,
	),
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, body read).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded into the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// DingTalk answered with a recognized error envelope.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// The mobile number resolved to no user inside the organization.
	#[error("Mobile {mobile} is not a member of the organization; join it, then scan the code again.")]
	NotOrganizationMember {
		/// Mobile number taken from the contact profile.
		mobile: String,
	},
	/// Authorization `state` returned by the redirect does not match the issued session.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Request body could not be serialized to JSON.
	#[error("Request body for {endpoint} could not be serialized.")]
	RequestBody {
		/// Endpoint label.
		endpoint: &'static str,
		/// Serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// Configuration carries an invalid value.
	#[error(transparent)]
	InvalidConfig(#[from] crate::config::DingtalkConfigError),
	/// The login redirect carried an empty authorization code.
	#[error("Authorization code cannot be empty.")]
	EmptyAuthorizationCode,
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The app access token endpoint returned a non-positive lifetime.
	#[error("The expireIn value must be positive, got {expire_in}.")]
	NonPositiveExpireIn {
		/// Lifetime in seconds as returned by DingTalk.
		expire_in: i64,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Endpoint label.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling DingTalk.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure without a typed source.
	#[error("HTTP client error occurred while calling {endpoint}: {message}.")]
	Other {
		/// Endpoint label.
		endpoint: &'static str,
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(endpoint: &'static str, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body is not a JSON object the error envelope can read.
	#[error("{endpoint} returned a body that is not valid JSON.")]
	Envelope {
		/// Endpoint label.
		endpoint: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
		/// HTTP status code.
		status: u16,
	},
	/// Body is JSON but does not match the endpoint payload shape.
	#[error("{endpoint} returned a payload that does not match the expected shape.")]
	Payload {
		/// Endpoint label.
		endpoint: &'static str,
		/// Structured parsing failure, including the failing field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code.
		status: u16,
	},
}

/// Error reported by DingTalk through one of its two error envelopes.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ApiError {
	/// String-coded error used by the `api.dingtalk.com` family.
	#[error("DingTalk returned an error, code: {code}, message: {message}, request_id: {request_id}.")]
	Current {
		/// Error code string (e.g. `InvalidParameter`).
		code: String,
		/// Human-readable message.
		message: String,
		/// Request identifier for support tickets.
		request_id: String,
	},
	/// Integer-coded error used by the legacy `oapi.dingtalk.com` family.
	#[error("DingTalk returned an error, code: {errcode}, message: {errmsg}, request_id: {request_id}.")]
	Legacy {
		/// Non-zero error code.
		errcode: i64,
		/// Human-readable message.
		errmsg: String,
		/// Request identifier for support tickets.
		request_id: String,
	},
}
impl ApiError {
	/// Request identifier echoed by DingTalk, whichever envelope carried it.
	pub fn request_id(&self) -> &str {
		match self {
			Self::Current { request_id, .. } | Self::Legacy { request_id, .. } => request_id,
		}
	}
}
