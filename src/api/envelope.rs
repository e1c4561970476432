//! DingTalk's two error encodings, decoded once into a single tagged value.

// self
use crate::{_prelude::*, error::ApiError};

/// Error envelope found in a DingTalk response body.
///
/// `api.dingtalk.com` reports `{code, message, requestId}` with a non-empty string code, while
/// `oapi.dingtalk.com` reports `{errcode, errmsg, request_id}` with a non-zero integer code.
/// Success payloads share the same object and simply omit (or zero) those fields. When both
/// encodings claim an error the string-coded one wins.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEnvelope")]
pub enum ErrorEnvelope {
	/// String-coded error.
	Current {
		/// Error code string.
		code: String,
		/// Human-readable message.
		message: String,
		/// Request identifier.
		request_id: String,
	},
	/// Legacy integer-coded error.
	Legacy {
		/// Non-zero error code.
		errcode: i64,
		/// Human-readable message.
		errmsg: String,
		/// Request identifier.
		request_id: String,
	},
	/// No error fields are set.
	Clean,
}
impl ErrorEnvelope {
	/// Decodes the envelope from a raw response body.
	pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
		serde_json::from_slice(body)
	}

	/// Whether the body reports a failure.
	pub fn is_error(&self) -> bool {
		!matches!(self, Self::Clean)
	}

	/// Converts an error envelope into an [`ApiError`].
	pub fn into_api_error(self) -> Option<ApiError> {
		match self {
			Self::Current { code, message, request_id } =>
				Some(ApiError::Current { code, message, request_id }),
			Self::Legacy { errcode, errmsg, request_id } =>
				Some(ApiError::Legacy { errcode, errmsg, request_id }),
			Self::Clean => None,
		}
	}
}
impl From<RawEnvelope> for ErrorEnvelope {
	fn from(raw: RawEnvelope) -> Self {
		match raw {
			RawEnvelope { code: Some(code), message, request_id, lowercase_request_id, .. }
				if !code.is_empty() =>
				Self::Current {
					code,
					message: message.unwrap_or_default(),
					request_id: request_id.or(lowercase_request_id).unwrap_or_default(),
				},
			RawEnvelope { errcode: Some(errcode), errmsg, legacy_request_id, .. }
				if errcode != 0 =>
				Self::Legacy {
					errcode,
					errmsg: errmsg.unwrap_or_default(),
					request_id: legacy_request_id.unwrap_or_default(),
				},
			_ => Self::Clean,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct RawEnvelope {
	#[serde(default)]
	code: Option<String>,
	#[serde(default)]
	message: Option<String>,
	#[serde(default, rename = "requestId")]
	request_id: Option<String>,
	#[serde(default, rename = "requestid")]
	lowercase_request_id: Option<String>,
	#[serde(default)]
	errcode: Option<i64>,
	#[serde(default)]
	errmsg: Option<String>,
	#[serde(default, rename = "request_id")]
	legacy_request_id: Option<String>,
}
