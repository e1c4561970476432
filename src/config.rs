//! Application credentials and endpoint configuration.
//!
//! [`DingtalkConfig`] carries the app key/secret pair issued by the DingTalk developer console
//! together with the endpoint set used by every call. Endpoints default to the public DingTalk
//! hosts and can be overridden (for mock servers or private deployments) through
//! [`DingtalkConfigBuilder`], which validates the result.

/// Builder API for assembling validated configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::{AppKey, TokenSecret},
};

/// Default browser login page that issues authorization codes.
pub const DEFAULT_AUTHORIZE_URL: &str = "https://login.dingtalk.com/oauth2/auth";
/// Default user access token endpoint.
pub const DEFAULT_USER_ACCESS_TOKEN_URL: &str =
	"https://api.dingtalk.com/v1.0/oauth2/userAccessToken";
/// Default contact profile endpoint for the token holder.
pub const DEFAULT_CONTACT_USER_URL: &str = "https://api.dingtalk.com/v1.0/contact/users/me";
/// Default legacy endpoint resolving a mobile number to an organization user id.
pub const DEFAULT_USER_BY_MOBILE_URL: &str = "https://oapi.dingtalk.com/topapi/v2/user/getbymobile";
/// Default app-level access token endpoint.
pub const DEFAULT_APP_ACCESS_TOKEN_URL: &str = "https://api.dingtalk.com/v1.0/oauth2/accessToken";

/// Endpoint set used by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DingtalkEndpoints {
	/// Browser login page (authorization code issuer).
	pub authorize: Url,
	/// Authorization code / refresh token exchange.
	pub user_access_token: Url,
	/// Contact profile of the user token holder.
	pub contact_user: Url,
	/// Mobile number to user id resolution.
	pub user_by_mobile: Url,
	/// App-level access token issuance.
	pub app_access_token: Url,
}
impl DingtalkEndpoints {
	/// Returns the public DingTalk endpoints.
	pub fn dingtalk() -> Result<Self, DingtalkConfigError> {
		Ok(Self {
			authorize: parse_endpoint("authorize", DEFAULT_AUTHORIZE_URL)?,
			user_access_token: parse_endpoint(
				"user_access_token",
				DEFAULT_USER_ACCESS_TOKEN_URL,
			)?,
			contact_user: parse_endpoint("contact_user", DEFAULT_CONTACT_USER_URL)?,
			user_by_mobile: parse_endpoint("user_by_mobile", DEFAULT_USER_BY_MOBILE_URL)?,
			app_access_token: parse_endpoint("app_access_token", DEFAULT_APP_ACCESS_TOKEN_URL)?,
		})
	}

	fn named(&self) -> [(&'static str, &Url); 5] {
		[
			("authorize", &self.authorize),
			("user_access_token", &self.user_access_token),
			("contact_user", &self.contact_user),
			("user_by_mobile", &self.user_by_mobile),
			("app_access_token", &self.app_access_token),
		]
	}
}

/// Immutable client configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DingtalkConfig {
	/// Application key, used as `clientId`/`appKey` and as the app token cache key.
	pub app_key: AppKey,
	/// Application secret, used as `clientSecret`/`appSecret`.
	pub app_secret: TokenSecret,
	/// Endpoint definitions.
	pub endpoints: DingtalkEndpoints,
}
impl DingtalkConfig {
	/// Creates a new builder for the provided credentials.
	pub fn builder(
		app_key: impl Into<String>,
		app_secret: impl Into<String>,
	) -> DingtalkConfigBuilder {
		DingtalkConfigBuilder::new(app_key, app_secret)
	}

	/// Builds a configuration that targets the public DingTalk endpoints.
	pub fn from_credentials(
		app_key: impl Into<String>,
		app_secret: impl Into<String>,
	) -> Result<Self, DingtalkConfigError> {
		Self::builder(app_key, app_secret).build()
	}

	/// Re-checks invariants, e.g. after deserializing from an application config file.
	pub fn validate(&self) -> Result<(), DingtalkConfigError> {
		if self.app_secret.is_empty() {
			return Err(DingtalkConfigError::EmptyAppSecret);
		}

		for (name, url) in self.endpoints.named() {
			validate_endpoint(name, url)?;
		}

		Ok(())
	}
}
impl Debug for DingtalkConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DingtalkConfig")
			.field("app_key", &self.app_key)
			.field("app_secret", &self.app_secret)
			.field("endpoints", &self.endpoints)
			.finish()
	}
}

fn parse_endpoint(name: &'static str, raw: &str) -> Result<Url, DingtalkConfigError> {
	Url::parse(raw).map_err(|source| DingtalkConfigError::InvalidEndpoint { endpoint: name, source })
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), DingtalkConfigError> {
	let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));

	if url.scheme() == "https" || (url.scheme() == "http" && loopback) {
		Ok(())
	} else {
		Err(DingtalkConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}
