// self
use crate::{
	_prelude::*,
	auth::{AppKey, AppKeyError, TokenSecret},
	config::{DingtalkConfig, DingtalkEndpoints},
};

/// Errors raised while constructing or validating configurations.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum DingtalkConfigError {
	/// The app key failed identifier validation.
	#[error("App key is invalid.")]
	InvalidAppKey(#[source] AppKeyError),
	/// The app secret is empty.
	#[error("App secret cannot be empty.")]
	EmptyAppSecret,
	/// An endpoint URL could not be parsed.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS (plain HTTP is tolerated for loopback hosts).
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`DingtalkConfig`] values.
#[derive(Debug)]
pub struct DingtalkConfigBuilder {
	/// Raw application key.
	pub app_key: String,
	/// Application secret.
	pub app_secret: TokenSecret,
	/// Endpoint overrides; the public DingTalk endpoints are used when unset.
	pub endpoints: Option<DingtalkEndpoints>,
}
impl DingtalkConfigBuilder {
	/// Creates a new builder seeded with the provided credentials.
	pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
		Self {
			app_key: app_key.into(),
			app_secret: TokenSecret::new(app_secret),
			endpoints: None,
		}
	}

	/// Replaces the whole endpoint set.
	pub fn endpoints(mut self, endpoints: DingtalkEndpoints) -> Self {
		self.endpoints = Some(endpoints);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<DingtalkConfig, DingtalkConfigError> {
		let app_key = AppKey::new(&self.app_key).map_err(DingtalkConfigError::InvalidAppKey)?;
		let endpoints = match self.endpoints {
			Some(endpoints) => endpoints,
			None => DingtalkEndpoints::dingtalk()?,
		};
		let config = DingtalkConfig { app_key, app_secret: self.app_secret, endpoints };

		config.validate()?;

		Ok(config)
	}
}
