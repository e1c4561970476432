//! Shared fixtures for the reqwest-backed integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// self
use dingtalk_login::{
	cache::{MemoryTokenCache, TokenCache},
	client::{DingtalkClient, ReqwestDingtalkClient},
	config::{DingtalkConfig, DingtalkEndpoints},
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
	reqwest::Client,
	url::Url,
};

pub const APP_KEY: &str = "dingmockkey";
pub const APP_SECRET: &str = "dingmocksecret";
pub const MOBILE: &str = "13800000000";

pub const USER_ACCESS_TOKEN_PATH: &str = "/v1.0/oauth2/userAccessToken";
pub const CONTACT_USER_PATH: &str = "/v1.0/contact/users/me";
pub const USER_BY_MOBILE_PATH: &str = "/topapi/v2/user/getbymobile";
pub const APP_ACCESS_TOKEN_PATH: &str = "/v1.0/oauth2/accessToken";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Points every DingTalk endpoint at the provided mock server base URL.
pub fn mock_endpoints(base: &str) -> DingtalkEndpoints {
	let join = |path: &str| {
		Url::parse(&format!("{}{path}", base.trim_end_matches('/')))
			.expect("Mock endpoint URL should parse successfully.")
	};

	DingtalkEndpoints {
		authorize: join("/oauth2/auth"),
		user_access_token: join(USER_ACCESS_TOKEN_PATH),
		contact_user: join(CONTACT_USER_PATH),
		user_by_mobile: join(USER_BY_MOBILE_PATH),
		app_access_token: join(APP_ACCESS_TOKEN_PATH),
	}
}

/// Configuration whose endpoints all live under `base`.
pub fn mock_config(base: &str) -> DingtalkConfig {
	DingtalkConfig::builder(APP_KEY, APP_SECRET)
		.endpoints(mock_endpoints(base))
		.build()
		.expect("Mock DingTalk configuration should build successfully.")
}

/// Constructs a [`DingtalkClient`] backed by a private in-memory cache and the reqwest
/// transport.
pub fn build_reqwest_test_client(base: &str) -> (ReqwestDingtalkClient, Arc<MemoryTokenCache>) {
	let cache_backend = Arc::new(MemoryTokenCache::default());
	let cache: Arc<dyn TokenCache> = cache_backend.clone();
	let client = DingtalkClient::with_http_client(
		mock_config(base),
		cache,
		test_reqwest_http_client(),
		Arc::new(ReqwestTransportErrorMapper),
	);

	(client, cache_backend)
}
