//! Demonstrates a full DingTalk login against a local mock: build the authorize URL, exchange
//! the returned code, and resolve the user's mobile number to an organization member.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use dingtalk_login::{
	cache::{MemoryTokenCache, TokenCache},
	client::DingtalkClient,
	config::{DingtalkConfig, DingtalkEndpoints},
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
	reqwest::Client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let user_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1.0/oauth2/userAccessToken");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"accessToken\":\"demo-user-token\",\"refreshToken\":\"demo-refresh\",\"expireIn\":7200}");
		})
		.await;
	let contact_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1.0/contact/users/me")
				.header("x-acs-dingtalk-access-token", "demo-user-token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"nick\":\"Demo User\",\"mobile\":\"13800000000\"}");
		})
		.await;
	let app_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1.0/oauth2/accessToken");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"accessToken\":\"demo-app-token\",\"expireIn\":7200}");
		})
		.await;
	let lookup_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/topapi/v2/user/getbymobile")
				.query_param("access_token", "demo-app-token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"errcode\":0,\"errmsg\":\"ok\",\"result\":{\"userid\":\"manager-1\"}}");
		})
		.await;
	let config = DingtalkConfig::builder("dingdemokey", "demo-secret")
		.endpoints(DingtalkEndpoints {
			authorize: Url::parse(&server.url("/oauth2/auth"))?,
			user_access_token: Url::parse(&server.url("/v1.0/oauth2/userAccessToken"))?,
			contact_user: Url::parse(&server.url("/v1.0/contact/users/me"))?,
			user_by_mobile: Url::parse(&server.url("/topapi/v2/user/getbymobile"))?,
			app_access_token: Url::parse(&server.url("/v1.0/oauth2/accessToken"))?,
		})
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let cache: Arc<dyn TokenCache> = Arc::new(MemoryTokenCache::default());
	let client = <DingtalkClient<ReqwestHttpClient, ReqwestTransportErrorMapper>>::with_http_client(
		config,
		cache,
		http_client,
		Arc::new(ReqwestTransportErrorMapper),
	);
	let session = client.authorize_session("https://app.example.com/login/dingtalk")?;

	println!("Send the user to: {}.", session.authorize_url);

	// The redirect handler receives `code` and `state`; a real handler reads them from the query.
	session.validate_state(&session.state)?;

	let mobile = client.login("demo-auth-code", session.redirect_uri.as_str()).await?;

	println!("Logged in organization member: {mobile}.");

	user_token_mock.assert_async().await;
	contact_mock.assert_async().await;
	app_token_mock.assert_async().await;
	lookup_mock.assert_async().await;

	Ok(())
}
