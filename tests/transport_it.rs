// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::{self, Future},
	pin::Pin,
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
// self
use dingtalk_login::{
	api::{ACCESS_TOKEN_HEADER, ApiEndpoint},
	cache::{MemoryTokenCache, TokenCache},
	client::DingtalkClient,
	config::DingtalkConfig,
	error::{ConfigError, Error, TransportError},
	http::{ApiHttpClient, TransportErrorMapper},
	oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http::StatusCode},
};

#[derive(Debug)]
enum FakeTransportError {
	ConnectionReset,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionReset => write!(f, "Connection reset by peer."),
		}
	}
}
impl StdError for FakeTransportError {}

enum Scripted {
	Respond(u16, &'static str),
	Fail,
}

#[derive(Clone, Debug)]
struct RecordedRequest {
	method: String,
	uri: String,
	access_token_header: Option<String>,
	body: String,
}

/// Transport that replays scripted responses in order and records every request.
#[derive(Clone, Default)]
struct ScriptedHttpClient {
	script: Arc<Mutex<VecDeque<Scripted>>>,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}
impl ScriptedHttpClient {
	fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
		Self { script: Arc::new(Mutex::new(script.into_iter().collect())), ..Default::default() }
	}

	fn recorded(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}
}
impl ApiHttpClient for ScriptedHttpClient {
	type Handle = ScriptedHttpHandle;
	type TransportError = FakeTransportError;

	fn handle(&self) -> Self::Handle {
		ScriptedHttpHandle(self.clone())
	}
}

struct ScriptedHttpHandle(ScriptedHttpClient);
impl<'a> AsyncHttpClient<'a> for ScriptedHttpHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		self.0.requests.lock().push(RecordedRequest {
			method: request.method().to_string(),
			uri: request.uri().to_string(),
			access_token_header: request
				.headers()
				.get(ACCESS_TOKEN_HEADER)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned),
			body: String::from_utf8_lossy(request.body()).into_owned(),
		});

		let outcome = match self.0.script.lock().pop_front() {
			Some(Scripted::Respond(status, body)) => {
				let mut response = HttpResponse::new(body.as_bytes().to_vec());

				*response.status_mut() =
					StatusCode::from_u16(status).expect("Scripted status should be valid.");

				Ok(response)
			},
			Some(Scripted::Fail) =>
				Err(HttpClientError::Reqwest(Box::new(FakeTransportError::ConnectionReset))),
			None => Err(HttpClientError::Other("script exhausted".into())),
		};

		Box::pin(future::ready(outcome))
	}
}

#[derive(Clone, Default)]
struct RecordingTransportErrorMapper {
	endpoints: Arc<Mutex<Vec<ApiEndpoint>>>,
}
impl RecordingTransportErrorMapper {
	fn recorded_endpoints(&self) -> Vec<ApiEndpoint> {
		self.endpoints.lock().clone()
	}
}
impl TransportErrorMapper<FakeTransportError> for RecordingTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: ApiEndpoint,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		self.endpoints.lock().push(endpoint);

		match err {
			HttpClientError::Reqwest(inner) => TransportError::network(endpoint.as_str(), *inner).into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) =>
				TransportError::Other { endpoint: endpoint.as_str(), message }.into(),
			other => TransportError::Other {
				endpoint: endpoint.as_str(),
				message: format!("Unhandled HTTP client error variant: {other:?}"),
			}
			.into(),
		}
	}
}

type ScriptedClient = DingtalkClient<ScriptedHttpClient, RecordingTransportErrorMapper>;

fn build_client(
	http_client: ScriptedHttpClient,
	mapper: RecordingTransportErrorMapper,
) -> ScriptedClient {
	let config = DingtalkConfig::from_credentials("dingscripted", "scripted-secret")
		.expect("Scripted configuration should build.");
	let cache: Arc<dyn TokenCache> = Arc::new(MemoryTokenCache::default());

	DingtalkClient::with_http_client(config, cache, http_client, mapper)
}

const USER_TOKEN: &str = "{\"accessToken\":\"user-token\",\"expireIn\":7200}";
const CONTACT: &str = "{\"mobile\":\"13900000000\",\"nick\":\"Li Si\"}";
const APP_TOKEN: &str = "{\"accessToken\":\"app-token\",\"expireIn\":7200}";
const MEMBER: &str = "{\"errcode\":0,\"errmsg\":\"ok\",\"result\":{\"userid\":\"user-9\"}}";

#[tokio::test]
async fn login_issues_calls_in_order_with_expected_credentials() {
	let http_client = ScriptedHttpClient::new([
		Scripted::Respond(200, USER_TOKEN),
		Scripted::Respond(200, CONTACT),
		Scripted::Respond(200, APP_TOKEN),
		Scripted::Respond(200, MEMBER),
	]);
	let mapper = RecordingTransportErrorMapper::default();
	let client = build_client(http_client.clone(), mapper.clone());
	let mobile = client
		.login("scripted-code", "https://app.example.com/cb")
		.await
		.expect("Scripted login should succeed.");

	assert_eq!(mobile, "13900000000");

	let recorded = http_client.recorded();
	let summary: Vec<_> =
		recorded.iter().map(|request| (request.method.as_str(), request.uri.as_str())).collect();

	assert_eq!(
		summary,
		[
			("POST", "https://api.dingtalk.com/v1.0/oauth2/userAccessToken"),
			("GET", "https://api.dingtalk.com/v1.0/contact/users/me"),
			("POST", "https://api.dingtalk.com/v1.0/oauth2/accessToken"),
			("POST", "https://oapi.dingtalk.com/topapi/v2/user/getbymobile?access_token=app-token"),
		]
	);
	assert!(recorded[0].body.contains("\"code\":\"scripted-code\""));
	assert!(recorded[0].body.contains("\"grantType\":\"authorization_code\""));
	assert_eq!(recorded[1].access_token_header.as_deref(), Some("user-token"));
	assert!(recorded[1].body.is_empty());
	assert!(recorded[2].body.contains("\"appKey\":\"dingscripted\""));
	assert_eq!(recorded[3].access_token_header, None);
	assert_eq!(recorded[3].body, "{\"mobile\":\"13900000000\"}");
	assert!(mapper.recorded_endpoints().is_empty());
}

#[tokio::test]
async fn transport_failure_aborts_login_through_the_mapper() {
	let http_client =
		ScriptedHttpClient::new([Scripted::Respond(200, USER_TOKEN), Scripted::Fail]);
	let mapper = RecordingTransportErrorMapper::default();
	let client = build_client(http_client.clone(), mapper.clone());
	let err = client
		.login("scripted-code", "https://app.example.com/cb")
		.await
		.expect_err("Transport failure should abort the login.");

	match &err {
		Error::Transport(TransportError::Network { endpoint, source }) => {
			assert_eq!(*endpoint, "contact_user");
			assert_eq!(source.to_string(), "Connection reset by peer.");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert_eq!(http_client.recorded().len(), 2, "No call may follow the failed one.");
	assert_eq!(mapper.recorded_endpoints(), [ApiEndpoint::ContactUser]);
}

#[tokio::test]
async fn second_lookup_reuses_the_cached_app_token() {
	let http_client = ScriptedHttpClient::new([
		Scripted::Respond(200, APP_TOKEN),
		Scripted::Respond(200, MEMBER),
		Scripted::Respond(200, MEMBER),
	]);
	let client = build_client(http_client.clone(), RecordingTransportErrorMapper::default());

	for _ in 0..2 {
		let result = client
			.user_id_by_mobile("13900000000")
			.await
			.expect("Scripted lookup should succeed.");

		assert_eq!(result.user_id(), "user-9");
	}

	let token_calls = http_client
		.recorded()
		.iter()
		.filter(|request| request.uri.ends_with("/v1.0/oauth2/accessToken"))
		.count();

	assert_eq!(token_calls, 1);
}
