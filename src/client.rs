//! DingTalk API client: endpoint calls, the cached app access token, and login orchestration.

pub mod authorize;

mod app_token;
mod calls;
mod login;

pub use authorize::*;

// self
use crate::{
	_prelude::*,
	auth::AppKey,
	cache::TokenCache,
	config::DingtalkConfig,
	http::{ApiHttpClient, TransportErrorMapper},
};
#[cfg(feature = "reqwest")]
use crate::{
	cache::MemoryTokenCache,
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestDingtalkClient = DingtalkClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Calls DingTalk on behalf of one application.
///
/// The client owns the HTTP transport, the error mapper, the app token cache handle, and the
/// application configuration. Every call builds a fresh request descriptor, so one client can be
/// shared (behind `Arc` or by cloning) across concurrent logins.
#[derive(Clone)]
pub struct DingtalkClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Cache holding the app access token.
	pub cache: Arc<dyn TokenCache>,
	/// Application credentials and endpoints.
	pub config: DingtalkConfig,
	app_token_guards: Arc<Mutex<HashMap<AppKey, Arc<AsyncMutex<()>>>>>,
}
impl<C, M> DingtalkClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: DingtalkConfig,
		cache: Arc<dyn TokenCache>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			cache,
			config,
			app_token_guards: Default::default(),
		}
	}

	/// Replaces the app access token cache.
	pub fn with_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
		self.cache = cache;

		self
	}

	/// Returns (and creates on demand) the single-flight guard for an app key.
	fn app_token_guard(&self, key: &AppKey) -> Arc<AsyncMutex<()>> {
		let mut guards = self.app_token_guards.lock();

		guards.entry(key.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
	}
}
#[cfg(feature = "reqwest")]
impl DingtalkClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a new client for the provided configuration.
	///
	/// The client provisions its own reqwest-backed transport and shares the process-wide
	/// [`MemoryTokenCache`], so every client built for the same app key reuses one app token.
	pub fn new(config: DingtalkConfig) -> Self {
		Self::with_http_client(
			config,
			MemoryTokenCache::global(),
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for DingtalkClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DingtalkClient").field("config", &self.config).finish()
	}
}
