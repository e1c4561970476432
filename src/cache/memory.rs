//! Thread-safe in-memory [`TokenCache`] shared across the process.

// std
use std::sync::OnceLock;
// self
use crate::{
	_prelude::*,
	auth::{AppKey, TokenSecret},
	cache::{CacheError, CacheFuture, CachedToken, TokenCache},
};

type CacheMap = Arc<RwLock<HashMap<AppKey, CachedToken>>>;

static GLOBAL: OnceLock<Arc<MemoryTokenCache>> = OnceLock::new();

/// In-process cache mapping app keys to their current app access token.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenCache(CacheMap);
impl MemoryTokenCache {
	/// Process-wide instance used by clients that are not handed an explicit cache.
	pub fn global() -> Arc<Self> {
		GLOBAL.get_or_init(Default::default).clone()
	}

	/// Looks up `key` as of `now`; expired entries read as absent.
	pub fn get_at(&self, key: &str, now: OffsetDateTime) -> Option<TokenSecret> {
		self.0
			.read()
			.get(key)
			.filter(|entry| entry.is_valid_at(now))
			.map(|entry| entry.token.clone())
	}

	/// Stores `token` for `key` with expiry `now + ttl`, replacing any previous entry.
	///
	/// The previous entry is left untouched when the expiry cannot be represented.
	pub fn set_at(
		&self,
		key: AppKey,
		token: TokenSecret,
		ttl: Duration,
		now: OffsetDateTime,
	) -> Result<(), CacheError> {
		let entry = CachedToken::new(token, ttl, now)?;

		self.0.write().insert(key, entry);

		Ok(())
	}

	/// Returns the raw entry for `key`, expired or not.
	pub fn entry(&self, key: &str) -> Option<CachedToken> {
		self.0.read().get(key).cloned()
	}
}
impl TokenCache for MemoryTokenCache {
	fn get<'a>(&'a self, key: &'a AppKey) -> CacheFuture<'a, Option<TokenSecret>> {
		Box::pin(async move { Ok(self.get_at(key, OffsetDateTime::now_utc())) })
	}

	fn set(&self, key: AppKey, token: TokenSecret, ttl: Duration) -> CacheFuture<'_, ()> {
		Box::pin(async move { self.set_at(key, token, ttl, OffsetDateTime::now_utc()) })
	}
}
