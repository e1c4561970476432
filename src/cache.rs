//! App access token cache contract and the built-in in-memory implementation.

pub mod memory;

pub use memory::MemoryTokenCache;

// self
use crate::{
	_prelude::*,
	auth::{AppKey, TokenSecret},
};

/// Boxed future returned by [`TokenCache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Cache backend contract keyed by application key.
///
/// Implementations must treat an entry whose expiry has passed exactly like a missing one, and
/// must overwrite any previous entry on [`set`](TokenCache::set).
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Returns the token for `key` if one is stored and has not expired yet.
	fn get<'a>(&'a self, key: &'a AppKey) -> CacheFuture<'a, Option<TokenSecret>>;

	/// Stores `token` for `key`, valid for `ttl` from now.
	fn set(&self, key: AppKey, token: TokenSecret, ttl: Duration) -> CacheFuture<'_, ()>;
}

/// Cached token plus the instant it stops being valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
	/// Access token value.
	pub token: TokenSecret,
	/// First instant at which the token is considered expired.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Creates an entry that expires `ttl` after `now`.
	///
	/// Fails when `now + ttl` falls outside the representable date range.
	pub fn new(token: TokenSecret, ttl: Duration, now: OffsetDateTime) -> Result<Self, CacheError> {
		let expires_at = now
			.checked_add(ttl)
			.ok_or(CacheError::ExpiryOutOfRange { ttl_seconds: ttl.whole_seconds() })?;

		Ok(Self { token, expires_at })
	}

	/// Valid strictly before the expiry instant.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}
}

/// Error type produced by [`TokenCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the cache engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
	/// The requested lifetime pushes the expiry past the supported date range.
	#[error("Token lifetime of {ttl_seconds}s cannot be represented as an expiry instant.")]
	ExpiryOutOfRange {
		/// Requested lifetime in seconds.
		ttl_seconds: i64,
	},
}
