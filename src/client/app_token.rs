//! App access token retrieval backed by the [`TokenCache`].
//!
//! The cache is consulted first; only a miss (absent or expired entry) reaches the token
//! endpoint. A per-app-key guard makes concurrent misses on the same client wait for one fetch
//! and then read the refreshed entry instead of each calling DingTalk.

// self
use crate::{
	_prelude::*,
	api::{ApiEndpoint, ApiRequest, AppAccessToken, AppAccessTokenRequest},
	auth::TokenSecret,
	cache::TokenCache,
	client::DingtalkClient,
	error::ConfigError,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::{self, CacheOutcome, CallKind},
};

impl<C, M> DingtalkClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Returns the app access token, fetching and caching it on a miss.
	pub async fn app_access_token(&self) -> Result<TokenSecret> {
		obs::observe(CallKind::AppAccessToken, "app_access_token", async move {
			let key = &self.config.app_key;

			if let Some(token) = <dyn TokenCache>::get(self.cache.as_ref(), key).await? {
				obs::record_app_token_cache(CacheOutcome::Hit);

				return Ok(token);
			}

			let guard = self.app_token_guard(key);
			let _singleflight = guard.lock().await;

			if let Some(token) = <dyn TokenCache>::get(self.cache.as_ref(), key).await? {
				obs::record_app_token_cache(CacheOutcome::Hit);

				return Ok(token);
			}

			obs::record_app_token_cache(CacheOutcome::Miss);

			let response: AppAccessToken = self
				.send(ApiRequest::post(
					ApiEndpoint::AppAccessToken,
					self.config.endpoints.app_access_token.clone(),
					AppAccessTokenRequest {
						app_key: key.clone(),
						app_secret: self.config.app_secret.clone(),
					},
				))
				.await?;

			if response.expire_in <= 0 {
				return Err(ConfigError::NonPositiveExpireIn { expire_in: response.expire_in }.into());
			}

			<dyn TokenCache>::set(
				self.cache.as_ref(),
				key.clone(),
				response.access_token.clone(),
				Duration::seconds(response.expire_in),
			)
			.await?;

			Ok(response.access_token)
		})
		.await
	}
}
