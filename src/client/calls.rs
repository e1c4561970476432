//! One method per DingTalk endpoint; each builds a request descriptor and dispatches it.

// self
use crate::{
	_prelude::*,
	api::{
		self, ACCESS_TOKEN_QUERY, ApiEndpoint, ApiRequest, ContactUser, GrantType,
		UserAccessToken, UserAccessTokenRequest, UserIdByMobile, UserIdByMobileRequest,
	},
	auth::TokenSecret,
	client::DingtalkClient,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::{self, CallKind},
};

impl<C, M> DingtalkClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges an authorization code for a user access token.
	pub async fn user_access_token(&self, code: &str) -> Result<UserAccessToken> {
		obs::observe(CallKind::UserAccessToken, "user_access_token", async move {
			let body = UserAccessTokenRequest {
				client_id: self.config.app_key.clone(),
				client_secret: self.config.app_secret.clone(),
				code: Some(code.to_owned()),
				refresh_token: None,
				grant_type: GrantType::AuthorizationCode,
			};

			self.send(ApiRequest::post(
				ApiEndpoint::UserAccessToken,
				self.config.endpoints.user_access_token.clone(),
				body,
			))
			.await
		})
		.await
	}

	/// Renews a user access token with the refresh token issued alongside it.
	pub async fn refresh_user_access_token(
		&self,
		refresh_token: &TokenSecret,
	) -> Result<UserAccessToken> {
		obs::observe(CallKind::RefreshUserAccessToken, "refresh_user_access_token", async move {
			let body = UserAccessTokenRequest {
				client_id: self.config.app_key.clone(),
				client_secret: self.config.app_secret.clone(),
				code: None,
				refresh_token: Some(refresh_token.clone()),
				grant_type: GrantType::RefreshToken,
			};

			self.send(ApiRequest::post(
				ApiEndpoint::UserAccessToken,
				self.config.endpoints.user_access_token.clone(),
				body,
			))
			.await
		})
		.await
	}

	/// Fetches the contact profile of the user access token holder.
	pub async fn contact_user(&self, user_access_token: &TokenSecret) -> Result<ContactUser> {
		obs::observe(CallKind::ContactUser, "contact_user", async move {
			self.send(
				ApiRequest::get(ApiEndpoint::ContactUser, self.config.endpoints.contact_user.clone())
					.with_access_token(user_access_token.clone()),
			)
			.await
		})
		.await
	}

	/// Resolves a mobile number to the organization's user id.
	///
	/// The result carries an empty user id (not an error) when the number does not belong to a
	/// member of the organization.
	pub async fn user_id_by_mobile(&self, mobile: &str) -> Result<UserIdByMobile> {
		obs::observe(CallKind::UserIdByMobile, "user_id_by_mobile", async move {
			let app_token = self.app_access_token().await?;

			// The legacy host takes the token as a query parameter, not the header.
			self.send(
				ApiRequest::post(
					ApiEndpoint::UserByMobile,
					self.config.endpoints.user_by_mobile.clone(),
					UserIdByMobileRequest { mobile: mobile.to_owned() },
				)
				.with_query(ACCESS_TOKEN_QUERY, app_token.expose()),
			)
			.await
		})
		.await
	}

	pub(super) async fn send<B, R>(&self, request: ApiRequest<B>) -> Result<R>
	where
		B: Serialize,
		R: DeserializeOwned,
	{
		api::dispatch(self.http_client.as_ref(), self.transport_mapper.as_ref(), request).await
	}
}
