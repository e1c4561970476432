//! Login orchestration: code exchange, contact profile, and organization membership check.

// self
use crate::{
	_prelude::*,
	client::DingtalkClient,
	error::ConfigError,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::{self, CallKind},
};

impl<C, M> DingtalkClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Logs a user in with the authorization code from the DingTalk redirect and returns the
	/// user's mobile number.
	///
	/// Fails with [`Error::NotOrganizationMember`] when DingTalk knows the user but the mobile
	/// number does not resolve to a member of the application's organization. The redirect URI
	/// is accepted for call-site compatibility and is not sent; DingTalk does not check it during
	/// the exchange. The code itself is forwarded verbatim.
	pub async fn login(&self, authorization_code: &str, _redirect_uri: &str) -> Result<String> {
		obs::observe(CallKind::Login, "login", async move {
			if authorization_code.is_empty() {
				return Err(ConfigError::EmptyAuthorizationCode.into());
			}

			let user_token = self.user_access_token(authorization_code).await?;
			let contact = self.contact_user(&user_token.access_token).await?;
			let lookup = self.user_id_by_mobile(&contact.mobile).await?;

			if lookup.user_id().is_empty() {
				return Err(Error::NotOrganizationMember { mobile: contact.mobile });
			}

			Ok(contact.mobile)
		})
		.await
	}
}
