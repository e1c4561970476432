//! Request and response bodies for each DingTalk endpoint.

// self
use crate::{
	_prelude::*,
	auth::{AppKey, TokenSecret},
};

/// Grant types accepted by the user access token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Exchange of a one-time authorization code.
	AuthorizationCode,
	/// Renewal through a previously issued refresh token.
	RefreshToken,
}
impl GrantType {
	/// Returns the wire identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Body of the user access token endpoint.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccessTokenRequest {
	/// App key acting as the OAuth client id.
	pub client_id: AppKey,
	/// App secret acting as the OAuth client secret.
	pub client_secret: TokenSecret,
	/// Authorization code, for [`GrantType::AuthorizationCode`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	/// Refresh token, for [`GrantType::RefreshToken`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Grant being exercised.
	pub grant_type: GrantType,
}

/// Tokens issued to the end user.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccessToken {
	/// User access token, sent through the access token header.
	pub access_token: TokenSecret,
	/// Refresh token, when DingTalk issues one.
	#[serde(default)]
	pub refresh_token: Option<TokenSecret>,
	/// Lifetime of the access token in seconds.
	#[serde(default)]
	pub expire_in: Option<i64>,
	/// Organization the user authorized in.
	#[serde(default)]
	pub corp_id: Option<String>,
}

/// Contact profile of the user token holder.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUser {
	/// Display name.
	#[serde(default)]
	pub nick: Option<String>,
	/// Avatar URL.
	#[serde(default)]
	pub avatar_url: Option<String>,
	/// Mobile number; the login identity.
	pub mobile: String,
	/// App-scoped user identifier.
	#[serde(default)]
	pub open_id: Option<String>,
	/// Developer-scoped user identifier.
	#[serde(default)]
	pub union_id: Option<String>,
	/// Email address.
	#[serde(default)]
	pub email: Option<String>,
	/// Country calling code of the mobile number.
	#[serde(default)]
	pub state_code: Option<String>,
}

/// Body of the mobile lookup endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct UserIdByMobileRequest {
	/// Mobile number to resolve.
	pub mobile: String,
}

/// Response of the mobile lookup endpoint.
///
/// `result` and `result.userid` may be missing or `null`; both read as an empty user id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserIdByMobile {
	/// Lookup result.
	#[serde(default)]
	pub result: Option<UserIdResult>,
	/// Legacy request identifier.
	#[serde(default)]
	pub request_id: Option<String>,
}
impl UserIdByMobile {
	/// The resolved user id; empty when the number is not an organization member.
	pub fn user_id(&self) -> &str {
		self.result.as_ref().and_then(|result| result.userid.as_deref()).unwrap_or_default()
	}
}

/// User id payload of [`UserIdByMobile`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserIdResult {
	/// Organization-scoped user id.
	#[serde(default)]
	pub userid: Option<String>,
}

/// Body of the app access token endpoint.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAccessTokenRequest {
	/// Application key.
	pub app_key: AppKey,
	/// Application secret.
	pub app_secret: TokenSecret,
}

/// App-level access token.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAccessToken {
	/// Token value.
	pub access_token: TokenSecret,
	/// Lifetime in seconds.
	pub expire_in: i64,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn code_exchange_body_uses_wire_field_names() {
		let body = UserAccessTokenRequest {
			client_id: AppKey::new("dingkey").expect("App key fixture should be valid."),
			client_secret: TokenSecret::new("dingsecret"),
			code: Some("auth-code".into()),
			refresh_token: None,
			grant_type: GrantType::AuthorizationCode,
		};
		let value = serde_json::to_value(&body).expect("Exchange body should serialize.");

		assert_eq!(
			value,
			serde_json::json!({
				"clientId": "dingkey",
				"clientSecret": "dingsecret",
				"code": "auth-code",
				"grantType": "authorization_code",
			})
		);
	}

	#[test]
	fn app_token_body_uses_wire_field_names() {
		let body = AppAccessTokenRequest {
			app_key: AppKey::new("dingkey").expect("App key fixture should be valid."),
			app_secret: TokenSecret::new("dingsecret"),
		};
		let value = serde_json::to_value(&body).expect("App token body should serialize.");

		assert_eq!(value, serde_json::json!({ "appKey": "dingkey", "appSecret": "dingsecret" }));
	}

	#[test]
	fn missing_lookup_result_reads_as_empty_user_id() {
		let resp: UserIdByMobile = serde_json::from_str(r#"{"errcode":0,"errmsg":"ok"}"#)
			.expect("Lookup response should decode.");

		assert_eq!(resp.user_id(), "");
	}

	#[test]
	fn null_lookup_fields_read_as_empty_user_id() {
		for body in [
			r#"{"errcode":0,"errmsg":"ok","result":null}"#,
			r#"{"errcode":0,"errmsg":"ok","result":{"userid":null}}"#,
			r#"{"errcode":0,"errmsg":"ok","result":{}}"#,
		] {
			let resp: UserIdByMobile =
				serde_json::from_str(body).expect("Lookup response should decode.");

			assert_eq!(resp.user_id(), "", "Body {body} should yield an empty user id.");
		}

		let member: UserIdByMobile =
			serde_json::from_str(r#"{"errcode":0,"result":{"userid":"u1"}}"#)
				.expect("Lookup response should decode.");

		assert_eq!(member.user_id(), "u1");
	}

	#[test]
	fn contact_profile_requires_mobile() {
		let profile: ContactUser =
			serde_json::from_str(r#"{"nick":"Ada","mobile":"13800000000","stateCode":"86"}"#)
				.expect("Profile should decode.");

		assert_eq!(profile.mobile, "13800000000");
		assert_eq!(profile.state_code.as_deref(), Some("86"));
		assert!(serde_json::from_str::<ContactUser>(r#"{"nick":"Ada"}"#).is_err());
	}
}
