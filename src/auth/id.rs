//! Application key newtype, used as the app token cache key and as the `clientId`/`appKey`
//! request field.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Reasons an app key is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum AppKeyError {
	/// The key was empty.
	#[error("App key cannot be empty.")]
	Empty,
	/// The key contains whitespace, which DingTalk never issues.
	#[error("App key cannot contain whitespace.")]
	ContainsWhitespace,
}

/// DingTalk application key (also the OAuth `clientId`).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppKey(String);
impl AppKey {
	/// Validates and wraps an app key.
	pub fn new(value: impl Into<String>) -> Result<Self, AppKeyError> {
		let value = value.into();

		if value.is_empty() {
			Err(AppKeyError::Empty)
		} else if value.chars().any(char::is_whitespace) {
			Err(AppKeyError::ContainsWhitespace)
		} else {
			Ok(Self(value))
		}
	}

	/// Borrows the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl TryFrom<String> for AppKey {
	type Error = AppKeyError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<AppKey> for String {
	fn from(key: AppKey) -> Self {
		key.0
	}
}
impl Deref for AppKey {
	type Target = str;

	fn deref(&self) -> &str {
		&self.0
	}
}
// Lets `HashMap<AppKey, _>` be queried with a plain `&str`.
impl Borrow<str> for AppKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for AppKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AppKey").field(&self.0).finish()
	}
}
impl Display for AppKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
