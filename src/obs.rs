//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `dingtalk_login.call` with the `call`
//!   (operation) and `stage` (call site) fields, plus debug/warn events from the dispatcher.
//! - Enable `metrics` to increment the `dingtalk_login_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`, and the
//!   `dingtalk_login_app_token_cache_total` counter labeled by `outcome` (`hit`/`miss`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Full login orchestration.
	Login,
	/// Authorization code exchange.
	UserAccessToken,
	/// Refresh token exchange.
	RefreshUserAccessToken,
	/// Contact profile fetch.
	ContactUser,
	/// Mobile number lookup.
	UserIdByMobile,
	/// App access token lookup (cache-backed).
	AppAccessToken,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Login => "login",
			CallKind::UserAccessToken => "user_access_token",
			CallKind::RefreshUserAccessToken => "refresh_user_access_token",
			CallKind::ContactUser => "contact_user",
			CallKind::UserIdByMobile => "user_id_by_mobile",
			CallKind::AppAccessToken => "app_access_token",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// App access token cache lookup outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheOutcome {
	/// A valid token was found.
	Hit,
	/// The token was missing or expired and had to be fetched.
	Miss,
}
impl CacheOutcome {
	/// Returns a stable label suitable for metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CacheOutcome::Hit => "hit",
			CacheOutcome::Miss => "miss",
		}
	}
}

/// Runs `fut` inside a [`CallSpan`] and records attempt/success/failure outcomes.
pub async fn observe<T, Fut>(kind: CallKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = CallSpan::new(kind, stage);

	record_call_outcome(kind, CallOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_call_outcome(kind, CallOutcome::Success),
		Err(_) => record_call_outcome(kind, CallOutcome::Failure),
	}

	result
}
