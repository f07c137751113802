//! Session state: bearer token, onboarding flag, and user overview.
//!
//! DESIGN
//! ======
//! `SessionState` holds the in-memory values and only knows pure
//! transitions. `SessionStore` pairs it with a [`Storage`] and runs every
//! mutation as "transition, then sync": after the state changes, the
//! durable copy is rewritten from it. The token and the onboarding flag are
//! durable; the overview is refetched on demand.
//!
//! Persisted layout:
//! - `token`: raw bearer token, absent when logged out.
//! - `onboarding_completed`: `"true"` when complete, absent otherwise.
//!
//! INVARIANTS
//! ==========
//! - `user` is `Some` only while the session is authenticated. Clearing
//!   the token drops it, and an overview is only adopted while the token it
//!   was fetched with is still the current one.
//! - After a successful overview fetch, `onboarding_completed` equals the
//!   overview's `has_finished_onboarding`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api::{ApiError, OverviewApi};
use crate::net::types::UserOverview;
use crate::util::storage::Storage;

pub const TOKEN_KEY: &str = "token";
pub const ONBOARDING_KEY: &str = "onboarding_completed";

/// The gating signals the navigation guard decides on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    token: Option<String>,
    user: Option<UserOverview>,
    onboarding_completed: bool,
}

impl SessionState {
    /// Rebuild the durable part of the session from storage.
    ///
    /// Anything other than the exact string `"true"` reads as an incomplete
    /// onboarding, and an empty token reads as logged out.
    pub fn from_storage(storage: &impl Storage) -> Self {
        let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let onboarding_completed = storage.get(ONBOARDING_KEY).is_some_and(|v| v == "true");
        Self { token, user: None, onboarding_completed }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserOverview> {
        self.user.as_ref()
    }

    pub fn onboarding_completed(&self) -> bool {
        self.onboarding_completed
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether the loaded overview grants admin access.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
        if !self.is_authenticated() {
            self.user = None;
        }
    }

    /// Replace the overview wholesale. Returns `false` when a profile was
    /// offered to an unauthenticated session and dropped.
    pub fn set_user(&mut self, user: Option<UserOverview>) -> bool {
        if user.is_some() && !self.is_authenticated() {
            return false;
        }
        self.user = user;
        true
    }

    pub fn set_onboarding_completed(&mut self, completed: bool) {
        self.onboarding_completed = completed;
    }

    /// Token to fetch the overview with, or `None` when logged out.
    pub fn overview_token(&self) -> Option<String> {
        self.token.clone().filter(|t| !t.is_empty())
    }

    /// Adopt an overview fetched with `fetched_with` and its onboarding
    /// status. Returns `false` if that token is no longer the session's,
    /// i.e. the user logged out or signed in again in the meantime.
    pub fn apply_overview(&mut self, fetched_with: &str, overview: UserOverview) -> bool {
        if !self.is_authenticated() || self.token.as_deref() != Some(fetched_with) {
            return false;
        }
        self.onboarding_completed = overview.has_finished_onboarding;
        self.user = Some(overview);
        true
    }

    /// Forget everything; the state equals `SessionState::default()`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Rewrite the durable keys from the current state.
    pub fn sync_to(&self, storage: &impl Storage) {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => storage.set(TOKEN_KEY, token),
            _ => storage.remove(TOKEN_KEY),
        }
        if self.onboarding_completed {
            storage.set(ONBOARDING_KEY, "true");
        } else {
            storage.remove(ONBOARDING_KEY);
        }
    }
}

/// Session state bound to its durable storage.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    state: SessionState,
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    /// Bootstrap from whatever `storage` holds. Never fails.
    pub fn load(storage: S) -> Self {
        let state = SessionState::from_storage(&storage);
        Self { state, storage }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Store or clear the bearer token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.state.set_token(token);
        self.sync();
    }

    /// Replace the in-memory overview. Not persisted.
    pub fn set_user(&mut self, user: Option<UserOverview>) {
        if !self.state.set_user(user) {
            leptos::logging::warn!("ignoring user overview for a logged-out session");
        }
    }

    pub fn set_onboarding_completed(&mut self, completed: bool) {
        self.state.set_onboarding_completed(completed);
        self.sync();
    }

    /// Clear token, overview, and onboarding flag, and both durable keys.
    pub fn logout(&mut self) {
        self.state.clear();
        self.sync();
    }

    /// Fold the outcome of an overview fetch made with `token` into the
    /// session. A result for a token that is no longer current is dropped.
    ///
    /// # Errors
    ///
    /// Passes the fetch error through after logging it; the state is left
    /// unchanged in that case.
    pub fn apply_overview_result(
        &mut self,
        token: &str,
        result: Result<UserOverview, ApiError>,
    ) -> Result<(), ApiError> {
        match result {
            Ok(overview) => {
                if self.state.apply_overview(token, overview) {
                    self.sync();
                } else {
                    leptos::logging::warn!("dropping user overview fetched for a previous session");
                }
                Ok(())
            }
            Err(e) => {
                leptos::logging::warn!("Failed to fetch user overview: {e}");
                Err(e)
            }
        }
    }

    /// Refresh the overview from the backend. Resolves immediately when
    /// logged out.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed fetch. Callers that only want a
    /// best-effort refresh may ignore it; the session is unchanged.
    pub async fn fetch_user_overview<A>(&mut self, api: &A) -> Result<(), ApiError>
    where
        A: OverviewApi + ?Sized,
    {
        let Some(token) = self.state.overview_token() else {
            return Ok(());
        };
        let result = api.fetch_overview(&token).await;
        self.apply_overview_result(&token, result)
    }

    fn sync(&self) {
        self.state.sync_to(&self.storage);
    }
}

/// What the admin check needs from a session: read the state, and fold an
/// overview fetch back in. Implemented for an owned [`SessionStore`] and
/// for the store shared through a signal, so both run the same check.
pub trait SessionAccess {
    fn with_state<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R;

    /// # Errors
    ///
    /// Passes a failed fetch through, as
    /// [`SessionStore::apply_overview_result`] does.
    fn apply_overview_result(&mut self, token: &str, result: Result<UserOverview, ApiError>) -> Result<(), ApiError>;
}

impl<S: Storage> SessionAccess for SessionStore<S> {
    fn with_state<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.state)
    }

    fn apply_overview_result(&mut self, token: &str, result: Result<UserOverview, ApiError>) -> Result<(), ApiError> {
        SessionStore::apply_overview_result(self, token, result)
    }
}
