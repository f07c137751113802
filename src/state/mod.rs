//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` holds the gating signals the navigation guard reads. The
//! store is created once at bootstrap and handed to components through a
//! Leptos context instead of living in a global.

pub mod session;

use leptos::prelude::*;

use crate::net::api::ApiError;
use crate::net::types::UserOverview;
use crate::util::storage::{BrowserStorage, Storage};
use session::{SessionAccess, SessionState, SessionStore};

/// Session store as shared through context in the browser.
pub type SharedSession = RwSignal<SessionStore<BrowserStorage>>;

/// Load the session from `localStorage` and provide it as context.
pub fn provide_session() -> SharedSession {
    let session = RwSignal::new(SessionStore::load(BrowserStorage));
    provide_context(session);
    session
}

/// Session provided by [`provide_session`].
///
/// # Panics
///
/// Panics if called outside a component tree where the session was provided.
pub fn use_session() -> SharedSession {
    expect_context::<SharedSession>()
}

/// The signal is only borrowed inside each call, never across an await, so
/// components keep reading it while an overview fetch is in flight.
impl<S> SessionAccess for RwSignal<SessionStore<S>>
where
    S: Storage + Send + Sync + 'static,
{
    fn with_state<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        self.with_untracked(|store| f(store.state()))
    }

    fn apply_overview_result(&mut self, token: &str, result: Result<UserOverview, ApiError>) -> Result<(), ApiError> {
        self.try_update(|store| store.apply_overview_result(token, result)).unwrap_or(Err(ApiError::Unavailable))
    }
}
