//! # unlimi-client
//!
//! Leptos + WASM client core for the Unlimi counselling app.
//!
//! This crate owns the session state (token, onboarding flag, user
//! overview), the route table, and the navigation guard that decides for
//! every route transition whether to allow it or redirect. Pages and
//! components live elsewhere and read the session through context.

pub mod config;
pub mod net;
pub mod router;
pub mod state;
pub mod util;

/// Route panics to the browser console. Call once before mounting the app.
///
/// Logging itself goes through `leptos::logging`, which needs no setup.
pub fn set_panic_hook() {
    #[cfg(feature = "hydrate")]
    console_error_panic_hook::set_once();
}
