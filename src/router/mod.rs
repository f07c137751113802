//! Route declarations, the navigation guard, and its Leptos wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! `routes` declares every page and its access requirements, `guard`
//! decides each transition. [`install_navigation_guard`] reruns the guard
//! whenever the location changes and replaces the history entry on redirect,
//! so pages never implement their own auth redirects.
//!
//! The mapping from a guard decision to what the router does is kept in
//! [`plan_navigation`] and [`settle_admin_check`] so it can be tested
//! without a browser.

pub mod guard;
pub mod routes;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::ClientConfig;
use crate::net::api::{HttpApi, OverviewApi};
use crate::state::{SharedSession, provide_session};
use guard::{Decision, NavigationGuard, Verdict, evaluate};
use routes::{RouteTable, RouteTarget, normalize_path};

/// What the router does with a requested location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationStep {
    /// The route is entered. `canonical` is set when the URL has to be
    /// replaced by the resolved path, after a record-level redirect.
    Enter { canonical: Option<String> },
    /// The guard rejected the route.
    Redirect(String),
    /// Admin route waiting for the user overview.
    AwaitAdmin,
}

/// Map the synchronous guard decision for `to` (resolved from `requested`)
/// to a router action.
pub fn plan_navigation(requested: &str, to: &RouteTarget, decision: Decision) -> NavigationStep {
    match decision {
        Decision::Allow => {
            let canonical = (to.path != normalize_path(requested)).then(|| to.path.clone());
            NavigationStep::Enter { canonical }
        }
        Decision::Redirect(path) => NavigationStep::Redirect(path),
        Decision::NeedsProfile => NavigationStep::AwaitAdmin,
    }
}

/// Step to take once a background admin check for `requested` finished.
/// `None` when the user has moved on to `current` since; the newer
/// navigation owns the location then.
pub fn settle_admin_check(verdict: Verdict, requested: &str, current: &str) -> Option<NavigationStep> {
    if normalize_path(current) != normalize_path(requested) {
        return None;
    }
    Some(match verdict {
        Verdict::Allow => NavigationStep::Enter { canonical: None },
        Verdict::Redirect(path) => NavigationStep::Redirect(path),
    })
}

/// Set while an admin route waits for the user overview.
#[derive(Clone, Copy, Debug)]
pub struct AdminCheckPending(pub RwSignal<bool>);

/// Whether an admin check is in flight. Tracked, so admin pages can hold
/// their content back until the verdict lands. `false` outside a guarded
/// router.
pub fn admin_check_pending() -> bool {
    use_context::<AdminCheckPending>().is_some_and(|pending| pending.0.get())
}

/// Provide the browser session and guard every navigation against it.
/// Must be called inside `<Router>`.
pub fn provide_guarded_session(config: &ClientConfig, table: RouteTable) -> SharedSession {
    for problem in config.validate(&table) {
        leptos::logging::warn!("{problem}");
    }
    let session = provide_session();
    let guard = NavigationGuard::new(config.paths.clone());
    install_navigation_guard(session, table, guard, HttpApi::new(config.api_base.clone()));
    session
}

/// Run `guard` on every location change and navigate on redirect.
///
/// Admin routes without a loaded overview fetch it in the background with
/// [`AdminCheckPending`] set; the result is applied to the session even if
/// the user has moved on, but only acted on while the location is still the
/// one being checked. Only entered routes become the next check's `from`.
pub fn install_navigation_guard<A>(session: SharedSession, table: RouteTable, guard: NavigationGuard, api: A)
where
    A: OverviewApi + Clone + 'static,
{
    let location = use_location();
    let navigate = use_navigate();
    let previous = StoredValue::new(None::<String>);
    let pending = RwSignal::new(false);
    provide_context(AdminCheckPending(pending));

    Effect::new(move || {
        let requested = location.pathname.get();
        let to = table.resolve(&requested);
        let from = previous.get_value();

        let decision = session.with_untracked(|s| evaluate(&to, s.state(), guard.paths()));
        let step = plan_navigation(&requested, &to, decision);
        pending.set(step == NavigationStep::AwaitAdmin);

        match step {
            NavigationStep::AwaitAdmin => {
                #[cfg(feature = "hydrate")]
                {
                    let navigate = navigate.clone();
                    let api = api.clone();
                    let guard = guard.clone();
                    let pathname = location.pathname;
                    let mut session = session;
                    leptos::task::spawn_local(async move {
                        let from = from.map(|path| table.resolve(&path));
                        let verdict = guard.check(&to, from.as_ref(), &mut session, &api).await;
                        if let Some(step) = settle_admin_check(verdict, &requested, &pathname.get_untracked()) {
                            pending.set(false);
                            follow(&step, &to, previous, &navigate);
                        }
                    });
                }
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = (&api, from);
                }
            }
            NavigationStep::Redirect(ref path) => {
                leptos::logging::log!("navigation {from:?} -> {} redirected to {path}", to.path);
                follow(&step, &to, previous, &navigate);
            }
            NavigationStep::Enter { .. } => follow(&step, &to, previous, &navigate),
        }
    });
}

fn follow<F>(step: &NavigationStep, to: &RouteTarget, previous: StoredValue<Option<String>>, navigate: &F)
where
    F: Fn(&str, NavigateOptions),
{
    let replace = || NavigateOptions { replace: true, ..Default::default() };
    match step {
        NavigationStep::Enter { canonical } => {
            previous.set_value(Some(to.path.clone()));
            if let Some(path) = canonical {
                navigate(path, replace());
            }
        }
        NavigationStep::Redirect(path) => navigate(path, replace()),
        NavigationStep::AwaitAdmin => {}
    }
}
