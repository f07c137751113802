//! Navigation guard: decides whether a route transition proceeds.
//!
//! DESIGN
//! ======
//! The rules run in a fixed order and the first one that fires wins:
//!
//! 1. `/` while authenticated: onboarding page or app home.
//! 2. guest-only route while authenticated: same as 1.
//! 3. auth-only route while logged out: login.
//! 4. route needing finished onboarding while unfinished: onboarding page.
//! 5. the onboarding page after onboarding: app home.
//! 6. admin route: load the overview if missing (one fetch), then login on
//!    fetch failure, app home unless admin.
//! 7. otherwise allow.
//!
//! Guest rules come before the auth rule so a signed-in user never lands on
//! login or register. Only rule 6 touches the network, so [`evaluate`] is
//! synchronous and reports [`Decision::NeedsProfile`] instead of fetching;
//! [`resolve_admin_eligibility`] is the async step.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::routes::RouteTarget;
use crate::config::GuardPaths;
use crate::net::api::{ApiError, OverviewApi};
use crate::state::session::{SessionAccess, SessionState};

pub const ROOT_PATH: &str = "/";

/// Final outcome of a navigation check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Redirect(String),
}

/// Outcome of the synchronous rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(String),
    /// Admin route with no overview loaded yet.
    NeedsProfile,
}

/// Whether the session may enter an admin route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminEligibility {
    Admin,
    NotAdmin,
    /// The overview fetch failed.
    ProfileUnavailable,
}

impl AdminEligibility {
    /// Eligibility from the overview currently held. A missing overview is
    /// not admin.
    pub fn of(session: &SessionState) -> Self {
        if session.is_admin() { Self::Admin } else { Self::NotAdmin }
    }

    /// Eligibility after an overview fetch finished with `result`.
    pub fn after_fetch(result: &Result<(), ApiError>, session: &SessionState) -> Self {
        match result {
            Ok(()) => Self::of(session),
            Err(_) => Self::ProfileUnavailable,
        }
    }
}

/// Where an authenticated user belongs: onboarding until it is done, then
/// the app home.
pub fn home_for<'a>(session: &SessionState, paths: &'a GuardPaths) -> &'a str {
    if session.onboarding_completed() { &paths.app_home } else { &paths.onboarding }
}

/// Run rules 1 through 7 without any I/O.
pub fn evaluate(target: &RouteTarget, session: &SessionState, paths: &GuardPaths) -> Decision {
    let meta = target.meta;
    let authenticated = session.is_authenticated();

    if authenticated && (target.path == ROOT_PATH || meta.requires_guest) {
        return Decision::Redirect(home_for(session, paths).to_owned());
    }
    if meta.requires_auth && !authenticated {
        return Decision::Redirect(paths.login.clone());
    }
    if meta.requires_completed_onboarding() && !session.onboarding_completed() {
        return Decision::Redirect(paths.onboarding.clone());
    }
    if target.path == paths.onboarding && session.onboarding_completed() {
        return Decision::Redirect(paths.app_home.clone());
    }
    if meta.requires_admin {
        if session.user().is_none() {
            return Decision::NeedsProfile;
        }
        return admin_verdict(AdminEligibility::of(session), paths).into();
    }
    Decision::Allow
}

/// Map admin eligibility to the rule 6 verdict.
pub fn admin_verdict(eligibility: AdminEligibility, paths: &GuardPaths) -> Verdict {
    match eligibility {
        AdminEligibility::Admin => Verdict::Allow,
        AdminEligibility::NotAdmin => Verdict::Redirect(paths.app_home.clone()),
        AdminEligibility::ProfileUnavailable => Verdict::Redirect(paths.login.clone()),
    }
}

/// Make sure the overview is loaded, fetching it at most once, and report
/// whether it grants admin access.
///
/// The session is read before the fetch and updated after it, never held
/// across the await. A result for a token that was replaced meanwhile is
/// dropped, which leaves the overview missing and reads as not admin.
pub async fn resolve_admin_eligibility<H, A>(session: &mut H, api: &A) -> AdminEligibility
where
    H: SessionAccess,
    A: OverviewApi + ?Sized,
{
    let token = session.with_state(|s| if s.user().is_some() { None } else { s.overview_token() });
    let Some(token) = token else {
        return session.with_state(AdminEligibility::of);
    };
    let fetched = api.fetch_overview(&token).await;
    let outcome = session.apply_overview_result(&token, fetched);
    session.with_state(|s| AdminEligibility::after_fetch(&outcome, s))
}

impl From<Verdict> for Decision {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Allow => Self::Allow,
            Verdict::Redirect(path) => Self::Redirect(path),
        }
    }
}

/// The guard with its configured redirect targets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationGuard {
    paths: GuardPaths,
}

impl NavigationGuard {
    pub fn new(paths: GuardPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &GuardPaths {
        &self.paths
    }

    /// Decide the transition `from -> to`, suspending only for the admin
    /// overview fetch.
    pub async fn check<H, A>(&self, to: &RouteTarget, from: Option<&RouteTarget>, session: &mut H, api: &A) -> Verdict
    where
        H: SessionAccess,
        A: OverviewApi + ?Sized,
    {
        let verdict = match session.with_state(|s| evaluate(to, s, &self.paths)) {
            Decision::Allow => Verdict::Allow,
            Decision::Redirect(path) => Verdict::Redirect(path),
            Decision::NeedsProfile => {
                let eligibility = resolve_admin_eligibility(session, api).await;
                if eligibility == AdminEligibility::NotAdmin {
                    leptos::logging::warn!("user is not admin, redirecting to {}", self.paths.app_home);
                }
                admin_verdict(eligibility, &self.paths)
            }
        };
        if let Verdict::Redirect(path) = &verdict {
            let from = from.map_or("(initial)", |r| r.path.as_str());
            leptos::logging::log!("navigation {from} -> {} redirected to {path}", to.path);
        }
        verdict
    }
}
