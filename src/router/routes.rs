//! Static route declarations and path resolution.
//!
//! Each route carries a [`RouteMeta`] describing who may see it. The guard
//! never looks at anything else. Paths that match no declaration resolve to
//! a public target so the router's own fallback page can render.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Access requirements declared on a route.
///
/// `requires_guest` and `requires_auth` are never both set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_guest: bool,
    pub requires_auth: bool,
    /// `Some(true)`: onboarding must be complete. `Some(false)`: the route
    /// is part of onboarding itself. `None`: don't care.
    pub requires_onboarding: Option<bool>,
    pub requires_admin: bool,
}

impl RouteMeta {
    pub const PUBLIC: Self =
        Self { requires_guest: false, requires_auth: false, requires_onboarding: None, requires_admin: false };

    pub const GUEST: Self = Self { requires_guest: true, ..Self::PUBLIC };

    /// Authenticated, still onboarding.
    pub const ONBOARDING: Self = Self { requires_auth: true, requires_onboarding: Some(false), ..Self::PUBLIC };

    /// Authenticated with onboarding finished.
    pub const APP: Self = Self { requires_auth: true, requires_onboarding: Some(true), ..Self::PUBLIC };

    pub const ADMIN: Self = Self { requires_admin: true, ..Self::APP };

    pub fn requires_completed_onboarding(self) -> bool {
        self.requires_onboarding == Some(true)
    }
}

/// One declared route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
    /// Record-level redirect applied before any guard runs.
    pub redirect: Option<&'static str>,
}

impl RouteDef {
    const fn new(path: &'static str, name: &'static str, meta: RouteMeta) -> Self {
        Self { path, name, meta, redirect: None }
    }

    const fn redirect(path: &'static str, to: &'static str) -> Self {
        Self { path, name: "", meta: RouteMeta::PUBLIC, redirect: Some(to) }
    }
}

const APP_ROUTES: [RouteDef; 10] = [
    RouteDef::new("/auth/login", "Login", RouteMeta::GUEST),
    RouteDef::new("/auth/register", "Register", RouteMeta::GUEST),
    RouteDef::new("/onboarding", "Onboarding", RouteMeta::ONBOARDING),
    RouteDef::new("/app/overview", "Overview", RouteMeta::APP),
    RouteDef::new("/app/overview-new", "OverviewNew", RouteMeta::APP),
    RouteDef::new("/app/consult", "Consult", RouteMeta::APP),
    RouteDef::new("/app/history", "History", RouteMeta::APP),
    RouteDef::new("/app/insights", "Insights", RouteMeta::APP),
    RouteDef::new("/app/settings", "Settings", RouteMeta::APP),
    RouteDef::new("/app/admin", "Admin", RouteMeta::ADMIN),
];

const fn with_root(root: RouteDef) -> [RouteDef; 11] {
    let mut routes = [root; 11];
    let mut i = 0;
    while i < APP_ROUTES.len() {
        routes[i] = APP_ROUTES[i];
        i += 1;
    }
    routes
}

static STANDARD: [RouteDef; 11] = with_root(RouteDef::redirect("/", "/auth/login"));
static WITH_LANDING: [RouteDef; 11] = with_root(RouteDef::new("/", "Landing", RouteMeta::PUBLIC));

/// A route transition's destination after resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTarget {
    pub path: String,
    /// Declared route name; `None` for undeclared paths.
    pub name: Option<&'static str>,
    pub meta: RouteMeta,
}

impl RouteTarget {
    /// Target for a path with no declaration.
    pub fn undeclared(path: impl Into<String>) -> Self {
        Self { path: path.into(), name: None, meta: RouteMeta::PUBLIC }
    }
}

/// The set of declared routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: &'static [RouteDef],
}

impl RouteTable {
    /// App layout: `/` redirects to login.
    pub fn standard() -> Self {
        Self { routes: &STANDARD }
    }

    /// Layout with a public landing page at `/`.
    pub fn with_landing() -> Self {
        Self { routes: &WITH_LANDING }
    }

    pub fn routes(&self) -> &'static [RouteDef] {
        self.routes
    }

    pub fn find(&self, path: &str) -> Option<&'static RouteDef> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    /// Resolve a requested location to the route the guard evaluates.
    /// Follows at most one record-level redirect.
    pub fn resolve(&self, location: &str) -> RouteTarget {
        let path = normalize_path(location);
        let Some(def) = self.find(path) else {
            return RouteTarget::undeclared(path);
        };
        let def = match def.redirect {
            Some(to) => match self.find(to) {
                Some(next) => next,
                None => return RouteTarget::undeclared(normalize_path(to)),
            },
            None => def,
        };
        RouteTarget { path: def.path.to_owned(), name: Some(def.name), meta: def.meta }
    }
}

/// Strip query string, fragment, and trailing slash. Empty becomes `/`.
pub fn normalize_path(location: &str) -> &str {
    let path = location.split(['?', '#']).next().unwrap_or_default().trim_end_matches('/');
    if path.is_empty() { "/" } else { path }
}
