//! Client configuration baked in at build time.
//!
//! Values come from environment variables visible to the compiler
//! (`option_env!`), so a deployment picks its API origin and redirect
//! targets when the WASM bundle is built:
//!
//! - `UNLIMI_API_BASE`: API origin, same-origin when unset
//! - `UNLIMI_LOGIN_PATH`: default `/auth/login`
//! - `UNLIMI_ONBOARDING_PATH`: default `/onboarding`
//! - `UNLIMI_APP_HOME_PATH`: default `/app/overview`
//!
//! Paths are normalized the way the router normalizes locations (query,
//! fragment and trailing slash stripped), and invalid ones (not starting
//! with `/`) fall back to the default. [`ClientConfig::validate`] reports
//! paths the route table does not declare.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::router::routes::{RouteTable, normalize_path};

pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";
pub const DEFAULT_ONBOARDING_PATH: &str = "/onboarding";
pub const DEFAULT_APP_HOME_PATH: &str = "/app/overview";

/// Redirect targets used by the navigation guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardPaths {
    pub login: String,
    pub onboarding: String,
    pub app_home: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_PATH.to_owned(),
            onboarding: DEFAULT_ONBOARDING_PATH.to_owned(),
            app_home: DEFAULT_APP_HOME_PATH.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin without trailing slash; empty means same-origin.
    pub api_base: String,
    pub paths: GuardPaths,
}

impl ClientConfig {
    /// Build the config from the compile-time environment.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("UNLIMI_API_BASE"),
            option_env!("UNLIMI_LOGIN_PATH"),
            option_env!("UNLIMI_ONBOARDING_PATH"),
            option_env!("UNLIMI_APP_HOME_PATH"),
        )
    }

    pub fn from_values(
        api_base: Option<&str>,
        login: Option<&str>,
        onboarding: Option<&str>,
        app_home: Option<&str>,
    ) -> Self {
        let api_base = api_base.unwrap_or_default().trim().trim_end_matches('/').to_owned();
        let paths = GuardPaths {
            login: parse_path("UNLIMI_LOGIN_PATH", login, DEFAULT_LOGIN_PATH),
            onboarding: parse_path("UNLIMI_ONBOARDING_PATH", onboarding, DEFAULT_ONBOARDING_PATH),
            app_home: parse_path("UNLIMI_APP_HOME_PATH", app_home, DEFAULT_APP_HOME_PATH),
        };
        Self { api_base, paths }
    }

    /// Problems with the redirect targets against `table`: paths no route
    /// declares, and a login page that itself requires authentication.
    /// Empty when the config is usable.
    pub fn validate(&self, table: &RouteTable) -> Vec<String> {
        let targets = [
            ("login", &self.paths.login),
            ("onboarding", &self.paths.onboarding),
            ("app home", &self.paths.app_home),
        ];
        let mut problems = Vec::new();
        for (role, path) in targets {
            match table.find(path) {
                None => problems.push(format!("{role} path {path} is not a declared route")),
                Some(route) if role == "login" && route.meta.requires_auth => {
                    problems.push(format!("login path {path} requires authentication"));
                }
                Some(_) => {}
            }
        }
        problems
    }
}

fn parse_path(var: &str, raw: Option<&str>, default: &str) -> String {
    match raw.map(str::trim) {
        None | Some("") => default.to_owned(),
        Some(path) if path.starts_with('/') => normalize_path(path).to_owned(),
        Some(path) => {
            leptos::logging::warn!("{var}={path:?} is not an absolute path; using {default}");
            default.to_owned()
        }
    }
}
