use super::*;

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = ClientConfig::from_values(None, None, None, None);
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base, "");
    assert_eq!(cfg.paths.login, "/auth/login");
    assert_eq!(cfg.paths.onboarding, "/onboarding");
    assert_eq!(cfg.paths.app_home, "/app/overview");
}

#[test]
fn api_base_is_trimmed() {
    let cfg = ClientConfig::from_values(Some(" https://api.unlimi.app/ "), None, None, None);
    assert_eq!(cfg.api_base, "https://api.unlimi.app");
}

#[test]
fn custom_paths_are_used() {
    let cfg = ClientConfig::from_values(None, Some("/signin"), Some("/setup"), Some("/app/home"));
    assert_eq!(
        cfg.paths,
        GuardPaths { login: "/signin".into(), onboarding: "/setup".into(), app_home: "/app/home".into() }
    );
}

#[test]
fn relative_or_blank_paths_fall_back_to_defaults() {
    let cfg = ClientConfig::from_values(None, Some("signin"), Some("  "), Some("app/home"));
    assert_eq!(cfg.paths, GuardPaths::default());
}

#[test]
fn paths_are_normalized_like_router_locations() {
    let cfg = ClientConfig::from_values(None, Some("/auth/login?next=/app"), Some("/onboarding/"), Some(" /app/overview/ "));
    assert_eq!(cfg.paths, GuardPaths::default());
}

#[test]
fn trailing_slash_onboarding_path_still_sends_onboarded_users_home() {
    use crate::router::guard::{Decision, evaluate};
    use crate::state::session::SessionState;

    let cfg = ClientConfig::from_values(None, None, Some("/onboarding/"), None);
    let mut state = SessionState::default();
    state.set_token(Some("t1".to_owned()));
    state.set_onboarding_completed(true);

    let target = RouteTable::standard().resolve("/onboarding");
    assert_eq!(evaluate(&target, &state, &cfg.paths), Decision::Redirect("/app/overview".to_owned()));
}

#[test]
fn default_paths_validate_against_both_tables() {
    let cfg = ClientConfig::default();
    assert!(cfg.validate(&RouteTable::standard()).is_empty());
    assert!(cfg.validate(&RouteTable::with_landing()).is_empty());
}

#[test]
fn undeclared_paths_are_reported() {
    let cfg = ClientConfig::from_values(None, Some("/signin"), Some("/setup"), None);
    let problems = cfg.validate(&RouteTable::standard());
    assert_eq!(problems.len(), 2);
    assert!(problems[0].contains("/signin"));
    assert!(problems[1].contains("/setup"));
}

#[test]
fn login_path_behind_auth_is_reported() {
    let cfg = ClientConfig::from_values(None, Some("/app/overview"), None, None);
    let problems = cfg.validate(&RouteTable::standard());
    assert_eq!(problems, vec!["login path /app/overview requires authentication".to_owned()]);
}
