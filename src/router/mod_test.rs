use super::*;
use crate::config::GuardPaths;
use crate::net::test_helpers::overview;
use crate::state::session::SessionState;

fn standard(path: &str) -> RouteTarget {
    RouteTable::standard().resolve(path)
}

fn onboarded_member() -> SessionState {
    let mut state = SessionState::default();
    state.set_token(Some("t1".to_owned()));
    state.set_onboarding_completed(true);
    state
}

fn step_for(requested: &str, state: &SessionState) -> NavigationStep {
    let to = standard(requested);
    plan_navigation(requested, &to, evaluate(&to, state, &GuardPaths::default()))
}

// =============================================================
// plan_navigation
// =============================================================

#[test]
fn allowed_route_is_entered_in_place() {
    assert_eq!(step_for("/app/consult", &onboarded_member()), NavigationStep::Enter { canonical: None });
}

#[test]
fn trailing_slash_and_query_do_not_force_a_rewrite() {
    assert_eq!(step_for("/app/consult/", &onboarded_member()), NavigationStep::Enter { canonical: None });
    assert_eq!(step_for("/app/consult?tab=1", &onboarded_member()), NavigationStep::Enter { canonical: None });
}

#[test]
fn record_redirect_is_entered_under_its_canonical_path() {
    let guest = SessionState::default();
    assert_eq!(step_for("/", &guest), NavigationStep::Enter { canonical: Some("/auth/login".into()) });
}

#[test]
fn rejected_route_redirects() {
    assert_eq!(step_for("/app/consult", &SessionState::default()), NavigationStep::Redirect("/auth/login".into()));
}

#[test]
fn admin_route_without_overview_awaits_the_check() {
    assert_eq!(step_for("/app/admin", &onboarded_member()), NavigationStep::AwaitAdmin);
}

#[test]
fn admin_route_with_overview_is_decided_synchronously() {
    let mut admin = onboarded_member();
    admin.set_user(Some(overview(true, true)));
    assert_eq!(step_for("/app/admin", &admin), NavigationStep::Enter { canonical: None });

    let mut member = onboarded_member();
    member.set_user(Some(overview(true, false)));
    assert_eq!(step_for("/app/admin", &member), NavigationStep::Redirect("/app/overview".into()));
}

// =============================================================
// settle_admin_check
// =============================================================

#[test]
fn admin_verdict_applies_while_location_unchanged() {
    assert_eq!(
        settle_admin_check(Verdict::Redirect("/app/overview".into()), "/app/admin", "/app/admin"),
        Some(NavigationStep::Redirect("/app/overview".into()))
    );
    assert_eq!(
        settle_admin_check(Verdict::Allow, "/app/admin", "/app/admin/"),
        Some(NavigationStep::Enter { canonical: None })
    );
}

#[test]
fn admin_verdict_is_dropped_after_user_moved_on() {
    assert_eq!(settle_admin_check(Verdict::Redirect("/auth/login".into()), "/app/admin", "/app/history"), None);
    assert_eq!(settle_admin_check(Verdict::Allow, "/app/admin", "/app/settings"), None);
}

// =============================================================
// Which steps count as entering a route
// =============================================================

#[test]
fn only_entered_routes_become_the_previous_location() {
    let previous = StoredValue::new(Some("/app/overview".to_owned()));
    let navigated = std::cell::RefCell::new(Vec::new());
    let navigate = |path: &str, options: NavigateOptions| {
        assert!(options.replace);
        navigated.borrow_mut().push(path.to_owned());
    };

    let admin = standard("/app/admin");
    follow(&NavigationStep::Redirect("/app/overview".into()), &admin, previous, &navigate);
    assert_eq!(previous.get_value().as_deref(), Some("/app/overview"));
    follow(&NavigationStep::AwaitAdmin, &admin, previous, &navigate);
    assert_eq!(previous.get_value().as_deref(), Some("/app/overview"));

    let history = standard("/app/history");
    follow(&NavigationStep::Enter { canonical: None }, &history, previous, &navigate);
    assert_eq!(previous.get_value().as_deref(), Some("/app/history"));

    let login = standard("/");
    follow(&NavigationStep::Enter { canonical: Some("/auth/login".into()) }, &login, previous, &navigate);
    assert_eq!(previous.get_value().as_deref(), Some("/auth/login"));

    assert_eq!(navigated.into_inner(), vec!["/app/overview".to_owned(), "/auth/login".to_owned()]);
}
