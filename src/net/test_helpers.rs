//! Mock overview source shared by state and router tests.

use std::cell::{Cell, RefCell};

use super::api::{ApiError, OverviewApi};
use super::types::UserOverview;

/// Overview API that returns a canned result and counts calls.
pub struct MockOverview {
    result: Result<UserOverview, ApiError>,
    calls: Cell<usize>,
    tokens: RefCell<Vec<String>>,
}

impl MockOverview {
    pub fn ok(overview: UserOverview) -> Self {
        Self::with_result(Ok(overview))
    }

    pub fn failing(error: ApiError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<UserOverview, ApiError>) -> Self {
        Self { result, calls: Cell::new(0), tokens: RefCell::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl OverviewApi for MockOverview {
    async fn fetch_overview(&self, token: &str) -> Result<UserOverview, ApiError> {
        self.calls.set(self.calls.get() + 1);
        self.tokens.borrow_mut().push(token.to_owned());
        self.result.clone()
    }
}

/// Overview for a user with the given onboarding and admin flags.
pub fn overview(has_finished_onboarding: bool, is_admin: bool) -> UserOverview {
    UserOverview {
        email: "user@example.com".to_owned(),
        therapist_id: "default".to_owned(),
        has_finished_onboarding,
        is_admin,
        ..UserOverview::default()
    }
}
