use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::gateway::{
    CourseSearch, EligibilityQuery, EligibilityResolver, GatewayError, SearchQuery,
};
use crate::workflows::selection::domain::{Course, RankedMatch};
use crate::workflows::selection::{
    Advance, SearchRequest, SelectionSession, SelectionWizard, ViewChoice, WizardStep,
};

pub(super) fn mechanical_courses() -> Vec<Course> {
    vec![
        Course::from_code("ME101"),
        Course::from_code("ME202"),
        Course::from_code("ME305"),
    ]
}

pub(super) fn programming_courses() -> Vec<Course> {
    vec![
        Course::new(
            "CS135",
            "Designing Functional Programs",
            "Intro to programming",
        ),
        Course::new(
            "CS145",
            "Designing Functional Programs (Advanced)",
            "Advanced intro",
        ),
    ]
}

pub(super) fn programming_matches() -> Vec<RankedMatch> {
    vec![
        RankedMatch {
            course: Course::from_code("CS135"),
            raw_score: 9.0,
        },
        RankedMatch {
            course: Course::from_code("CS145"),
            raw_score: 3.0,
        },
    ]
}

/// Wizard filled in through step 3 with Mechanical Engineering / 2A / no minor.
pub(super) fn wizard_at_minor_step() -> SelectionWizard {
    let mut wizard = SelectionWizard::new();
    wizard.set_program("Mechanical Engineering");
    wizard.next().expect("program set");
    wizard.set_academic_term("2A");
    wizard.next().expect("term set");
    assert_eq!(wizard.step(), WizardStep::MinorSelect);
    wizard
}

/// Wizard on the results step in `choice` mode with `courses` resolved.
pub(super) fn wizard_at_results(courses: Vec<Course>, choice: ViewChoice) -> SelectionWizard {
    let mut wizard = wizard_at_minor_step();
    let request = match wizard.next().expect("minor step advances") {
        Advance::AwaitingResolution(request) => request,
        other => panic!("expected resolution request, got {other:?}"),
    };
    wizard.complete_resolution(request.token, Ok(courses));
    wizard.set_view_choice(choice);
    wizard.next().expect("choice set");
    assert_eq!(wizard.step(), WizardStep::Results);
    wizard
}

/// Start a search that is expected to go out to the collaborator.
pub(super) fn issue_search(wizard: &mut SelectionWizard, query: &str) -> SearchRequest {
    wizard
        .begin_search(query)
        .expect("search mode")
        .expect("request issued")
}

/// In-memory collaborator that replays scripted outcomes and records every request.
#[derive(Default)]
pub(super) struct ScriptedGateway {
    resolutions: Mutex<VecDeque<Result<Vec<Course>, GatewayError>>>,
    searches: Mutex<VecDeque<Result<Vec<RankedMatch>, GatewayError>>>,
    delay: Option<Duration>,
    resolve_calls: Mutex<Vec<EligibilityQuery>>,
    search_calls: Mutex<Vec<SearchQuery>>,
}

impl ScriptedGateway {
    pub(super) fn resolving(outcome: Result<Vec<Course>, GatewayError>) -> Self {
        let gateway = Self::default();
        gateway.push_resolution(outcome);
        gateway
    }

    pub(super) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(super) fn push_resolution(&self, outcome: Result<Vec<Course>, GatewayError>) {
        self.resolutions
            .lock()
            .expect("gateway mutex poisoned")
            .push_back(outcome);
    }

    pub(super) fn push_search(&self, outcome: Result<Vec<RankedMatch>, GatewayError>) {
        self.searches
            .lock()
            .expect("gateway mutex poisoned")
            .push_back(outcome);
    }

    pub(super) fn resolve_requests(&self) -> Vec<EligibilityQuery> {
        self.resolve_calls
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
    }

    pub(super) fn resolve_count(&self) -> usize {
        self.resolve_calls
            .lock()
            .expect("gateway mutex poisoned")
            .len()
    }

    pub(super) fn search_count(&self) -> usize {
        self.search_calls
            .lock()
            .expect("gateway mutex poisoned")
            .len()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl EligibilityResolver for ScriptedGateway {
    async fn resolve(&self, query: &EligibilityQuery) -> Result<Vec<Course>, GatewayError> {
        self.resolve_calls
            .lock()
            .expect("gateway mutex poisoned")
            .push(query.clone());
        self.pause().await;
        self.resolutions
            .lock()
            .expect("gateway mutex poisoned")
            .pop_front()
            .unwrap_or_else(unscripted)
    }
}

impl CourseSearch for ScriptedGateway {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RankedMatch>, GatewayError> {
        self.search_calls
            .lock()
            .expect("gateway mutex poisoned")
            .push(query.clone());
        self.pause().await;
        self.searches
            .lock()
            .expect("gateway mutex poisoned")
            .pop_front()
            .unwrap_or_else(unscripted)
    }
}

fn unscripted<T>() -> Result<T, GatewayError> {
    Err(GatewayError::Transport("nothing scripted".to_string()))
}

pub(super) fn session_with(
    gateway: ScriptedGateway,
    timeout: Duration,
) -> (SelectionSession<ScriptedGateway>, Arc<ScriptedGateway>) {
    let gateway = Arc::new(gateway);
    (SelectionSession::new(gateway.clone(), timeout), gateway)
}
