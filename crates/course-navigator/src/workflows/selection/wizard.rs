use super::domain::{
    Course, EligibleSet, Notice, NoticeKind, RankedMatch, SearchState, SelectionState, ViewChoice,
    WizardStep, MIN_QUERY_CHARS,
};
use super::presentation::{present_courses, present_matches, CourseCard, ExpansionState};
use super::ranking::normalize;
use crate::gateway::{EligibilityQuery, GatewayError, SearchQuery};
use tracing::{debug, info, warn};

const RESOLUTION_FALLBACK: &str = "Could not load eligible courses. Please try again.";
const SEARCH_FALLBACK: &str = "Search failed. Please try again.";

/// Identifies one outbound request so its completion can be matched to the state that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Eligibility exchange the caller must perform before the wizard can leave `MinorSelect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityRequest {
    pub token: RequestToken,
    pub query: EligibilityQuery,
}

/// Search exchange the caller must perform for the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub token: RequestToken,
    pub query: SearchQuery,
}

/// Result of asking the wizard to move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved(WizardStep),
    AwaitingResolution(EligibilityRequest),
    Terminal,
}

/// What the wizard did with a completed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Discarded,
}

/// Missing selection that blocks a forward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("program required")]
    ProgramRequired,
    #[error("academic term required")]
    AcademicTermRequired,
    #[error("view choice required")]
    ViewChoiceRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("eligible courses are still loading")]
    ResolutionPending,
    #[error("search is only available on the results step in search mode")]
    SearchUnavailable,
}

/// The five-step selection flow and everything it owns.
///
/// The machine is synchronous. Side effects are handed to the caller as
/// [`EligibilityRequest`] / [`SearchRequest`] values and their outcomes come back through
/// [`SelectionWizard::complete_resolution`] and [`SelectionWizard::complete_search`]. A
/// completion whose token is no longer pending is discarded, so navigating away always wins
/// over a late response.
#[derive(Debug, Default)]
pub struct SelectionWizard {
    step: WizardStep,
    selection: SelectionState,
    view_choice: ViewChoice,
    eligible: Option<EligibleSet>,
    search: SearchState,
    expansion: ExpansionState,
    notices: Vec<Notice>,
    issued: u64,
    pending_resolution: Option<RequestToken>,
    pending_search: Option<RequestToken>,
}

impl SelectionWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn view_choice(&self) -> ViewChoice {
        self.view_choice
    }

    pub fn eligible(&self) -> Option<&EligibleSet> {
        self.eligible.as_ref()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_loading(&self) -> bool {
        self.pending_resolution.is_some()
    }

    pub fn set_program(&mut self, program: impl Into<String>) {
        self.selection.program = program.into().trim().to_string();
    }

    pub fn set_academic_term(&mut self, term: impl Into<String>) {
        self.selection.academic_term = term.into().trim().to_string();
    }

    /// Blank input clears the minor.
    pub fn set_minor(&mut self, minor: impl Into<String>) {
        let minor = minor.into().trim().to_string();
        self.selection.minor = if minor.is_empty() { None } else { Some(minor) };
    }

    pub fn clear_minor(&mut self) {
        self.selection.minor = None;
    }

    /// The results step always has a choice, so `Unset` is ignored there.
    pub fn set_view_choice(&mut self, choice: ViewChoice) {
        if self.step == WizardStep::Results && !choice.is_set() {
            debug!("ignoring view choice reset on results step");
            return;
        }
        let previous = self.view_choice;
        self.view_choice = choice;

        if self.step != WizardStep::Results || previous == choice {
            return;
        }
        if previous == ViewChoice::Search || choice == ViewChoice::Search {
            self.clear_search();
        }
        self.expansion.clear();
    }

    /// Edit the draft query without running it.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.query = query.into();
    }

    /// Guard for leaving the current step.
    pub fn can_advance(&self) -> Result<(), ValidationError> {
        match self.step {
            WizardStep::ProgramSelect if !self.selection.has_program() => {
                Err(ValidationError::ProgramRequired)
            }
            WizardStep::TermSelect if !self.selection.has_academic_term() => {
                Err(ValidationError::AcademicTermRequired)
            }
            WizardStep::ChoiceSelect if !self.view_choice.is_set() => {
                Err(ValidationError::ViewChoiceRequired)
            }
            _ => Ok(()),
        }
    }

    pub fn next(&mut self) -> Result<Advance, WizardError> {
        if self.step == WizardStep::Results {
            return Ok(Advance::Terminal);
        }

        if let Err(err) = self.can_advance() {
            debug!(step = ?self.step, %err, "advance blocked");
            let notice = Notice::new(NoticeKind::Validation, capitalize(&err.to_string()));
            self.raise(notice);
            return Err(err.into());
        }

        if self.step == WizardStep::MinorSelect {
            if self.pending_resolution.is_some() {
                return Err(WizardError::ResolutionPending);
            }
            let token = self.issue_token();
            self.pending_resolution = Some(token);
            let query = EligibilityQuery {
                program: self.selection.program.clone(),
                term: self.selection.academic_term.clone(),
                minor: self.selection.minor().map(str::to_string),
            };
            debug!(?token, ?query, "requesting eligible courses");
            let request = EligibilityRequest { token, query };
            return Ok(Advance::AwaitingResolution(request));
        }

        match self.step.next() {
            Some(target) => {
                self.transition(target);
                Ok(Advance::Moved(target))
            }
            None => Ok(Advance::Terminal),
        }
    }

    /// Move one step back without validation. No-op on the first step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(target) = self.step.previous() {
            self.transition(target);
        }
        self.step
    }

    /// Return to the initial state. Requests issued before the reset can no longer complete.
    pub fn reset(&mut self) {
        let issued = self.issued;
        *self = Self {
            issued,
            ..Self::default()
        };
        debug!("wizard reset");
    }

    pub fn complete_resolution(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<Course>, GatewayError>,
    ) -> Completion {
        if self.pending_resolution != Some(token) || self.step != WizardStep::MinorSelect {
            warn!(?token, "discarding stale eligibility response");
            return Completion::Discarded;
        }
        self.pending_resolution = None;

        match outcome {
            Ok(courses) => {
                let eligible = EligibleSet::new(courses);
                info!(
                    program = %self.selection.program,
                    term = %self.selection.academic_term,
                    count = eligible.len(),
                    "eligible courses resolved"
                );
                self.eligible = Some(eligible);
                self.transition(WizardStep::ChoiceSelect);
                Completion::Applied
            }
            Err(err) => {
                warn!(%err, "eligibility resolution failed");
                let message = err.server_message().unwrap_or(RESOLUTION_FALLBACK);
                self.raise(Notice::new(NoticeKind::Resolution, message));
                Completion::Failed
            }
        }
    }

    /// Run `query` against the eligible set.
    ///
    /// Returns `Ok(None)` when nothing needs to be sent: the query is too short (results and the
    /// has-searched flag are cleared) or there are no eligible codes to search within.
    pub fn begin_search(
        &mut self,
        query: impl Into<String>,
    ) -> Result<Option<SearchRequest>, WizardError> {
        if !self.in_search_mode() {
            return Err(WizardError::SearchUnavailable);
        }

        self.search.query = query.into();
        let trimmed = self.search.query.trim().to_string();

        if trimmed.chars().count() < MIN_QUERY_CHARS {
            self.pending_search = None;
            self.search.results.clear();
            self.search.has_searched = false;
            self.search.is_searching = false;
            return Ok(None);
        }

        let codes = match &self.eligible {
            Some(eligible) if !eligible.is_empty() => eligible.codes().to_vec(),
            _ => return Ok(None),
        };

        let token = self.issue_token();
        self.pending_search = Some(token);
        self.search.is_searching = true;
        self.search.executed_query = Some(trimmed.clone());
        debug!(?token, query = %trimmed, "requesting search");

        Ok(Some(SearchRequest {
            token,
            query: SearchQuery {
                query: trimmed,
                eligible_course_codes: codes,
            },
        }))
    }

    pub fn complete_search(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<RankedMatch>, GatewayError>,
    ) -> Completion {
        if self.pending_search != Some(token) || !self.in_search_mode() {
            warn!(?token, "discarding stale search response");
            return Completion::Discarded;
        }
        self.pending_search = None;
        self.search.is_searching = false;

        match outcome {
            Ok(matches) => {
                info!(count = matches.len(), "search completed");
                self.search.results = normalize(&matches);
                self.search.has_searched = true;
                Completion::Applied
            }
            Err(err) => {
                warn!(%err, "search failed");
                self.search.results.clear();
                self.search.has_searched = false;
                let message = err.server_message().unwrap_or(SEARCH_FALLBACK);
                self.raise(Notice::new(NoticeKind::Search, message));
                Completion::Failed
            }
        }
    }

    pub fn toggle_expansion(&mut self, code: &str) {
        self.expansion.toggle(code);
    }

    /// Cards for whatever the results step is currently showing.
    pub fn result_cards(&self) -> Vec<CourseCard> {
        if self.step != WizardStep::Results {
            return Vec::new();
        }
        match self.view_choice {
            ViewChoice::ShowAll => self
                .eligible
                .as_ref()
                .map(|eligible| present_courses(eligible.courses(), &self.expansion))
                .unwrap_or_default(),
            ViewChoice::Search => present_matches(&self.search.results, &self.expansion),
            ViewChoice::Unset => Vec::new(),
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn dismiss_notices(&mut self) {
        self.notices.clear();
    }

    fn in_search_mode(&self) -> bool {
        self.step == WizardStep::Results && self.view_choice == ViewChoice::Search
    }

    fn transition(&mut self, target: WizardStep) {
        let from = self.step;
        if from == target {
            return;
        }

        // exit hooks
        if from == WizardStep::Results {
            self.clear_search();
            self.expansion.clear();
        }
        if from == WizardStep::MinorSelect && self.pending_resolution.take().is_some() {
            debug!("left minor step with resolution in flight");
        }

        self.step = target;

        // entry hooks
        if target == WizardStep::Results && self.view_choice == ViewChoice::Search {
            self.clear_search();
        }

        debug!(?from, to = ?target, "wizard transition");
    }

    /// Drops query text, results, flags and any search still in flight.
    fn clear_search(&mut self) {
        self.search = SearchState::default();
        self.pending_search = None;
    }

    fn issue_token(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    fn raise(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
