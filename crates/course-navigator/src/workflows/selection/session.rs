use super::domain::{ViewChoice, WizardStep};
use super::wizard::{Advance, Completion, SelectionWizard, WizardError};
use crate::gateway::{CourseSearch, EligibilityResolver, GatewayError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// One student's pass through the wizard, wired to live collaborators.
///
/// Each exchange is awaited to completion (or the timeout) before the session accepts the
/// next command, so a session never has two requests of the same kind in flight.
pub struct SelectionSession<G> {
    wizard: SelectionWizard,
    gateway: Arc<G>,
    timeout: Duration,
}

impl<G> SelectionSession<G>
where
    G: EligibilityResolver + CourseSearch + 'static,
{
    pub fn new(gateway: Arc<G>, timeout: Duration) -> Self {
        Self {
            wizard: SelectionWizard::new(),
            gateway,
            timeout,
        }
    }

    pub fn wizard(&self) -> &SelectionWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut SelectionWizard {
        &mut self.wizard
    }

    /// Advance one step, resolving eligibility when leaving the minor step.
    pub async fn next(&mut self) -> Result<WizardStep, WizardError> {
        match self.wizard.next()? {
            Advance::Moved(step) => Ok(step),
            Advance::Terminal => Ok(self.wizard.step()),
            Advance::AwaitingResolution(request) => {
                let outcome = bounded(self.timeout, self.gateway.resolve(&request.query)).await;
                self.wizard.complete_resolution(request.token, outcome);
                Ok(self.wizard.step())
            }
        }
    }

    pub fn back(&mut self) -> WizardStep {
        self.wizard.back()
    }

    pub fn reset(&mut self) {
        self.wizard.reset();
    }

    pub fn choose_view(&mut self, choice: ViewChoice) {
        self.wizard.set_view_choice(choice);
    }

    /// Run a search over the eligible set. Returns `None` when no request was needed.
    pub async fn search(&mut self, query: &str) -> Result<Option<Completion>, WizardError> {
        let Some(request) = self.wizard.begin_search(query)? else {
            return Ok(None);
        };
        let outcome = bounded(self.timeout, self.gateway.search(&request.query)).await;
        Ok(Some(self.wizard.complete_search(request.token, outcome)))
    }
}

/// Treat an exchange that outlives `timeout` like any other failed response.
async fn bounded<T, F>(timeout: Duration, exchange: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    match tokio::time::timeout(timeout, exchange).await {
        Ok(outcome) => outcome,
        Err(_) => Err(GatewayError::Timeout(timeout)),
    }
}
