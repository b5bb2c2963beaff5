//! The five-step course selection wizard: program, term, optional minor, view choice, results.

pub mod domain;
pub mod presentation;
pub mod ranking;
mod session;
mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    Course, EligibleSet, NormalizedMatch, Notice, NoticeKind, RankedMatch, SearchState,
    SelectionState, ViewChoice, WizardStep,
};
pub use presentation::{CourseCard, ExpansionState};
pub use session::SelectionSession;
pub use wizard::{
    Advance, Completion, EligibilityRequest, RequestToken, SearchRequest, SelectionWizard,
    ValidationError, WizardError,
};
