//! Decides which catalog courses a student may take from their program, term and minor.

mod evaluator;

pub use evaluator::RequirementEvaluator;

use crate::catalog::{canonical_program, term_rank, ACADEMIC_TERMS, PROGRAMS};
use crate::gateway::EligibilityQuery;

/// A validated eligibility request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    /// Catalog spelling of the program.
    pub program: &'static str,
    pub term: String,
    pub term_rank: u8,
    pub minor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("Program must be one of: {}", PROGRAMS.join(", "))]
    UnknownProgram(String),
    #[error("Term must be one of: {}", ACADEMIC_TERMS.join(", "))]
    UnknownTerm(String),
    #[error("Minor must be a non-empty string")]
    BlankMinor,
}

impl StudentProfile {
    pub fn validate(query: &EligibilityQuery) -> Result<Self, EligibilityError> {
        let program = canonical_program(&query.program)
            .ok_or_else(|| EligibilityError::UnknownProgram(query.program.clone()))?;

        let term = query.term.trim().to_string();
        let rank = term_rank(&term).ok_or_else(|| EligibilityError::UnknownTerm(term.clone()))?;

        let minor = match &query.minor {
            Some(minor) if minor.trim().is_empty() => return Err(EligibilityError::BlankMinor),
            Some(minor) => Some(minor.trim().to_string()),
            None => None,
        };

        Ok(Self {
            program,
            term,
            term_rank: rank,
            minor,
        })
    }
}
