use crate::config::DataConfig;
use crate::gateway::{EligibilityQuery, SearchQuery};
use crate::workflows::catalog_data::{CatalogDataError, CourseCatalog};
use crate::workflows::eligibility::{EligibilityError, RequirementEvaluator, StudentProfile};
use crate::workflows::search::{SearchHit, SearchIndex};
use crate::workflows::selection::domain::Course;
use tracing::info;

/// Default hit count for the unscoped `GET /search` lookup.
pub const BROWSE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Missing program or term")]
    MissingSelection,
    #[error("Missing query parameter")]
    MissingQuery,
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
}

/// Catalog, requirement trees and search index, loaded once and shared by every request.
#[derive(Debug, Clone)]
pub struct CourseBackend {
    catalog: CourseCatalog,
    evaluator: RequirementEvaluator,
    index: SearchIndex,
    search_limit: usize,
}

impl CourseBackend {
    pub fn new(catalog: CourseCatalog, search_limit: usize) -> Self {
        let evaluator = RequirementEvaluator::new(catalog.requirements());
        let index = SearchIndex::build(catalog.courses());
        Self {
            catalog,
            evaluator,
            index,
            search_limit,
        }
    }

    pub fn load(config: &DataConfig) -> Result<Self, CatalogDataError> {
        let catalog = CourseCatalog::from_dir(config)?;
        Ok(Self::new(catalog, config.search_limit))
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit
    }

    pub fn eligible_courses(&self, query: &EligibilityQuery) -> Result<Vec<Course>, BackendError> {
        if query.program.trim().is_empty() || query.term.trim().is_empty() {
            return Err(BackendError::MissingSelection);
        }
        let profile = StudentProfile::validate(query)?;

        let courses: Vec<Course> = self
            .evaluator
            .eligible_courses(&self.catalog, &profile)
            .into_iter()
            .cloned()
            .collect();
        info!(
            program = profile.program,
            term = %profile.term,
            minor = profile.minor.as_deref().unwrap_or("-"),
            count = courses.len(),
            "eligible courses served"
        );
        Ok(courses)
    }

    /// Ranked search scoped to the caller's eligible codes (all courses when none are given).
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, BackendError> {
        self.ranked(
            &query.query,
            &query.eligible_course_codes,
            self.search_limit,
        )
    }

    /// Unscoped lookup over the whole catalog.
    pub fn browse(&self, query: &str) -> Result<Vec<SearchHit>, BackendError> {
        self.ranked(query, &[], BROWSE_LIMIT)
    }

    fn ranked(
        &self,
        query: &str,
        eligible: &[String],
        limit: usize,
    ) -> Result<Vec<SearchHit>, BackendError> {
        if query.trim().is_empty() {
            return Err(BackendError::MissingQuery);
        }
        let hits = self.index.search(query, eligible, limit);
        info!(query = %query.trim(), scoped = eligible.len(), count = hits.len(), "search served");
        Ok(hits)
    }
}
