use super::domain::{Course, NormalizedMatch};
use serde::Serialize;

/// Which course card, if any, is showing its details. Never more than one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: Option<String>,
}

impl ExpansionState {
    /// Expand `code`, collapsing whatever else was open, or collapse it if it was the open one.
    pub fn toggle(&mut self, code: &str) {
        if self.is_expanded(code) {
            self.expanded = None;
        } else {
            self.expanded = Some(code.to_string());
        }
    }

    pub fn is_expanded(&self, code: &str) -> bool {
        self.expanded.as_deref() == Some(code)
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn clear(&mut self) {
        self.expanded = None;
    }
}

/// Renderable view of one course in the results list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseCard {
    pub code: String,
    pub display_code: String,
    pub title: String,
    pub description: String,
    pub credits: f64,
    pub terms: Vec<String>,
    pub prerequisites: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub expanded: bool,
}

impl CourseCard {
    fn from_course(course: &Course, rating: Option<u8>, expansion: &ExpansionState) -> Self {
        Self {
            code: course.code.clone(),
            display_code: display_code(&course.code),
            title: course.title.clone(),
            description: course.description.clone(),
            credits: course.credits_or_default(),
            terms: course.terms_or_default(),
            prerequisites: course
                .prerequisites
                .as_ref()
                .map(|codes| codes.iter().map(|code| display_code(code)).collect())
                .unwrap_or_default(),
            rating,
            expanded: expansion.is_expanded(&course.code),
        }
    }

    pub fn rating_label(&self) -> Option<String> {
        self.rating.map(|rating| format!("{rating}/10"))
    }

    pub fn terms_label(&self) -> String {
        self.terms.join(", ")
    }
}

/// Course codes use underscores internally; show them with spaces.
pub fn display_code(code: &str) -> String {
    code.replace('_', " ")
}

/// Cards for the show-all listing. No ratings: these courses carry no score.
pub fn present_courses(courses: &[Course], expansion: &ExpansionState) -> Vec<CourseCard> {
    courses
        .iter()
        .map(|course| CourseCard::from_course(course, None, expansion))
        .collect()
}

/// Cards for search results, in collaborator order, each with its rating badge.
pub fn present_matches(matches: &[NormalizedMatch], expansion: &ExpansionState) -> Vec<CourseCard> {
    matches
        .iter()
        .map(|hit| CourseCard::from_course(hit.course(), Some(hit.rating), expansion))
        .collect()
}
