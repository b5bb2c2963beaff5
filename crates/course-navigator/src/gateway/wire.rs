//! JSON payloads exchanged with the course backend, shared by the client and the reference
//! router so both sides agree on field names.

use super::GatewayError;
use crate::workflows::selection::domain::{default_description, default_title, Course, RankedMatch};
use serde::{Deserialize, Serialize};

/// An eligible course as sent over the wire. Older backends send bare code strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseEntry {
    Code(String),
    Record(CourseRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<String>>,
}

impl From<&Course> for CourseRecord {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            title: Some(course.title.clone()),
            description: Some(course.description.clone()),
            credits: course.credits,
            prerequisites: course
                .prerequisites
                .as_ref()
                .map(|codes| codes.iter().cloned().collect()),
            terms: course.terms_offered.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibleCoursesResponse {
    pub courses: Vec<CourseEntry>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultRecord {
    pub code: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultRecord>,
    #[serde(default)]
    pub count: usize,
}

/// Shape of a non-success body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl CourseEntry {
    pub fn into_course(self) -> Result<Course, GatewayError> {
        match self {
            CourseEntry::Code(code) => {
                let code = required_code(code)?;
                Ok(Course::from_code(code))
            }
            CourseEntry::Record(record) => {
                let code = required_code(record.code)?;
                Ok(Course {
                    title: text_or(record.title, || default_title(&code)),
                    description: text_or(record.description, || default_description(&code)),
                    credits: record.credits.filter(|credits| credits.is_finite()),
                    terms_offered: record.terms,
                    prerequisites: record
                        .prerequisites
                        .map(|codes| codes.into_iter().collect()),
                    code,
                })
            }
        }
    }
}

impl EligibleCoursesResponse {
    pub fn into_courses(self) -> Result<Vec<Course>, GatewayError> {
        self.courses
            .into_iter()
            .map(CourseEntry::into_course)
            .collect()
    }
}

impl SearchResultRecord {
    pub fn into_match(self) -> Result<RankedMatch, GatewayError> {
        let code = required_code(self.code)?;
        if !self.score.is_finite() || self.score < 0.0 {
            let score = self.score;
            let reason = format!("score for {code} must be a non-negative number, got {score}");
            return Err(GatewayError::Malformed(reason));
        }

        Ok(RankedMatch {
            course: Course::new(
                code.clone(),
                text_or(self.title, || default_title(&code)),
                text_or(self.description, || default_description(&code)),
            ),
            raw_score: self.score,
        })
    }
}

impl SearchResponse {
    pub fn into_matches(self) -> Result<Vec<RankedMatch>, GatewayError> {
        self.results
            .into_iter()
            .map(SearchResultRecord::into_match)
            .collect()
    }
}

fn required_code(code: String) -> Result<String, GatewayError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        let reason = "course record is missing its code";
        return Err(GatewayError::Malformed(reason.to_string()));
    }
    Ok(trimmed.to_string())
}

fn text_or(value: Option<String>, fallback: impl FnOnce() -> String) -> String {
    value
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(fallback)
}
