//! Contracts for the two collaborators the selection wizard depends on.
//!
//! [`EligibilityResolver`] turns a program/term/minor tuple into the eligible course list and
//! [`CourseSearch`] ranks a free-text query over a set of eligible codes. The HTTP
//! implementation lives in [`http`]; tests substitute in-memory fakes.

pub mod http;
pub mod wire;

use crate::workflows::selection::domain::{Course, RankedMatch};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

pub use http::HttpCourseGateway;

/// Body of an eligibility exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityQuery {
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub minor: Option<String>,
}

/// Body of a search exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub eligible_course_codes: Vec<String>,
}

pub trait EligibilityResolver: Send + Sync {
    fn resolve(
        &self,
        query: &EligibilityQuery,
    ) -> impl Future<Output = Result<Vec<Course>, GatewayError>> + Send;
}

pub trait CourseSearch: Send + Sync {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<RankedMatch>, GatewayError>> + Send;
}

/// Why an exchange with a collaborator produced no usable payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("request could not be completed: {0}")]
    Transport(String),
    #[error("{}", rejection_text(.status, .message))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

impl GatewayError {
    /// Human-readable message supplied by the collaborator, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

fn rejection_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("server returned {status}: {message}"),
        None => format!("server returned {status}"),
    }
}
