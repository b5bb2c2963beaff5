use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::service::{BackendError, CourseBackend};
use crate::gateway::http::{ELIGIBLE_COURSES_PATH, SEARCH_COURSES_PATH};
use crate::gateway::wire::{
    CourseEntry, CourseRecord, EligibleCoursesResponse, SearchResponse, SearchResultRecord,
};
use crate::gateway::{EligibilityQuery, SearchQuery};
use crate::workflows::search::SearchHit;

const NO_JSON: &str = "No JSON data provided";

/// Router exposing the eligibility and search endpoints the wizard talks to.
pub fn course_router(backend: Arc<CourseBackend>) -> Router {
    Router::new()
        .route(
            &format!("/{ELIGIBLE_COURSES_PATH}"),
            post(eligible_courses_handler),
        )
        .route(
            &format!("/{SEARCH_COURSES_PATH}"),
            post(search_courses_handler),
        )
        .route("/search", get(browse_handler))
        .with_state(backend)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BrowseParams {
    #[serde(default)]
    q: String,
}

pub(crate) async fn eligible_courses_handler(
    State(backend): State<Arc<CourseBackend>>,
    body: Bytes,
) -> Response {
    let query: EligibilityQuery = match parse_body(&body) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match backend.eligible_courses(&query) {
        Ok(courses) => {
            let payload = EligibleCoursesResponse {
                count: courses.len(),
                courses: courses
                    .iter()
                    .map(|course| CourseEntry::Record(CourseRecord::from(course)))
                    .collect(),
            };
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn search_courses_handler(
    State(backend): State<Arc<CourseBackend>>,
    body: Bytes,
) -> Response {
    let query: SearchQuery = match parse_body(&body) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match backend.search(&query) {
        Ok(hits) => {
            let results: Vec<SearchResultRecord> = hits.into_iter().map(record_for).collect();
            let payload = SearchResponse {
                count: results.len(),
                results,
            };
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn browse_handler(
    State(backend): State<Arc<CourseBackend>>,
    Query(params): Query<BrowseParams>,
) -> Response {
    match backend.browse(&params.q) {
        Ok(hits) => {
            let results: Vec<SearchResultRecord> = hits.into_iter().map(record_for).collect();
            (StatusCode::OK, Json(results)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// Accepts any JSON object body. An empty, non-JSON or non-object body is a 400.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, Response> {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value @ serde_json::Value::Object(_)) => value,
        _ => return Err(bad_request(NO_JSON)),
    };
    serde_json::from_value(value).map_err(|err| {
        warn!(%err, "rejected request body");
        bad_request(&format!("Invalid request body: {err}"))
    })
}

fn record_for(hit: SearchHit) -> SearchResultRecord {
    SearchResultRecord {
        code: hit.code,
        score: hit.score,
        title: Some(hit.title),
        description: Some(hit.description),
    }
}

fn error_response(err: BackendError) -> Response {
    bad_request(&err.to_string())
}

fn bad_request(message: &str) -> Response {
    let payload = json!({
        "error": message,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}
