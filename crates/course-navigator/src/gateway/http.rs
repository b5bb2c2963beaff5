use super::wire::{EligibleCoursesResponse, ErrorBody, SearchResponse};
use super::{CourseSearch, EligibilityQuery, EligibilityResolver, GatewayError, SearchQuery};
use crate::config::ApiConfig;
use crate::workflows::selection::domain::{Course, RankedMatch};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const ELIGIBLE_COURSES_PATH: &str = "get-eligible-courses";
pub const SEARCH_COURSES_PATH: &str = "search-courses";

/// reqwest-backed client for the course backend's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpCourseGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpCourseGateway {
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let timeout = config.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "sending course backend request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| self.classify(err))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.trim().is_empty());
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|err| GatewayError::Malformed(err.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout)
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

impl EligibilityResolver for HttpCourseGateway {
    async fn resolve(&self, query: &EligibilityQuery) -> Result<Vec<Course>, GatewayError> {
        let response: EligibleCoursesResponse = self.post_json(ELIGIBLE_COURSES_PATH, query).await?;
        response.into_courses()
    }
}

impl CourseSearch for HttpCourseGateway {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RankedMatch>, GatewayError> {
        let response: SearchResponse = self.post_json(SEARCH_COURSES_PATH, query).await?;
        response.into_matches()
    }
}
