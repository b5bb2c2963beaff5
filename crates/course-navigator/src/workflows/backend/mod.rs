//! Reference course backend: eligibility and search over a CSV catalog, served over HTTP.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::course_router;
pub use service::{BackendError, CourseBackend};
