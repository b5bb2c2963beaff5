use course_navigator::config::DataConfig;
use course_navigator::workflows::backend::CourseBackend;
use course_navigator::workflows::catalog_data::CatalogDataError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the catalog, requirement trees and search index the service answers from.
pub(crate) fn load_backend(config: &DataConfig) -> Result<Arc<CourseBackend>, CatalogDataError> {
    CourseBackend::load(config).map(Arc::new)
}
