//! Course catalog and requirement trees loaded from CSV exports.

mod parser;

use crate::config::DataConfig;
use crate::workflows::selection::domain::Course;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

pub use parser::{ConditionSpec, GroupKind, RequirementRow};

#[derive(Debug, thiserror::Error)]
pub enum CatalogDataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Every known course, ordered by code, plus the requirement rows that gate them.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    requirements: Vec<RequirementRow>,
}

impl CourseCatalog {
    pub fn from_dir(config: &DataConfig) -> Result<Self, CatalogDataError> {
        let courses = open(&config.courses_path())?;
        let requirements = open(&config.requirements_path())?;
        let catalog = Self::from_readers(courses, requirements)?;
        info!(
            dir = %config.dir.display(),
            courses = catalog.courses.len(),
            requirement_rows = catalog.requirements.len(),
            "course catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_readers<C: Read, R: Read>(
        courses: C,
        requirements: R,
    ) -> Result<Self, CatalogDataError> {
        let mut courses = parser::parse_courses(courses)?;
        courses.sort_by(|left, right| left.code.cmp(&right.code));
        courses.dedup_by(|later, earlier| later.code == earlier.code);

        let requirements = parser::parse_requirements(requirements)?;
        Ok(Self {
            courses,
            requirements,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses
            .binary_search_by(|course| course.code.as_str().cmp(code))
            .ok()
            .map(|index| &self.courses[index])
    }

    pub fn requirements(&self) -> &[RequirementRow] {
        &self.requirements
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

fn open(path: &Path) -> Result<File, CatalogDataError> {
    File::open(path).map_err(|source| CatalogDataError::Io {
        path: path.to_path_buf(),
        source,
    })
}
