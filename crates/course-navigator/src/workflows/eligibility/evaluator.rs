use super::StudentProfile;
use crate::catalog::term_rank;
use crate::workflows::catalog_data::{ConditionSpec, CourseCatalog, GroupKind, RequirementRow};
use crate::workflows::selection::domain::Course;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Requirement trees nested deeper than this are treated as unsatisfiable.
const MAX_DEPTH: usize = 32;

/// Walks per-course requirement trees against a [`StudentProfile`].
#[derive(Debug, Clone, Default)]
pub struct RequirementEvaluator {
    roots: HashMap<String, RequirementRow>,
    children: HashMap<u32, Vec<RequirementRow>>,
}

impl RequirementEvaluator {
    pub fn new(rows: &[RequirementRow]) -> Self {
        let mut roots: HashMap<String, RequirementRow> = HashMap::new();
        let mut children: HashMap<u32, Vec<RequirementRow>> = HashMap::new();

        for row in rows {
            match row.parent_id {
                None => {
                    let replace = roots
                        .get(&row.course)
                        .map_or(true, |current| row.position < current.position);
                    if replace {
                        roots.insert(row.course.clone(), row.clone());
                    }
                }
                Some(parent) => children.entry(parent).or_default().push(row.clone()),
            }
        }
        for siblings in children.values_mut() {
            siblings.sort_by_key(|row| (row.position, row.id));
        }

        Self { roots, children }
    }

    /// Courses from `catalog` the student may take, in catalog (code) order.
    pub fn eligible_courses<'a>(
        &self,
        catalog: &'a CourseCatalog,
        profile: &StudentProfile,
    ) -> Vec<&'a Course> {
        let eligible: Vec<&Course> = catalog
            .courses()
            .iter()
            .filter(|course| self.is_eligible(&course.code, profile))
            .collect();
        debug!(
            program = profile.program,
            term = %profile.term,
            eligible = eligible.len(),
            "requirement trees evaluated"
        );
        eligible
    }

    /// A course without a root requirement group is never eligible.
    pub fn is_eligible(&self, code: &str, profile: &StudentProfile) -> bool {
        match self.roots.get(code) {
            Some(root) => self.satisfied(root, profile, 0),
            None => false,
        }
    }

    fn satisfied(&self, group: &RequirementRow, profile: &StudentProfile, depth: usize) -> bool {
        if depth > MAX_DEPTH {
            warn!(course = %group.course, group = group.id, "requirement tree too deep");
            return false;
        }

        if group.kind == GroupKind::Condition {
            return match &group.condition {
                Some(condition) => condition_holds(condition, profile),
                None => false,
            };
        }

        let Some(children) = self.children.get(&group.id) else {
            return true;
        };
        if children.is_empty() {
            return true;
        }

        let mut outcomes = children
            .iter()
            .map(|child| self.satisfied(child, profile, depth + 1));
        match group.kind {
            GroupKind::And => outcomes.all(|ok| ok),
            _ => outcomes.any(|ok| ok),
        }
    }
}

fn condition_holds(condition: &ConditionSpec, profile: &StudentProfile) -> bool {
    let ConditionSpec {
        req_type,
        operator,
        value,
    } = condition;

    match (req_type.as_str(), operator.as_str()) {
        ("PROGRAM", "=") => profile.program.eq_ignore_ascii_case(value.trim()),
        ("PROGRAM", "!=") => !profile.program.eq_ignore_ascii_case(value.trim()),
        ("LEVEL", "=") => profile.term == value.trim(),
        ("LEVEL", ">=") => profile.term_rank >= term_rank(value).unwrap_or(0),
        ("MINOR", "=") => profile
            .minor
            .as_deref()
            .is_some_and(|minor| minor.eq_ignore_ascii_case(value.trim())),
        _ => {
            warn!(%req_type, %operator, %value, "unknown requirement condition");
            false
        }
    }
}
