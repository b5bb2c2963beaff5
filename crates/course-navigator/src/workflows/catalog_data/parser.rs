use crate::workflows::selection::domain::Course;
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Separator used inside list-valued cells (`terms`, `prerequisites`).
const LIST_SEPARATOR: char = ';';

/// How a requirement group combines its children, or a leaf condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupKind {
    And,
    Or,
    Condition,
}

/// A single leaf test inside a requirement tree, such as `LEVEL >= 2A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSpec {
    pub req_type: String,
    pub operator: String,
    pub value: String,
}

/// One node of a course's requirement tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementRow {
    pub id: u32,
    pub course: String,
    pub parent_id: Option<u32>,
    pub kind: GroupKind,
    pub condition: Option<ConditionSpec>,
    pub position: u32,
}

pub(crate) fn parse_courses<R: Read>(reader: R) -> Result<Vec<Course>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut courses = Vec::new();

    for record in csv_reader.deserialize::<CourseRow>() {
        let row = record?;
        if row.code.is_empty() {
            continue;
        }
        courses.push(row.into_course());
    }

    Ok(courses)
}

pub(crate) fn parse_requirements<R: Read>(reader: R) -> Result<Vec<RequirementRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawRequirementRow>() {
        rows.push(record?.into_row());
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    code: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    credits: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    terms: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    prerequisites: Option<String>,
}

impl CourseRow {
    fn into_course(self) -> Course {
        let mut course = Course::from_code(self.code);
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        course.credits = self
            .credits
            .as_deref()
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|credits| credits.is_finite() && *credits >= 0.0);
        course.terms_offered = self
            .terms
            .as_deref()
            .map(split_list)
            .filter(|terms| !terms.is_empty());
        course.prerequisites = self
            .prerequisites
            .as_deref()
            .map(|value| split_list(value).into_iter().collect())
            .filter(|codes: &std::collections::BTreeSet<String>| !codes.is_empty());
        course
    }
}

#[derive(Debug, Deserialize)]
struct RawRequirementRow {
    id: u32,
    course: String,
    #[serde(default)]
    parent_id: Option<u32>,
    kind: GroupKind,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    req_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    operator: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
    #[serde(default)]
    position: u32,
}

impl RawRequirementRow {
    fn into_row(self) -> RequirementRow {
        let condition = match (self.kind, self.req_type, self.operator) {
            (GroupKind::Condition, Some(req_type), Some(operator)) => Some(ConditionSpec {
                req_type: req_type.to_ascii_uppercase(),
                operator,
                value: self.value.unwrap_or_default(),
            }),
            _ => None,
        };

        RequirementRow {
            id: self.id,
            course: self.course,
            parent_id: self.parent_id,
            kind: self.kind,
            condition,
            position: self.position,
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
