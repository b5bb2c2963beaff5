use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::hash::{Hash, Hasher};

/// Credit weight shown for courses whose record omits it.
pub const DEFAULT_CREDITS: f64 = 0.5;

/// Offering term shown for courses whose record omits their schedule.
pub const UNSCHEDULED_TERM: &str = "TBA";

/// Shortest trimmed query that is sent to the search collaborator.
pub const MIN_QUERY_CHARS: usize = 2;

/// A course as returned by the eligibility collaborator. Identity is the course code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_offered: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<BTreeSet<String>>,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: description.into(),
            credits: None,
            terms_offered: None,
            prerequisites: None,
        }
    }

    /// A course known only by its code, with the deterministic placeholder title and
    /// description.
    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        let title = default_title(&code);
        let description = default_description(&code);
        Self::new(code, title, description)
    }

    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = Some(credits);
        self
    }

    pub fn with_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms_offered = Some(terms.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = Some(prerequisites.into_iter().map(Into::into).collect());
        self
    }

    pub fn credits_or_default(&self) -> f64 {
        self.credits.unwrap_or(DEFAULT_CREDITS)
    }

    pub fn terms_or_default(&self) -> Vec<String> {
        match &self.terms_offered {
            Some(terms) if !terms.is_empty() => terms.clone(),
            _ => vec![UNSCHEDULED_TERM.to_string()],
        }
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

pub fn default_title(code: &str) -> String {
    format!("{code} Course")
}

pub fn default_description(code: &str) -> String {
    format!("Description for {code}")
}

/// Choices made over the first three steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub program: String,
    pub academic_term: String,
    pub minor: Option<String>,
}

impl SelectionState {
    pub fn has_program(&self) -> bool {
        !self.program.trim().is_empty()
    }

    pub fn has_academic_term(&self) -> bool {
        !self.academic_term.trim().is_empty()
    }

    pub fn minor(&self) -> Option<&str> {
        self.minor
            .as_deref()
            .map(str::trim)
            .filter(|minor| !minor.is_empty())
    }
}

/// Wizard positions in disclosure order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    ProgramSelect,
    TermSelect,
    MinorSelect,
    ChoiceSelect,
    Results,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ProgramSelect,
            Self::TermSelect,
            Self::MinorSelect,
            Self::ChoiceSelect,
            Self::Results,
        ]
    }

    /// 1-based position shown to the student.
    pub const fn position(self) -> u8 {
        match self {
            Self::ProgramSelect => 1,
            Self::TermSelect => 2,
            Self::MinorSelect => 3,
            Self::ChoiceSelect => 4,
            Self::Results => 5,
        }
    }

    pub const fn from_position(position: u8) -> Option<Self> {
        match position {
            1 => Some(Self::ProgramSelect),
            2 => Some(Self::TermSelect),
            3 => Some(Self::MinorSelect),
            4 => Some(Self::ChoiceSelect),
            5 => Some(Self::Results),
            _ => None,
        }
    }

    pub const fn next(self) -> Option<Self> {
        Self::from_position(self.position() + 1)
    }

    pub const fn previous(self) -> Option<Self> {
        Self::from_position(self.position() - 1)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ProgramSelect => "Program",
            Self::TermSelect => "Academic Term",
            Self::MinorSelect => "Minor",
            Self::ChoiceSelect => "View",
            Self::Results => "Results",
        }
    }
}

/// How the results step presents the eligible set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewChoice {
    #[default]
    Unset,
    ShowAll,
    Search,
}

impl ViewChoice {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unset => "Not chosen",
            Self::ShowAll => "Show all eligible courses",
            Self::Search => "Search eligible courses",
        }
    }

    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// Courses resolved for one selection, in collaborator order, deduplicated by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleSet {
    courses: Vec<Course>,
    codes: Vec<String>,
}

impl EligibleSet {
    pub fn new(courses: Vec<Course>) -> Self {
        let mut seen = HashSet::new();
        let courses: Vec<Course> = courses
            .into_iter()
            .filter(|course| seen.insert(course.code.clone()))
            .collect();
        let codes = courses.iter().map(|course| course.code.clone()).collect();
        Self { courses, codes }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|candidate| candidate == code)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// A search hit carrying the collaborator's raw relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch {
    pub course: Course,
    pub raw_score: f64,
}

/// A search hit with its 0–10 rating relative to the best hit of the same batch.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatch {
    pub ranked: RankedMatch,
    pub rating: u8,
}

impl NormalizedMatch {
    pub fn course(&self) -> &Course {
        &self.ranked.course
    }
}

/// Search artifacts that live only while the results step is in search mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub executed_query: Option<String>,
    pub results: Vec<NormalizedMatch>,
    pub has_searched: bool,
    pub is_searching: bool,
}

impl SearchState {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Validation,
    Resolution,
    Search,
}

/// Dismissible, non-fatal message raised to the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
