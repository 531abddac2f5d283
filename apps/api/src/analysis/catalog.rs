//! Skill Catalog: the closed, ordered vocabulary of recognized skill phrases.
//!
//! Catalog order is the display and tie-break order for every derived list.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// SkillTerm
// ────────────────────────────────────────────────────────────────────────────

/// A lowercased, trimmed skill phrase of one or more single-space-separated words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SkillTerm(String);

impl SkillTerm {
    /// Normalizes `raw` into a term. Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Multi-word phrases are matched by containment, single words by membership.
    pub fn is_phrase(&self) -> bool {
        self.0.contains(' ')
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }
}

impl fmt::Display for SkillTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SkillTerm {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SkillTerm::new(&value).ok_or(CatalogError::BlankTerm)
    }
}

impl From<SkillTerm> for String {
    fn from(term: SkillTerm) -> Self {
        term.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SkillCatalog
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("skill terms cannot be blank")]
    BlankTerm,

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog '{0}' has no entries")]
    Empty(&'static str),
}

/// Ordered set of skill terms. Duplicates are dropped, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SkillCatalog {
    terms: Vec<SkillTerm>,
}

impl SkillCatalog {
    /// Builds a catalog from raw phrases. Blank entries are skipped.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_terms(phrases.into_iter().filter_map(|p| SkillTerm::new(p.as_ref())))
    }

    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = SkillTerm>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[SkillTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every distinct word appearing in any term, used to shield catalog words
    /// from lemmatization.
    pub fn words(&self) -> HashSet<&str> {
        self.terms.iter().flat_map(SkillTerm::words).collect()
    }

    /// Broad default catalog used as the vocabulary for job-description derivation.
    pub fn default_catalog() -> Self {
        Self::from_phrases(DEFAULT_CATALOG)
    }

    /// Fixed common-skill list scored against when no requirements can be derived.
    pub fn common_skills() -> Self {
        Self::from_phrases(COMMON_SKILLS)
    }
}

/// Common technical and soft skills.
/// "c++" can never match normalized text (symbols are stripped) and is kept for parity
/// with the historical list.
const COMMON_SKILLS: &[&str] = &[
    "python",
    "java",
    "c",
    "c++",
    "html",
    "css",
    "javascript",
    "machine learning",
    "deep learning",
    "sql",
    "data analysis",
    "communication",
    "teamwork",
    "leadership",
    "problem solving",
];

const DEFAULT_CATALOG: &[&str] = &[
    // languages
    "python",
    "java",
    "c",
    "c++",
    "javascript",
    "typescript",
    "golang",
    "rust",
    "ruby",
    "php",
    "kotlin",
    "swift",
    "scala",
    "html",
    "css",
    "sql",
    "bash",
    // frameworks and tools
    "react",
    "angular",
    "django",
    "flask",
    "spring",
    "node",
    "docker",
    "kubernetes",
    "git",
    "linux",
    "aws",
    "azure",
    "terraform",
    "postgresql",
    "mongodb",
    "redis",
    "kafka",
    "spark",
    "pandas",
    "tensorflow",
    "pytorch",
    "tableau",
    "excel",
    // disciplines
    "machine learning",
    "deep learning",
    "data analysis",
    "data science",
    "data visualization",
    "natural language processing",
    "computer vision",
    "statistics",
    "cloud computing",
    "distributed systems",
    "microservices",
    "devops",
    "testing",
    "security",
    "agile",
    "scrum",
    "project management",
    // soft skills
    "communication",
    "teamwork",
    "leadership",
    "problem solving",
    "collaboration",
    "mentoring",
    "time management",
    "critical thinking",
];

// ────────────────────────────────────────────────────────────────────────────
// Catalog file
// ────────────────────────────────────────────────────────────────────────────

/// On-disk catalog override: `{"catalog": [...], "fallback": [...]}`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    catalog: Vec<String>,
    #[serde(default)]
    fallback: Vec<String>,
}

/// Loads `(catalog, fallback)` from a JSON file. A missing or empty fallback
/// list falls back to the built-in common skills.
pub fn load_catalog_file(path: &Path) -> Result<(SkillCatalog, SkillCatalog), CatalogError> {
    let raw = std::fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&raw)?;

    let catalog = SkillCatalog::from_phrases(&file.catalog);
    if catalog.is_empty() {
        return Err(CatalogError::Empty("catalog"));
    }

    let fallback = SkillCatalog::from_phrases(&file.fallback);
    let fallback = if fallback.is_empty() {
        SkillCatalog::common_skills()
    } else {
        fallback
    };

    Ok((catalog, fallback))
}
