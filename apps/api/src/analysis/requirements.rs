//! Requirement Deriver: decides which skills a resume is scored against.
//!
//! One pure function driven by an explicit `RequirementMode`. Document
//! extraction happens before the call; its outcome is passed in.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::catalog::{SkillCatalog, SkillTerm};
use crate::analysis::matcher::match_skills;
use crate::analysis::normalizer::TextNormalizer;
use crate::extraction::ExtractionError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementMode {
    /// Derive from the job description, falling back to common skills.
    #[default]
    JobDescription,
    /// Always score against the common-skill list.
    CommonSkills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementSource {
    JobDescription,
    Fallback,
}

/// Ordered, deduplicated skills a resume is scored against. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredSkillSet {
    skills: Vec<SkillTerm>,
    source: RequirementSource,
}

impl RequiredSkillSet {
    fn fallback(fallback: &SkillCatalog) -> Self {
        Self {
            skills: fallback.terms().to_vec(),
            source: RequirementSource::Fallback,
        }
    }

    pub fn skills(&self) -> &[SkillTerm] {
        &self.skills
    }

    pub fn source(&self) -> RequirementSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    JobDescriptionExtractionFailed,
    FallbackRequirements,
    EmptyResumeText,
}

/// Recoverable condition surfaced to the caller alongside a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisWarning {
    pub code: WarningCode,
    pub message: String,
}

impl AnalysisWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Job-description input: pasted text and/or the outcome of extracting an uploaded document.
#[derive(Debug, Clone, Default)]
pub struct JobDescription {
    pub pasted: Option<String>,
    pub document: Option<Result<String, ExtractionError>>,
}

impl JobDescription {
    pub fn pasted(text: impl Into<String>) -> Self {
        Self {
            pasted: Some(text.into()),
            document: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Derivation {
    pub required: RequiredSkillSet,
    pub warnings: Vec<AnalysisWarning>,
}

pub fn derive_required(
    mode: RequirementMode,
    job_description: &JobDescription,
    normalizer: &dyn TextNormalizer,
    catalog: &SkillCatalog,
    fallback: &SkillCatalog,
) -> Derivation {
    let mut warnings = Vec::new();

    if mode == RequirementMode::CommonSkills {
        return Derivation {
            required: RequiredSkillSet::fallback(fallback),
            warnings,
        };
    }

    let mut parts: Vec<&str> = Vec::new();
    if let Some(pasted) = job_description.pasted.as_deref() {
        parts.push(pasted);
    }
    match &job_description.document {
        Some(Ok(text)) => parts.push(text),
        Some(Err(e)) => {
            warn!("Job description extraction failed: {e}");
            warnings.push(AnalysisWarning::new(
                WarningCode::JobDescriptionExtractionFailed,
                format!("Could not read the job description document: {e}"),
            ));
        }
        None => {}
    }
    let combined = parts.join("\n");

    let derived = if combined.trim().is_empty() {
        Vec::new()
    } else {
        match_skills(&normalizer.normalize(&combined), catalog.terms())
    };

    if derived.is_empty() {
        debug!("No skills derived from job description, using fallback list");
        warnings.push(AnalysisWarning::new(
            WarningCode::FallbackRequirements,
            "No recognized skills found in the job description; scoring against common skills.",
        ));
        return Derivation {
            required: RequiredSkillSet::fallback(fallback),
            warnings,
        };
    }

    debug!(count = derived.len(), "Derived required skills from job description");
    Derivation {
        required: RequiredSkillSet {
            skills: derived,
            source: RequirementSource::JobDescription,
        },
        warnings,
    }
}
