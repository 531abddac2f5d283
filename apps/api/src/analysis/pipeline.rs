//! Analyzer: runs one resume through derive → normalize → match → summarize.
//!
//! Stateless apart from the immutable catalog and injected normalizer, so one
//! instance is shared across requests behind an `Arc`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::catalog::SkillCatalog;
use crate::analysis::matcher::match_skills;
use crate::analysis::normalizer::{TextNormalizer, TokenSequence};
use crate::analysis::report::{summarize, MatchResult};
use crate::analysis::requirements::{
    derive_required, AnalysisWarning, Derivation, JobDescription, RequiredSkillSet,
    RequirementMode, WarningCode,
};

pub const DEFAULT_PREVIEW_CHARS: usize = 3000;

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub mode: RequirementMode,
    pub job_description: JobDescription,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub mode: RequirementMode,
    pub required: RequiredSkillSet,
    pub result: MatchResult,
    pub warnings: Vec<AnalysisWarning>,
    pub token_count: usize,
    /// Normalized resume tokens, in source order.
    pub tokens: TokenSequence,
    pub resume_preview: String,
}

#[derive(Clone)]
pub struct SkillAnalyzer {
    normalizer: Arc<dyn TextNormalizer>,
    catalog: SkillCatalog,
    fallback: SkillCatalog,
    preview_chars: usize,
}

impl SkillAnalyzer {
    pub fn new(
        normalizer: Arc<dyn TextNormalizer>,
        catalog: SkillCatalog,
        fallback: SkillCatalog,
    ) -> Self {
        Self {
            normalizer,
            catalog,
            fallback,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn fallback(&self) -> &SkillCatalog {
        &self.fallback
    }

    /// Builds the required skill set for a mode and job description.
    pub fn derive(&self, mode: RequirementMode, job_description: &JobDescription) -> Derivation {
        derive_required(
            mode,
            job_description,
            self.normalizer.as_ref(),
            &self.catalog,
            &self.fallback,
        )
    }

    pub fn analyze(&self, request: AnalysisRequest) -> AnalysisReport {
        let analysis_id = Uuid::new_v4();

        let Derivation {
            required,
            mut warnings,
        } = self.derive(request.mode, &request.job_description);

        let tokens = self.normalizer.normalize(&request.resume_text);
        if tokens.is_empty() {
            warnings.push(AnalysisWarning::new(
                WarningCode::EmptyResumeText,
                "No readable words were found in the resume.",
            ));
        }
        debug!(%analysis_id, tokens = tokens.len(), required = required.len(), "Normalized resume");

        let matched = match_skills(&tokens, required.skills());
        let result = summarize(&matched, required.skills());

        info!(
            %analysis_id,
            score = result.score,
            matched = result.matched.len(),
            required = required.len(),
            "Resume analysis complete"
        );

        AnalysisReport {
            analysis_id,
            analyzed_at: Utc::now(),
            mode: request.mode,
            required,
            result,
            warnings,
            token_count: tokens.len(),
            tokens,
            resume_preview: request.resume_text.chars().take(self.preview_chars).collect(),
        }
    }
}
