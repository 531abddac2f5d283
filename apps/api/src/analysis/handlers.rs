//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::analysis::catalog::{SkillCatalog, SkillTerm};
use crate::analysis::normalizer::TokenSequence;
use crate::analysis::pipeline::{AnalysisReport, AnalysisRequest};
use crate::analysis::report::FitBand;
use crate::analysis::requirements::{
    AnalysisWarning, JobDescription, RequirementMode, RequirementSource,
};
use crate::errors::AppError;
use crate::extraction::DocumentOrigin;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    #[serde(default)]
    pub jd_text: Option<String>,
    #[serde(default)]
    pub mode: RequirementMode,
}

#[derive(Debug, Deserialize)]
pub struct DeriveRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct DeriveResponse {
    pub required: Vec<SkillTerm>,
    pub source: RequirementSource,
    pub warnings: Vec<AnalysisWarning>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub catalog: SkillCatalog,
    pub fallback: SkillCatalog,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub mode: RequirementMode,
    pub required_source: RequirementSource,
    pub required: Vec<SkillTerm>,
    pub matched: Vec<SkillTerm>,
    pub missing: Vec<SkillTerm>,
    pub score: f64,
    pub matched_count: usize,
    pub required_count: usize,
    pub band: FitBand,
    pub guidance: &'static str,
    pub warnings: Vec<AnalysisWarning>,
    pub token_count: usize,
    pub tokens: TokenSequence,
    pub resume_preview: String,
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(report: AnalysisReport) -> Self {
        let band = FitBand::from_score(report.result.score);
        Self {
            analysis_id: report.analysis_id,
            analyzed_at: report.analyzed_at,
            mode: report.mode,
            required_source: report.required.source(),
            required_count: report.required.len(),
            required: report.required.skills().to_vec(),
            matched_count: report.result.matched.len(),
            matched: report.result.matched,
            missing: report.result.missing,
            score: report.result.score,
            band,
            guidance: guidance(band),
            warnings: report.warnings,
            token_count: report.token_count,
            tokens: report.tokens,
            resume_preview: report.resume_preview,
        }
    }
}

/// User-facing advice for a fit band.
pub fn guidance(band: FitBand) -> &'static str {
    match band {
        FitBand::Strong => "Great alignment with industry-relevant skills.",
        FitBand::Fair => "Fair alignment. Consider highlighting more relevant skills.",
        FitBand::Weak => {
            "Low match. You might want to update your resume with more role-specific keywords."
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills/catalog
pub async fn handle_get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        catalog: state.analyzer.catalog().clone(),
        fallback: state.analyzer.fallback().clone(),
    })
}

/// POST /api/v1/skills/derive
///
/// Previews the required skill set a job description would produce.
pub async fn handle_derive(
    State(state): State<AppState>,
    Json(request): Json<DeriveRequest>,
) -> Json<DeriveResponse> {
    let derivation = state.analyzer.derive(
        RequirementMode::JobDescription,
        &JobDescription::pasted(request.jd_text),
    );

    Json(DeriveResponse {
        source: derivation.required.source(),
        required: derivation.required.skills().to_vec(),
        warnings: derivation.warnings,
    })
}

/// POST /api/v1/analyze/text
///
/// Scores already-extracted resume text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Json<AnalysisResponse> {
    let report = state.analyzer.analyze(AnalysisRequest {
        resume_text: request.resume_text,
        mode: request.mode,
        job_description: JobDescription {
            pasted: request.jd_text,
            document: None,
        },
    });

    Json(report.into())
}

/// POST /api/v1/analyze
///
/// Multipart fields: `resume` (PDF, required), `jd_text`, `jd_file` (PDF), `mode`.
/// A resume that cannot be read ends the request; a job description that
/// cannot be read only produces a warning.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut resume: Option<Bytes> = None;
    let mut jd_text: Option<String> = None;
    let mut jd_file: Option<Bytes> = None;
    let mut mode = RequirementMode::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => resume = Some(field.bytes().await?),
            "jd_text" => jd_text = Some(field.text().await?),
            "jd_file" => {
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file is chosen.
                if !bytes.is_empty() {
                    jd_file = Some(bytes);
                }
            }
            "mode" => mode = parse_mode(&field.text().await?)?,
            other => debug!("Ignoring unknown multipart field '{other}'"),
        }
    }

    let resume = resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    let resume_text = state
        .extractor
        .extract(DocumentOrigin::Resume, resume)
        .await
        .map_err(AppError::ResumeExtraction)?;

    let document = match jd_file {
        Some(bytes) => Some(
            state
                .extractor
                .extract(DocumentOrigin::JobDescription, bytes)
                .await,
        ),
        None => None,
    };

    let report = state.analyzer.analyze(AnalysisRequest {
        resume_text,
        mode,
        job_description: JobDescription {
            pasted: jd_text,
            document,
        },
    });

    Ok(Json(report.into()))
}

fn parse_mode(raw: &str) -> Result<RequirementMode, AppError> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string())).map_err(|_| {
        AppError::Validation(format!(
            "mode must be 'job_description' or 'common_skills', got '{}'",
            raw.trim()
        ))
    })
}
