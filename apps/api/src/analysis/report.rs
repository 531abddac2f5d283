//! Report Generator: fit score and missing skills. Pure data, no rendering.

use serde::Serialize;

use crate::analysis::catalog::SkillTerm;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub matched: Vec<SkillTerm>,
    pub missing: Vec<SkillTerm>,
    pub score: f64, // 0.0 to 100.0, one decimal
}

/// Scores `matched` against `required`.
///
/// score = round(100 × |matched| / |required|, 1), or 0.0 when nothing is required.
/// Exact ties round to the even digit (1 of 16 is 6.2).
/// missing keeps `required`'s order.
pub fn summarize(matched: &[SkillTerm], required: &[SkillTerm]) -> MatchResult {
    let score = if required.is_empty() {
        0.0
    } else {
        let ratio = matched.len() as f64 / required.len() as f64;
        ((ratio * 1000.0).round_ties_even() / 10.0).min(100.0)
    };

    let missing = required
        .iter()
        .filter(|skill| !matched.contains(*skill))
        .cloned()
        .collect();

    MatchResult {
        matched: matched.to_vec(),
        missing,
        score,
    }
}

/// Qualitative band of a fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitBand {
    Strong, // ≥ 80
    Fair,   // 50 to 79.9
    Weak,   // < 50
}

impl FitBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            FitBand::Strong
        } else if score >= 50.0 {
            FitBand::Fair
        } else {
            FitBand::Weak
        }
    }
}
