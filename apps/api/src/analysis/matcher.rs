//! Skill Matcher: finds which target skills occur in a token sequence.
//!
//! Single words match by token membership. Phrases match by substring
//! containment in the space-joined tokens, which can also match across
//! unrelated neighbouring tokens ("data analysis report" satisfies
//! "analysis report"). That looseness is kept as-is for compatibility.

use std::collections::HashSet;

use crate::analysis::catalog::SkillTerm;
use crate::analysis::normalizer::TokenSequence;

/// Returns the target skills present in `tokens`, in target order, without duplicates.
pub fn match_skills(tokens: &TokenSequence, targets: &[SkillTerm]) -> Vec<SkillTerm> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let token_set: HashSet<&str> = tokens.as_slice().iter().map(String::as_str).collect();
    let token_text = tokens.joined();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut matched = Vec::new();
    for skill in targets {
        let present = if skill.is_phrase() {
            token_text.contains(skill.as_str())
        } else {
            token_set.contains(skill.as_str())
        };
        if present && seen.insert(skill.as_str()) {
            matched.push(skill.clone());
        }
    }
    matched
}
