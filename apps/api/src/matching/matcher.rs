//! Skill Matcher — scores a user's skills against career profiles.
//!
//! Pure and synchronous: every function reads only its arguments, so handlers
//! can call it concurrently against a shared catalog snapshot.
//!
//! Algorithm:
//! 1. match_percentage = round(100 × |user ∩ required| / |required|), half up
//! 2. rank = stable sort descending by match_percentage; equal scores keep
//!    catalog order
//! 3. gap_report = required skills split into possessed / missing, in the
//!    order the career lists them

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::matching::models::{CareerProfile, MatchResult, Skill, SkillGapReport, SkillId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("career '{career_id}' has no required skills")]
    InvalidCatalogEntry { career_id: String },

    #[error("career '{career_id}' requires skill '{skill_id}' which is not in the skill registry")]
    UnknownSkillId { career_id: String, skill_id: SkillId },

    #[error("career catalog is empty")]
    EmptyCatalog,

    #[error("recommendation limit must be at least 1")]
    InvalidLimit,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Integer percentage of `required` skills covered by `matched`, rounded
/// half up. `None` when nothing is required.
pub fn match_percentage(matched: usize, required: usize) -> Option<u8> {
    if required == 0 {
        return None;
    }
    let matched = matched.min(required) as u64;
    let required = required as u64;
    // round(100m / r) == floor((200m + r) / 2r)
    let pct = (200 * matched + required) / (2 * required);
    u8::try_from(pct).ok()
}

/// Scores a single career. Duplicate ids in `required_skills` count once.
pub fn score_career(
    user_skills: &HashSet<SkillId>,
    career: &CareerProfile,
) -> Result<MatchResult, MatchError> {
    let required: HashSet<&SkillId> = career.required_skills.iter().collect();
    let matched = required.iter().filter(|id| user_skills.contains(**id)).count();

    let match_percentage =
        match_percentage(matched, required.len()).ok_or_else(|| MatchError::InvalidCatalogEntry {
            career_id: career.id.clone(),
        })?;

    Ok(MatchResult {
        career_id: career.id.clone(),
        match_percentage,
        matched_skill_count: matched,
        required_skill_count: required.len(),
    })
}

/// Ranks every career in `catalog` and returns the best `limit` of them.
///
/// Every profile is scored before truncation, so an invalid entry anywhere
/// in the catalog fails the call.
pub fn rank(
    user_skills: &HashSet<SkillId>,
    catalog: &[CareerProfile],
    limit: usize,
) -> Result<Vec<MatchResult>, MatchError> {
    if catalog.is_empty() {
        return Err(MatchError::EmptyCatalog);
    }
    if limit == 0 {
        return Err(MatchError::InvalidLimit);
    }

    let mut results = catalog
        .iter()
        .map(|career| score_career(user_skills, career))
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by is stable: ties stay in catalog order
    results.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    results.truncate(limit);

    Ok(results)
}

// ────────────────────────────────────────────────────────────────────────────
// Gap analysis
// ────────────────────────────────────────────────────────────────────────────

/// Splits `career.required_skills` into possessed and missing skills.
///
/// Every required id must resolve through `registry`; a dangling id is a
/// catalog bug and is reported rather than dropped.
pub fn gap_report(
    user_skills: &HashSet<SkillId>,
    career: &CareerProfile,
    registry: &HashMap<SkillId, Skill>,
) -> Result<SkillGapReport, MatchError> {
    if career.required_skills.is_empty() {
        return Err(MatchError::InvalidCatalogEntry {
            career_id: career.id.clone(),
        });
    }

    let mut seen = HashSet::new();
    let mut possessed_skills = Vec::new();
    let mut missing_skills = Vec::new();

    for id in &career.required_skills {
        if !seen.insert(id) {
            continue;
        }
        let skill = registry
            .get(id)
            .ok_or_else(|| MatchError::UnknownSkillId {
                career_id: career.id.clone(),
                skill_id: id.clone(),
            })?
            .clone();

        if user_skills.contains(id) {
            possessed_skills.push(skill);
        } else {
            missing_skills.push(skill);
        }
    }

    Ok(SkillGapReport {
        career_id: career.id.clone(),
        possessed_skills,
        missing_skills,
        suggested_resources: career.resources.clone(),
    })
}

/// Builds a human-readable summary line from a score and the missing skills.
pub fn fit_summary(match_percentage: u8, missing: &[Skill]) -> String {
    let next: Vec<&str> = missing.iter().take(3).map(|s| s.name.as_str()).collect();

    if missing.is_empty() {
        "Ready. You already have every required skill for this career.".to_string()
    } else if match_percentage > 70 {
        format!(
            "Strong fit ({match_percentage}%). Close the gap with: {}.",
            next.join(", ")
        )
    } else if match_percentage > 40 {
        format!(
            "Moderate fit ({match_percentage}%). Good foundation; consider learning: {}.",
            next.join(", ")
        )
    } else {
        format!(
            "Early stage ({match_percentage}%). Start with: {}.",
            next.join(", ")
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
