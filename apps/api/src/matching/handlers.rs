//! Axum route handlers for the careers, skills and catalog APIs.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::matching::matcher::{fit_summary, gap_report, rank, score_career, MatchError};
use crate::matching::models::{CareerProfile, LearningResource, MatchResult, Skill, SkillGapReport};
use crate::matching::skill_input::SkillInput;
use crate::matching::trends::{market_trends, MarketTrends};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub skills: SkillInput,
    pub limit: Option<usize>,
    #[serde(default)]
    pub include_gaps: bool,
}

#[derive(Debug, Serialize)]
pub struct RankedCareer {
    #[serde(flatten)]
    pub result: MatchResult,
    pub title: String,
    pub salary_range: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RankedCareer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gap_reports: Vec<GapResponse>,
    /// Careers whose gap report could not be built from the catalog.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded_careers: Vec<String>,
    pub unrecognized_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    #[serde(default)]
    pub skills: SkillInput,
}

#[derive(Debug, Serialize)]
pub struct GapResponse {
    #[serde(flatten)]
    pub report: SkillGapReport,
    pub match_percentage: u8,
    pub summary: String,
}

/// Single-career gap body. When the career references a skill the registry
/// lacks, `degraded` is set and only the score is returned.
#[derive(Debug, Serialize)]
pub struct SkillGapResponse {
    pub career_id: String,
    pub match_percentage: u8,
    #[serde(flatten)]
    pub gap: Option<GapDetail>,
    pub degraded: bool,
    pub unrecognized_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GapDetail {
    pub possessed_skills: Vec<Skill>,
    pub missing_skills: Vec<Skill>,
    pub suggested_resources: Vec<LearningResource>,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CareerSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub salary_range: String,
    pub required_skill_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CatalogInfo {
    pub source: String,
    pub careers: usize,
    pub skills: usize,
    pub loaded_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<Vec<Skill>> {
    Json(state.catalog.snapshot().skills().to_vec())
}

/// GET /api/v1/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<Vec<CareerSummary>> {
    let catalog = state.catalog.snapshot();
    let summaries = catalog
        .careers()
        .iter()
        .map(|c| CareerSummary {
            id: c.id.clone(),
            title: c.title.clone(),
            description: c.description.clone(),
            salary_range: c.salary_range.clone(),
            required_skill_count: c.required_skills.len(),
        })
        .collect();
    Json(summaries)
}

/// GET /api/v1/careers/:id
///
/// Full profile, including the learning path and related careers.
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(career_id): Path<String>,
) -> Result<Json<CareerProfile>, AppError> {
    let catalog = state.catalog.snapshot();
    let career = find_career(&catalog, &career_id)?;
    Ok(Json(career.clone()))
}

/// POST /api/v1/careers/recommendations
///
/// Ranks the catalog against the user's skills. With `include_gaps`, each
/// ranked career also gets a gap report; careers whose report fails on a
/// catalog bug are listed in `degraded_careers` instead of failing the call.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    if request.limit == Some(0) {
        return Err(MatchError::InvalidLimit.into());
    }
    let limit = state.config.effective_limit(request.limit);

    let catalog = state.catalog.snapshot();
    let resolved = catalog.resolver().resolve(&request.skills);
    debug!(
        skills = resolved.ids.len(),
        unrecognized = resolved.unrecognized.len(),
        limit,
        "Ranking careers"
    );

    let ranked = rank(&resolved.ids, catalog.careers(), limit)?;

    let mut gap_reports = Vec::new();
    let mut degraded_careers = Vec::new();
    if request.include_gaps {
        for result in &ranked {
            let Some(career) = catalog.career(&result.career_id) else {
                continue;
            };
            match gap_report(&resolved.ids, career, catalog.registry()) {
                Ok(report) => gap_reports.push(gap_response(report, result.match_percentage)),
                Err(e @ MatchError::UnknownSkillId { .. }) => {
                    warn!(career_id = %career.id, "Skipping gap report: {e}");
                    degraded_careers.push(career.id.clone());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    let recommendations = ranked
        .into_iter()
        .map(|result| {
            let (title, salary_range) = catalog
                .career(&result.career_id)
                .map(|c| (c.title.clone(), c.salary_range.clone()))
                .unwrap_or_default();
            RankedCareer {
                result,
                title,
                salary_range,
            }
        })
        .collect();

    Ok(Json(RecommendationResponse {
        recommendations,
        gap_reports,
        degraded_careers,
        unrecognized_skills: resolved.unrecognized,
    }))
}

/// POST /api/v1/careers/:id/skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Path(career_id): Path<String>,
    Json(request): Json<SkillGapRequest>,
) -> Result<Json<SkillGapResponse>, AppError> {
    let catalog = state.catalog.snapshot();
    let career = find_career(&catalog, &career_id)?;
    let resolved = catalog.resolver().resolve(&request.skills);

    let score = score_career(&resolved.ids, career)?;
    let gap = match gap_report(&resolved.ids, career, catalog.registry()) {
        Ok(report) => Some(GapDetail {
            summary: fit_summary(score.match_percentage, &report.missing_skills),
            possessed_skills: report.possessed_skills,
            missing_skills: report.missing_skills,
            suggested_resources: report.suggested_resources,
        }),
        Err(e @ MatchError::UnknownSkillId { .. }) => {
            warn!(career_id = %career.id, "Returning score without gap report: {e}");
            None
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(SkillGapResponse {
        career_id: career.id.clone(),
        match_percentage: score.match_percentage,
        degraded: gap.is_none(),
        gap,
        unrecognized_skills: resolved.unrecognized,
    }))
}

/// GET /api/v1/careers/trends
///
/// Fastest growing careers and the most requested skills in the catalog.
pub async fn handle_trends(
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<MarketTrends>, AppError> {
    if query.limit == Some(0) {
        return Err(MatchError::InvalidLimit.into());
    }
    let top = state.config.effective_limit(query.limit);
    let catalog = state.catalog.snapshot();
    Ok(Json(market_trends(catalog.careers(), catalog.registry(), top)))
}

/// POST /api/v1/catalog/reload
///
/// Re-reads the configured catalog source and publishes it. A rejected
/// catalog leaves the current one serving.
pub async fn handle_reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<CatalogInfo>, AppError> {
    let catalog = state.catalog.reload(state.catalog_source.as_ref()).await?;
    info!(
        careers = catalog.careers().len(),
        "Catalog reloaded via API"
    );
    Ok(Json(catalog_info(&catalog, state.catalog_source.describe())))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn find_career<'a>(catalog: &'a Catalog, career_id: &str) -> Result<&'a CareerProfile, AppError> {
    catalog
        .career(career_id)
        .ok_or_else(|| AppError::NotFound(format!("Career '{career_id}' not found")))
}

fn gap_response(report: SkillGapReport, match_percentage: u8) -> GapResponse {
    let summary = fit_summary(match_percentage, &report.missing_skills);
    GapResponse {
        report,
        match_percentage,
        summary,
    }
}

fn catalog_info(catalog: &Catalog, source: String) -> CatalogInfo {
    CatalogInfo {
        source,
        careers: catalog.careers().len(),
        skills: catalog.skills().len(),
        loaded_at: catalog.loaded_at(),
    }
}
