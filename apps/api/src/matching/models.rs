use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Catalog entries
// ────────────────────────────────────────────────────────────────────────────

/// Stable skill key. Always trimmed and lower-cased, so `"Python "` and
/// `"python"` address the same skill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SkillId(String);

impl SkillId {
    pub fn new(raw: &str) -> Self {
        SkillId(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SkillId {
    fn from(raw: String) -> Self {
        SkillId::new(&raw)
    }
}

impl From<&str> for SkillId {
    fn from(raw: &str) -> Self {
        SkillId::new(raw)
    }
}

impl From<SkillId> for String {
    fn from(id: SkillId) -> Self {
        id.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    /// Alternate spellings accepted from free-text input ("ML", "k8s").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Mixed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerProfile {
    pub id: String,
    pub title: String,
    pub description: String,
    pub salary_range: String,
    pub required_skills: Vec<SkillId>,
    #[serde(default)]
    pub resources: Vec<LearningResource>,
    /// Ordered roadmap steps, first step first.
    #[serde(default)]
    pub learning_path: Vec<String>,
    #[serde(default)]
    pub related_careers: Vec<String>,
    /// Background expected before starting the learning path.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Free text, e.g. "6-12 months".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_completion: Option<String>,
    /// Yearly demand growth in percent, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// Derived results (recomputed per request, never stored)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub career_id: String,
    pub match_percentage: u8, // 0 – 100
    pub matched_skill_count: usize,
    pub required_skill_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub career_id: String,
    pub possessed_skills: Vec<Skill>,
    pub missing_skills: Vec<Skill>,
    pub suggested_resources: Vec<LearningResource>,
}
