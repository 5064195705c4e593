// Career catalog: validated, immutable snapshot of careers and skills.
// Loaded once at startup through a CatalogSource and republished whole on reload.

pub mod source;
pub mod store;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::matching::matcher::{gap_report, MatchError};
use crate::matching::models::{CareerProfile, Skill, SkillId};
use crate::matching::skill_input::SkillResolver;

pub use source::{BuiltinCatalogSource, CatalogSource, FileCatalogSource};
pub use store::CatalogStore;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog from {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {kind} id '{id}' in catalog")]
    Duplicate { kind: &'static str, id: String },

    #[error("skill '{0}' has a blank id")]
    BlankSkillId(String),

    #[error("invalid catalog: {0}")]
    Integrity(#[from] MatchError),
}

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub skills: Vec<Skill>,
    pub careers: Vec<CareerProfile>,
}

/// A career whose required skills do not all resolve in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyIssue {
    pub career_id: String,
    pub skill_id: SkillId,
}

#[derive(Debug)]
pub struct Catalog {
    careers: Vec<CareerProfile>,
    index: HashMap<String, usize>,
    skills: Vec<Skill>,
    registry: HashMap<SkillId, Skill>,
    resolver: SkillResolver,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Validates a document and builds a catalog. Any invalid career aborts
    /// the whole load.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        if doc.careers.is_empty() {
            return Err(MatchError::EmptyCatalog.into());
        }

        let mut registry = HashMap::with_capacity(doc.skills.len());
        for skill in &doc.skills {
            if skill.id.is_empty() {
                return Err(CatalogError::BlankSkillId(skill.name.clone()));
            }
            if registry.insert(skill.id.clone(), skill.clone()).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: "skill",
                    id: skill.id.to_string(),
                });
            }
        }

        let mut careers = Vec::with_capacity(doc.careers.len());
        let mut index = HashMap::with_capacity(doc.careers.len());
        for mut career in doc.careers {
            career.id = career.id.trim().to_string();
            dedup_in_order(&mut career.required_skills);

            if career.required_skills.is_empty() {
                return Err(MatchError::InvalidCatalogEntry {
                    career_id: career.id,
                }
                .into());
            }
            if index.insert(career.id.clone(), careers.len()).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: "career",
                    id: career.id,
                });
            }
            careers.push(career);
        }

        let resolver = SkillResolver::new(&doc.skills);

        Ok(Catalog {
            careers,
            index,
            skills: doc.skills,
            registry,
            resolver,
            loaded_at: Utc::now(),
        })
    }

    pub fn careers(&self) -> &[CareerProfile] {
        &self.careers
    }

    pub fn career(&self, id: &str) -> Option<&CareerProfile> {
        self.index.get(id).and_then(|&i| self.careers.get(i))
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn registry(&self) -> &HashMap<SkillId, Skill> {
        &self.registry
    }

    pub fn resolver(&self) -> &SkillResolver {
        &self.resolver
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Careers whose gap reports would fail because a required skill is
    /// missing from the registry. These careers still rank; only gap
    /// reporting for them is degraded.
    pub fn consistency_issues(&self) -> Vec<ConsistencyIssue> {
        let nobody = HashSet::new();
        self.careers
            .iter()
            .filter_map(|career| match gap_report(&nobody, career, &self.registry) {
                Err(MatchError::UnknownSkillId {
                    career_id,
                    skill_id,
                }) => Some(ConsistencyIssue {
                    career_id,
                    skill_id,
                }),
                _ => None,
            })
            .collect()
    }

    /// Related-career links that point at careers not in the catalog.
    pub fn dangling_related_careers(&self) -> Vec<(String, String)> {
        self.careers
            .iter()
            .flat_map(|career| {
                career
                    .related_careers
                    .iter()
                    .filter(|related| !self.index.contains_key(related.as_str()))
                    .map(|related| (career.id.clone(), related.clone()))
            })
            .collect()
    }

    /// Logs non-fatal problems found in a freshly loaded catalog.
    pub fn log_warnings(&self) {
        for issue in self.consistency_issues() {
            warn!(
                career_id = %issue.career_id,
                skill_id = %issue.skill_id,
                "Career requires a skill missing from the registry; gap reports for it will be skipped"
            );
        }
        for (career_id, related) in self.dangling_related_careers() {
            warn!(%career_id, %related, "Related career not found in catalog");
        }
    }
}

fn dedup_in_order(ids: &mut Vec<SkillId>) {
    let mut seen = HashSet::new();
    ids.retain(|id| !id.is_empty() && seen.insert(id.clone()));
}
