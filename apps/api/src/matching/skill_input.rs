use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::matching::models::{Skill, SkillId};

/// Skills as sent by the front end: either the raw text of a form field
/// ("Python, SQL , machine learning") or an already-split list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillInput {
    Text(String),
    List(Vec<String>),
}

impl Default for SkillInput {
    fn default() -> Self {
        SkillInput::List(Vec::new())
    }
}

impl SkillInput {
    /// Trimmed, non-empty entries in input order, without duplicates
    /// (compared case-insensitively).
    pub fn entries(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            SkillInput::Text(text) => text.split(',').collect(),
            SkillInput::List(items) => items.iter().map(String::as_str).collect(),
        };

        let mut seen = HashSet::new();
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

/// User skills mapped onto registry ids.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSkills {
    pub ids: HashSet<SkillId>,
    /// Entries that matched no id, name or alias. They stay in `ids` under
    /// their normalized text and never match a required skill.
    pub unrecognized: Vec<String>,
}

/// Case-insensitive lookup from id, display name and aliases to the skill id.
#[derive(Debug, Clone, Default)]
pub struct SkillResolver {
    lookup: HashMap<String, SkillId>,
}

impl SkillResolver {
    pub fn new<'a>(skills: impl IntoIterator<Item = &'a Skill>) -> Self {
        let mut lookup = HashMap::new();
        for skill in skills {
            lookup.insert(skill.id.as_str().to_string(), skill.id.clone());
            for name in std::iter::once(&skill.name).chain(&skill.aliases) {
                // ids win over names and aliases that collide with them
                lookup
                    .entry(name.trim().to_lowercase())
                    .or_insert_with(|| skill.id.clone());
            }
        }
        Self { lookup }
    }

    pub fn resolve(&self, input: &SkillInput) -> ResolvedSkills {
        let mut resolved = ResolvedSkills::default();
        for entry in input.entries() {
            match self.lookup.get(&entry.to_lowercase()) {
                Some(id) => {
                    resolved.ids.insert(id.clone());
                }
                None => {
                    resolved.ids.insert(SkillId::new(&entry));
                    resolved.unrecognized.push(entry);
                }
            }
        }
        resolved
    }
}
