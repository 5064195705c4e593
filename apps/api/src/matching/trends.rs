//! Market trends derived from the catalog: the fastest growing careers and
//! the skills most careers ask for.
//!
//! Both lists are recomputed from the current snapshot on every call; ties
//! keep catalog order so repeated calls return identical bodies.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::matching::matcher::match_percentage;
use crate::matching::models::{CareerProfile, Skill, SkillId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowingCareer {
    pub career_id: String,
    pub title: String,
    pub growth_rate: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillDemand {
    pub skill_id: SkillId,
    pub name: String,
    /// Number of careers listing the skill as required.
    pub career_count: usize,
    /// `career_count` as a rounded share of the whole catalog.
    pub demand_percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketTrends {
    pub top_growing_careers: Vec<GrowingCareer>,
    pub high_demand_skills: Vec<SkillDemand>,
}

/// Builds both trend lists, each truncated to `top` entries.
///
/// Careers without a `growth_rate` are left out of the growth list. Skill
/// demand counts each career once per skill; a skill missing from the
/// registry is still counted and falls back to its id for a name.
pub fn market_trends(
    careers: &[CareerProfile],
    registry: &HashMap<SkillId, Skill>,
    top: usize,
) -> MarketTrends {
    let mut growing: Vec<GrowingCareer> = careers
        .iter()
        .filter_map(|career| {
            career.growth_rate.map(|growth_rate| GrowingCareer {
                career_id: career.id.clone(),
                title: career.title.clone(),
                growth_rate,
            })
        })
        .collect();
    // stable: equal growth keeps catalog order
    growing.sort_by(|a, b| b.growth_rate.cmp(&a.growth_rate));
    growing.truncate(top);

    // first-seen order doubles as the tie-break
    let mut order: Vec<SkillId> = Vec::new();
    let mut counts: HashMap<SkillId, usize> = HashMap::new();
    for career in careers {
        let mut seen = HashSet::new();
        for id in career.required_skills.iter().filter(|id| seen.insert(*id)) {
            let count = counts.entry(id.clone()).or_insert_with(|| {
                order.push(id.clone());
                0
            });
            *count += 1;
        }
    }

    let mut demand: Vec<SkillDemand> = order
        .into_iter()
        .map(|id| {
            let career_count = counts.get(&id).copied().unwrap_or(0);
            let name = registry
                .get(&id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| id.to_string());
            SkillDemand {
                demand_percentage: match_percentage(career_count, careers.len()).unwrap_or(0),
                skill_id: id,
                name,
                career_count,
            }
        })
        .collect();
    demand.sort_by(|a, b| b.career_count.cmp(&a.career_count));
    demand.truncate(top);

    MarketTrends {
        top_growing_careers: growing,
        high_demand_skills: demand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn career(id: &str, growth_rate: Option<u8>, required: &[&str]) -> CareerProfile {
        CareerProfile {
            id: id.to_string(),
            title: id.to_uppercase(),
            required_skills: required.iter().map(|s| SkillId::new(s)).collect(),
            growth_rate,
            ..Default::default()
        }
    }

    fn registry(ids: &[&str]) -> HashMap<SkillId, Skill> {
        ids.iter()
            .map(|id| {
                let skill = Skill {
                    id: SkillId::new(id),
                    name: format!("Skill {id}"),
                    aliases: vec![],
                };
                (skill.id.clone(), skill)
            })
            .collect()
    }

    #[test]
    fn test_growing_careers_sorted_with_catalog_tie_break() {
        let careers = vec![
            career("a", Some(28), &["x"]),
            career("b", Some(40), &["x"]),
            career("c", None, &["x"]),
            career("d", Some(28), &["x"]),
        ];
        let trends = market_trends(&careers, &registry(&["x"]), 10);
        let ids: Vec<_> = trends
            .top_growing_careers
            .iter()
            .map(|g| g.career_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "d"]);
        assert_eq!(trends.top_growing_careers[0].title, "B");
    }

    #[test]
    fn test_skill_demand_counts_careers() {
        let careers = vec![
            career("a", None, &["sql", "python"]),
            career("b", None, &["python", "ml"]),
            career("c", None, &["python", "sql", "python"]),
        ];
        let trends = market_trends(&careers, &registry(&["sql", "python", "ml"]), 10);

        let demand: Vec<_> = trends
            .high_demand_skills
            .iter()
            .map(|d| (d.skill_id.as_str(), d.career_count, d.demand_percentage))
            .collect();
        assert_eq!(
            demand,
            vec![("python", 3, 100), ("sql", 2, 67), ("ml", 1, 33)]
        );
        assert_eq!(trends.high_demand_skills[0].name, "Skill python");
    }

    #[test]
    fn test_top_truncates_both_lists() {
        let careers = vec![
            career("a", Some(10), &["x", "y"]),
            career("b", Some(20), &["y", "z"]),
        ];
        let trends = market_trends(&careers, &registry(&["x", "y", "z"]), 1);
        assert_eq!(trends.top_growing_careers.len(), 1);
        assert_eq!(trends.top_growing_careers[0].career_id, "b");
        assert_eq!(trends.high_demand_skills.len(), 1);
        assert_eq!(trends.high_demand_skills[0].skill_id.as_str(), "y");
    }

    #[test]
    fn test_unregistered_skill_uses_id_as_name() {
        let careers = vec![career("a", None, &["quantum"])];
        let trends = market_trends(&careers, &HashMap::new(), 5);
        assert_eq!(trends.high_demand_skills[0].name, "quantum");
    }

    #[test]
    fn test_empty_catalog_yields_empty_trends() {
        let trends = market_trends(&[], &HashMap::new(), 5);
        assert!(trends.top_growing_careers.is_empty());
        assert!(trends.high_demand_skills.is_empty());
    }
}
