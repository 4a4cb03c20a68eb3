use crate::config::{MAX_SCORE, NEUTRAL_COHESION, Thresholds};
use crate::model::{GroupCohesion, Module};
use std::collections::{BTreeMap, HashSet};

/// Cohesion of each directory holding two or more modules.
///
/// Two modules in the same directory are related when one depends on the
/// other or they share at least one dependency. A group's score is the share
/// of its module pairs that are related.
pub fn group_cohesion(modules: &[Module]) -> Vec<GroupCohesion> {
    let mut groups: BTreeMap<&str, Vec<&Module>> = BTreeMap::new();
    for module in modules {
        groups.entry(module.directory()).or_default().push(module);
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(directory, members)| {
            let deps: Vec<HashSet<&str>> = members
                .iter()
                .map(|m| m.dependencies.iter().map(String::as_str).collect())
                .collect();

            let mut related_pairs = 0;
            let mut possible_pairs = 0;
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    possible_pairs += 1;
                    let direct = deps[i].contains(members[j].path.as_str())
                        || deps[j].contains(members[i].path.as_str());
                    if direct || !deps[i].is_disjoint(&deps[j]) {
                        related_pairs += 1;
                    }
                }
            }

            GroupCohesion {
                directory: directory.to_string(),
                modules: members.len(),
                related_pairs,
                possible_pairs,
                cohesion_score: related_pairs as f64 / possible_pairs as f64 * MAX_SCORE,
            }
        })
        .collect()
}

/// Pair-weighted mean of group cohesion, or `NEUTRAL_COHESION` when there is
/// no pair of modules to compare.
pub fn project_cohesion(groups: &[GroupCohesion]) -> f64 {
    let possible: usize = groups.iter().map(|g| g.possible_pairs).sum();
    if possible == 0 {
        return NEUTRAL_COHESION;
    }
    let related: usize = groups.iter().map(|g| g.related_pairs).sum();
    related as f64 / possible as f64 * MAX_SCORE
}

pub fn is_low_cohesion(score: f64, thresholds: &Thresholds) -> bool {
    score < thresholds.low_cohesion
}
