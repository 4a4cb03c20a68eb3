use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleSeverity {
    Normal,
    High,
}

impl fmt::Display for CycleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleSeverity::Normal => write!(f, "normal"),
            CycleSeverity::High => write!(f, "high"),
        }
    }
}

/// A closed dependency path `[m0, m1, ..., m0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub modules: Vec<String>,
    /// Number of distinct modules in the cycle.
    pub length: usize,
    pub severity: CycleSeverity,
}

impl Cycle {
    /// Build a cycle from its open member list (`[m0, m1, ...]` without the
    /// closing repeat), rotating it to start at the smallest path.
    pub fn from_members(mut members: Vec<String>, long_cycle: usize) -> Self {
        if let Some(start) = members
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.cmp(b.1))
            .map(|(i, _)| i)
        {
            members.rotate_left(start);
        }

        let length = members.len();
        if let Some(first) = members.first().cloned() {
            members.push(first);
        }

        let severity = if length > long_cycle {
            CycleSeverity::High
        } else {
            CycleSeverity::Normal
        };

        Self {
            modules: members,
            length,
            severity,
        }
    }

    /// Distinct members, without the closing repeat.
    pub fn members(&self) -> &[String] {
        &self.modules[..self.length]
    }

    pub fn contains(&self, path: &str) -> bool {
        self.members().iter().any(|m| m == path)
    }

    pub fn display_chain(&self) -> String {
        self.modules.join(" → ")
    }
}

/// Cycles found in one graph, plus whether a search cap cut detection short.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycles: Vec<Cycle>,
    pub incomplete: bool,
}

impl CycleReport {
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }
}
