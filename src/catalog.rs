//! Static catalog of coordination patterns
//!
//! Each pattern is a named coordination strategy carrying the keyword set used
//! for classification, the fraction of the budget delegation is expected to
//! save, and the range of workers it fans out to. The catalog is declarative
//! data: adding a pattern means adding a table entry, not new control flow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordination patterns, in declared priority order.
///
/// Classification ties are broken by this order: the first maximal-scoring
/// pattern wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Break a complex task into specialized sub-tasks
    Decompose,
    /// Relay a simple notification or status with minimal overhead
    Broadcast,
    /// Fan out focused research across a few scouts
    Explore,
    /// Isolate and repair a reported defect
    Diagnose,
    /// Collect independent perspectives and build consensus
    Converge,
    /// Split embarrassingly parallel work across many workers
    Fanout,
}

impl PatternKind {
    /// All patterns, in declared priority order
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Decompose,
        PatternKind::Broadcast,
        PatternKind::Explore,
        PatternKind::Diagnose,
        PatternKind::Converge,
        PatternKind::Fanout,
    ];

    /// Stable string name for the pattern
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Decompose => "decompose",
            PatternKind::Broadcast => "broadcast",
            PatternKind::Explore => "explore",
            PatternKind::Diagnose => "diagnose",
            PatternKind::Converge => "converge",
            PatternKind::Fanout => "fanout",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fallback when no keyword matches: the simplest, cheapest strategy.
pub const DEFAULT_PATTERN: PatternKind = PatternKind::Broadcast;

/// One entry of the pattern catalog
#[derive(Debug, Clone)]
pub struct PatternSpec {
    /// Which pattern this entry describes
    pub kind: PatternKind,
    /// Keywords that vote for this pattern during classification
    pub keywords: &'static [&'static str],
    /// Fraction of the budget delegation is expected to save, in `(0, 1)`
    pub efficiency_ratio: f64,
    /// Minimum workers this pattern fans out to (at least 1)
    pub min_workers: u32,
    /// Maximum workers this pattern fans out to
    pub max_workers: u32,
    /// Sub-task assignment templates, cycled across workers
    pub assignments: &'static [&'static str],
}

impl PatternSpec {
    /// Sub-task assignment for the worker at `index`.
    ///
    /// Templates containing `{}` are filled with the mission description;
    /// template lists shorter than the workforce are cycled.
    pub fn assignment(&self, description: &str, index: u32) -> String {
        let template = self.assignments[index as usize % self.assignments.len()];
        if template.contains("{}") {
            template.replacen("{}", description, 1)
        } else {
            template.to_string()
        }
    }
}

static CATALOG: [PatternSpec; 6] = [
    PatternSpec {
        kind: PatternKind::Decompose,
        keywords: &[
            "complex",
            "decompose",
            "analyze",
            "multi-step",
            "elaborate",
            "comprehensive",
            "detailed",
            "break down",
            "architect",
        ],
        efficiency_ratio: 0.70,
        min_workers: 3,
        max_workers: 8,
        assignments: &[
            "Analyze requirements for: {}",
            "Design the solution structure",
            "Implement the core changes",
            "Write tests and documentation",
        ],
    },
    PatternSpec {
        kind: PatternKind::Broadcast,
        keywords: &[
            "simple",
            "notify",
            "alert",
            "inform",
            "quick",
            "brief",
            "announcement",
            "update",
            "status",
        ],
        efficiency_ratio: 0.10,
        min_workers: 1,
        max_workers: 2,
        assignments: &["Carry out: {}"],
    },
    PatternSpec {
        kind: PatternKind::Explore,
        keywords: &[
            "research",
            "explore",
            "find",
            "discover",
            "investigate",
            "search",
            "locate",
            "identify",
            "survey",
        ],
        efficiency_ratio: 0.50,
        min_workers: 2,
        max_workers: 5,
        assignments: &[
            "Survey existing approaches to: {}",
            "Identify relevant practices and trade-offs",
            "Compile a findings report",
        ],
    },
    PatternSpec {
        kind: PatternKind::Diagnose,
        keywords: &[
            "error",
            "issue",
            "problem",
            "fix",
            "debug",
            "troubleshoot",
            "resolve",
            "broken",
            "failed",
        ],
        efficiency_ratio: 0.30,
        min_workers: 2,
        max_workers: 4,
        assignments: &[
            "Identify the root cause of: {}",
            "Develop a fix or workaround",
            "Validate the fix against the original report",
        ],
    },
    PatternSpec {
        kind: PatternKind::Converge,
        keywords: &[
            "consensus",
            "agree",
            "decide",
            "vote",
            "collaborate",
            "merge",
            "combine",
            "unify",
            "coordinate",
        ],
        efficiency_ratio: 0.60,
        min_workers: 3,
        max_workers: 6,
        assignments: &[
            "Gather perspectives on: {}",
            "Synthesize the collected viewpoints",
            "Draft a consensus recommendation",
        ],
    },
    PatternSpec {
        kind: PatternKind::Fanout,
        keywords: &[
            "parallel",
            "distribute",
            "split",
            "concurrent",
            "multiple",
            "simultaneous",
            "spread",
            "divide",
            "batch",
        ],
        efficiency_ratio: 0.75,
        min_workers: 4,
        max_workers: 10,
        assignments: &["Process one partition of: {}"],
    },
];

/// The full pattern catalog, in declared priority order
pub fn catalog() -> &'static [PatternSpec] {
    &CATALOG
}

/// Look up the catalog entry for a pattern
pub fn spec_for(kind: PatternKind) -> &'static PatternSpec {
    CATALOG
        .iter()
        .find(|spec| spec.kind == kind)
        .expect("every PatternKind has a catalog entry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_kind_in_order() {
        let kinds: Vec<PatternKind> = catalog().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, PatternKind::ALL.to_vec());
    }

    #[test]
    fn test_catalog_invariants() {
        for spec in catalog() {
            assert!(spec.min_workers >= 1, "{}: min must be at least 1", spec.kind);
            assert!(
                spec.max_workers >= spec.min_workers,
                "{}: max must be at least min",
                spec.kind
            );
            assert!(
                spec.efficiency_ratio > 0.0 && spec.efficiency_ratio < 1.0,
                "{}: ratio must be in (0, 1)",
                spec.kind
            );
            assert!(!spec.keywords.is_empty());
            assert!(!spec.assignments.is_empty());
        }
    }

    #[test]
    fn test_default_pattern_is_cheapest() {
        let default = spec_for(DEFAULT_PATTERN);
        for spec in catalog() {
            assert!(default.efficiency_ratio <= spec.efficiency_ratio);
            assert!(default.min_workers <= spec.min_workers);
        }
    }

    #[test]
    fn test_assignment_fills_description_and_cycles() {
        let spec = spec_for(PatternKind::Decompose);
        assert_eq!(
            spec.assignment("ship the release", 0),
            "Analyze requirements for: ship the release"
        );
        // Index past the template list wraps around
        assert_eq!(spec.assignment("ship the release", 5), spec.assignment("ship the release", 1));
    }
}
