//! Suggestion types and ranking

use brandgraph_domain::EntityReference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a suggestion is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    /// Create the next entity in a canonical sequence
    NextAsset,
    /// Add missing relationships
    Relationship,
    /// Run more research
    Research,
    /// Fix consistency problems
    Warning,
    /// Refresh outdated entities
    Maintenance,
    /// Something is ready to be validated
    Opportunity,
}

/// Base urgency of a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    /// Nice to have
    Low,
    /// Worth doing soon
    Medium,
    /// Do next
    High,
    /// Blocks progress
    Critical,
}

impl Priority {
    /// Base ranking weight
    pub fn weight(&self) -> u32 {
        match self {
            Priority::Critical => 100,
            Priority::High => 75,
            Priority::Medium => 50,
            Priority::Low => 25,
        }
    }

    /// Get the priority name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected effect of acting on a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Impact {
    /// Small effect
    Low,
    /// Noticeable effect
    Medium,
    /// Large effect
    High,
}

/// A headline number attached to a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionStat {
    /// What is counted
    pub label: String,
    /// The count
    pub value: usize,
}

impl SuggestionStat {
    /// Create a stat
    pub fn new(label: impl Into<String>, value: usize) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A recommended next step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Stable id, also the dismissal key
    pub id: String,
    /// Category
    pub kind: SuggestionKind,
    /// Base urgency
    pub priority: Priority,
    /// Ranked above everything of the same priority
    #[serde(default)]
    pub urgent: bool,
    /// Headline
    pub title: String,
    /// Explanation
    pub description: String,
    /// Call to action
    pub action: String,
    /// Why it matters
    pub reasoning: String,
    /// Rough effort
    pub estimated_time: String,
    /// Expected effect
    pub estimated_impact: Impact,
    /// Headline number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<SuggestionStat>,
    /// Entities the suggestion is about
    #[serde(default)]
    pub related_entities: Vec<EntityReference>,
    /// Whether a dismissal may hide it
    pub dismissible: bool,
}

impl Suggestion {
    /// Ranking score: priority weight, +50 if urgent, +20 for high impact
    pub fn score(&self) -> u32 {
        let mut score = self.priority.weight();
        if self.urgent {
            score += 50;
        }
        if self.estimated_impact == Impact::High {
            score += 20;
        }
        score
    }
}

/// Stable sort, highest score first
pub fn rank(suggestions: &mut [Suggestion]) {
    suggestions.sort_by_key(|s| std::cmp::Reverse(s.score()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(id: &str, priority: Priority, urgent: bool, impact: Impact) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            kind: SuggestionKind::Research,
            priority,
            urgent,
            title: String::new(),
            description: String::new(),
            action: String::new(),
            reasoning: String::new(),
            estimated_time: String::new(),
            estimated_impact: impact,
            stats: None,
            related_entities: Vec::new(),
            dismissible: true,
        }
    }

    #[test]
    fn test_score_components() {
        assert_eq!(suggestion("a", Priority::Low, false, Impact::Medium).score(), 25);
        assert_eq!(suggestion("b", Priority::High, false, Impact::High).score(), 95);
        assert_eq!(suggestion("c", Priority::Critical, true, Impact::High).score(), 170);
    }

    #[test]
    fn test_rank_is_stable() {
        let mut suggestions = vec![
            suggestion("medium-1", Priority::Medium, false, Impact::Medium),
            suggestion("high", Priority::High, false, Impact::Medium),
            suggestion("medium-2", Priority::Medium, false, Impact::Medium),
            // high impact lifts it above plain mediums, not above high
            suggestion("medium-boosted", Priority::Medium, false, Impact::High),
        ];
        rank(&mut suggestions);
        let ids: Vec<_> = suggestions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "medium-boosted", "medium-1", "medium-2"]);
    }
}
