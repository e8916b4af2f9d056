//! Corrective action generation and ranking.
//!
//! Actions come from two passes:
//! - Generic: one per factor scoring HIGH or worse, using the category's remediation phrase
//! - Rules: domain-specific triggers on the raw summaries, independent of the score
//!
//! Both passes are concatenated and stably sorted by priority. A category may
//! appear in both passes.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::data::DomainSummaries;

use super::level::{RiskCategory, RiskFactor, CRITICAL_THRESHOLD, HIGH_THRESHOLD};

/// Share of expected funding that may be outstanding before a follow-up is raised.
const OUTSTANDING_FUNDING_RATIO: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Action priority. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionPriority {
    Urgent,
    High,
    Medium,
    Low,
}

impl ActionPriority {
    /// Sort rank, lower first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "URGENT",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for ActionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected impact of carrying out an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionImpact {
    Critical,
    High,
    Medium,
    Low,
}

impl ActionImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// A recommended remediation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectiveAction {
    pub priority: ActionPriority,
    pub category: RiskCategory,
    pub description: String,
    pub impact: ActionImpact,
}

impl CorrectiveAction {
    pub fn new(
        priority: ActionPriority,
        category: RiskCategory,
        description: impl Into<String>,
        impact: ActionImpact,
    ) -> Self {
        Self {
            priority,
            category,
            description: description.into(),
            impact,
        }
    }
}

/// Derives and ranks corrective actions.
#[derive(Debug, Clone, Default)]
pub struct ActionPrioritizer;

impl ActionPrioritizer {
    pub fn new() -> Self {
        Self
    }

    /// Generate the ranked action list for a program.
    pub fn prioritize(
        &self,
        factors: &[RiskFactor],
        summaries: &DomainSummaries,
    ) -> Vec<CorrectiveAction> {
        let mut actions = self.generic_actions(factors);
        actions.extend(self.rule_actions(summaries));
        Self::rank(actions)
    }

    /// One action per factor scoring at or above the high threshold.
    pub fn generic_actions(&self, factors: &[RiskFactor]) -> Vec<CorrectiveAction> {
        let mut ordered: Vec<&RiskFactor> = factors.iter().collect();
        ordered.sort_by_key(|f| f.category);

        ordered
            .into_iter()
            .filter(|f| f.score >= HIGH_THRESHOLD)
            .map(|f| {
                let (priority, impact) = if f.score >= CRITICAL_THRESHOLD {
                    (ActionPriority::Urgent, ActionImpact::Critical)
                } else {
                    (ActionPriority::High, ActionImpact::High)
                };
                CorrectiveAction::new(priority, f.category, f.category.remediation(), impact)
            })
            .collect()
    }

    /// Domain-specific triggers evaluated on the raw summaries.
    pub fn rule_actions(&self, summaries: &DomainSummaries) -> Vec<CorrectiveAction> {
        let mut actions = Vec::new();

        if let Some(budget) = &summaries.budget {
            if budget.is_overdrawn() {
                actions.push(CorrectiveAction::new(
                    ActionPriority::Urgent,
                    RiskCategory::Budget,
                    "stop new spending immediately",
                    ActionImpact::Critical,
                ));
            }
        }

        if let Some(schedule) = &summaries.schedule {
            let overdue = schedule.overdue();
            if overdue > 0 {
                actions.push(CorrectiveAction::new(
                    ActionPriority::High,
                    RiskCategory::Schedule,
                    format!("review {} overdue milestone(s)", overdue),
                    ActionImpact::High,
                ));
            }
        }

        if let Some(funding) = &summaries.funding {
            if funding.outstanding() > funding.expected() * OUTSTANDING_FUNDING_RATIO {
                actions.push(CorrectiveAction::new(
                    ActionPriority::High,
                    RiskCategory::Funding,
                    "follow up on outstanding funding amount",
                    ActionImpact::High,
                ));
            }
        }

        actions
    }

    /// Stable sort by priority; equal priorities keep their input order.
    pub fn rank(mut actions: Vec<CorrectiveAction>) -> Vec<CorrectiveAction> {
        actions.sort_by_key(|a| a.priority.rank());
        actions
    }
}
