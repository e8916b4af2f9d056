//! Risk assessment engine.
//!
//! Runs the pipeline for one program:
//! 1. Evaluate each available domain into a risk factor
//! 2. Aggregate factors into an overall score and level
//! 3. Derive and rank corrective actions
//!
//! The engine is synchronous, performs no I/O and holds no mutable state,
//! so one instance can be shared across threads.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{
    BudgetSummary, ComplianceSummary, DomainSummaries, FundingSummary, IndicatorSummary,
    ProgramSummaries, ScheduleSummary,
};

use super::actions::{ActionPrioritizer, ActionPriority, CorrectiveAction};
use super::aggregator::{CategoryWeights, RiskAggregator};
use super::evaluators::evaluate_all;
use super::level::{RiskCategory, RiskFactor, RiskLevel};

/// Complete assessment of a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_score: f64,
    pub overall_level: RiskLevel,
    pub factors: Vec<RiskFactor>,
    pub actions: Vec<CorrectiveAction>,
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self {
            overall_score: 0.0,
            overall_level: RiskLevel::Low,
            factors: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl RiskAssessment {
    /// Whether any domain contributed.
    ///
    /// An assessment without factors means insufficient data, not "no risk",
    /// even though both score 0.
    pub fn has_data(&self) -> bool {
        !self.factors.is_empty()
    }

    pub fn factor(&self, category: RiskCategory) -> Option<&RiskFactor> {
        self.factors.iter().find(|f| f.category == category)
    }

    pub fn actions_for(&self, category: RiskCategory) -> impl Iterator<Item = &CorrectiveAction> {
        self.actions.iter().filter(move |a| a.category == category)
    }

    pub fn urgent_actions(&self) -> impl Iterator<Item = &CorrectiveAction> {
        self.actions
            .iter()
            .filter(|a| a.priority == ActionPriority::Urgent)
    }

    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        if !self.has_data() {
            return "Insufficient data: no domain summaries available".to_string();
        }
        format!(
            "{} risk (score {:.0}) from {} domain(s), {} action(s) ({} urgent)",
            self.overall_level,
            self.overall_score,
            self.factors.len(),
            self.actions.len(),
            self.urgent_actions().count()
        )
    }
}

/// Assessment tagged with its program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramAssessment {
    pub program_id: String,
    pub assessment: RiskAssessment,
}

/// Reusable engine: evaluators, aggregator and prioritizer.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    aggregator: RiskAggregator,
    prioritizer: ActionPrioritizer,
}

impl RiskEngine {
    /// Create an engine with custom aggregation weights.
    pub fn new(weights: CategoryWeights) -> Self {
        Self {
            aggregator: RiskAggregator::new(weights),
            prioritizer: ActionPrioritizer::new(),
        }
    }

    pub fn weights(&self) -> &CategoryWeights {
        self.aggregator.weights()
    }

    /// Assess one program from whatever summaries are available.
    pub fn assess(&self, summaries: &DomainSummaries) -> RiskAssessment {
        let factors = evaluate_all(summaries);
        let aggregated = self.aggregator.aggregate(&factors);
        let actions = self.prioritizer.prioritize(&factors, summaries);

        debug!(
            domains = factors.len(),
            score = aggregated.overall_score,
            level = %aggregated.overall_level,
            actions = actions.len(),
            "Risk assessed"
        );

        RiskAssessment {
            overall_score: aggregated.overall_score,
            overall_level: aggregated.overall_level,
            factors,
            actions,
        }
    }

    /// Assess many programs in parallel. Output order matches input order.
    pub fn assess_batch(&self, programs: &[ProgramSummaries]) -> Vec<ProgramAssessment> {
        programs
            .par_iter()
            .map(|program| ProgramAssessment {
                program_id: program.program_id.clone(),
                assessment: self.assess(&program.summaries),
            })
            .collect()
    }
}

/// Assess a program with the canonical weights.
///
/// Pass `None` for any domain whose provider failed or timed out.
pub fn assess_risk(
    budget: Option<&BudgetSummary>,
    schedule: Option<&ScheduleSummary>,
    funding: Option<&FundingSummary>,
    indicators: Option<&IndicatorSummary>,
    compliance: Option<&ComplianceSummary>,
) -> RiskAssessment {
    let summaries = DomainSummaries {
        budget: budget.cloned(),
        schedule: schedule.cloned(),
        funding: funding.cloned(),
        indicators: indicators.cloned(),
        compliance: compliance.cloned(),
    };
    RiskEngine::default().assess(&summaries)
}
