//! Program risk assessment.
//!
//! Provides:
//! - Severity levels and per-domain risk factors
//! - Domain evaluators (budget, schedule, funding, indicators, compliance)
//! - Weighted aggregation with renormalization for missing domains
//! - Corrective action generation and ranking

pub mod actions;
pub mod aggregator;
pub mod engine;
pub mod evaluators;
pub mod level;

pub use actions::{ActionImpact, ActionPrioritizer, ActionPriority, CorrectiveAction};
pub use aggregator::{AggregatedRisk, CategoryWeights, RiskAggregator};
pub use engine::{assess_risk, ProgramAssessment, RiskAssessment, RiskEngine};
pub use evaluators::{
    evaluate_all, evaluate_budget, evaluate_compliance, evaluate_funding, evaluate_indicators,
    evaluate_schedule,
};
pub use level::{RiskCategory, RiskFactor, RiskLevel};
