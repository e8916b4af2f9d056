pub mod config;
pub mod data;
pub mod risk;
pub mod service;

// Re-export commonly used types
pub use config::{ConfigError, RiskConfig};
pub use data::{
    BudgetSummary, ComplianceSummary, DomainSummaries, FundingSummary, Indicator,
    IndicatorSummary, IndicatorType, ProgramSummaries, ScheduleSummary, SummaryProvider,
};
pub use risk::{
    assess_risk, ActionImpact, ActionPrioritizer, ActionPriority, CategoryWeights,
    CorrectiveAction, RiskAggregator, RiskAssessment, RiskCategory, RiskEngine, RiskFactor,
    RiskLevel,
};
pub use service::{ProgramRiskReport, RiskAssessmentService, ServiceConfig};
