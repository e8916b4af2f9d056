//! Per-domain risk evaluators.
//!
//! Each evaluator maps one domain summary onto a [`RiskFactor`] through an
//! ordered decision table (first matching row wins). A missing summary
//! yields `None`, which removes the domain from aggregation.

use rust_decimal::Decimal;

use crate::data::{
    BudgetSummary, ComplianceSummary, DomainSummaries, FundingSummary, IndicatorSummary,
    ScheduleSummary,
};

use super::level::{RiskCategory, RiskFactor};

/// Condition tested by a row of the budget table.
#[derive(Debug, Clone, Copy)]
enum BudgetCondition {
    /// Available balance is negative.
    Overdrawn,
    /// Spent rate strictly above the bound.
    SpentAbove(f64),
    /// Committed rate strictly above the bound.
    CommittedAbove(f64),
}

const BUDGET_TABLE: &[(BudgetCondition, f64)] = &[
    (BudgetCondition::Overdrawn, 100.0),
    (BudgetCondition::SpentAbove(90.0), 90.0),
    (BudgetCondition::SpentAbove(75.0), 70.0),
    (BudgetCondition::CommittedAbove(90.0), 60.0),
    (BudgetCondition::CommittedAbove(75.0), 40.0),
    (BudgetCondition::SpentAbove(50.0), 20.0),
];

/// Base score added to the overdue share of milestones.
const OVERDUE_BASE_SCORE: f64 = 30.0;

/// Completion rate strictly below the bound scores the paired value.
const COMPLETION_TABLE: &[(f64, f64)] = &[(50.0, 50.0), (70.0, 30.0)];

/// Received rate strictly below the bound scores the paired value.
const FUNDING_TABLE: &[(f64, f64)] = &[(50.0, 80.0), (70.0, 50.0), (85.0, 30.0)];

/// Score when fewer than half of quantitative indicators are measured.
const UNMEASURED_INDICATORS_SCORE: f64 = 40.0;

const MISSING_DOCUMENTS_SCORE: f64 = 20.0;
const MISSING_REPORTS_SCORE: f64 = 15.0;

/// First row whose bound the value falls strictly below.
fn score_below(value: f64, table: &[(f64, f64)]) -> f64 {
    table
        .iter()
        .find(|(bound, _)| value < *bound)
        .map(|(_, score)| *score)
        .unwrap_or(0.0)
}

/// Score budget execution.
pub fn evaluate_budget(summary: Option<&BudgetSummary>) -> Option<RiskFactor> {
    let budget = summary?;
    let spent_rate = budget.spent_rate();
    let commit_rate = budget.commit_rate();

    let score = BUDGET_TABLE
        .iter()
        .find(|(condition, _)| match condition {
            BudgetCondition::Overdrawn => budget.is_overdrawn(),
            BudgetCondition::SpentAbove(bound) => spent_rate > *bound,
            BudgetCondition::CommittedAbove(bound) => commit_rate > *bound,
        })
        .map(|(_, score)| *score)
        .unwrap_or(0.0);

    let detail = format!(
        "Spent {:.1}% and committed {:.1}% of {} allocated; {} available",
        spent_rate,
        commit_rate,
        budget.allocated(),
        budget.available()
    );

    Some(RiskFactor::new(RiskCategory::Budget, score, detail))
}

/// Score milestone schedule slippage.
pub fn evaluate_schedule(summary: Option<&ScheduleSummary>) -> Option<RiskFactor> {
    let schedule = summary?;
    let total = schedule.total();
    let overdue = schedule.overdue();

    if overdue > 0 && total > 0 {
        let overdue_pct = overdue as f64 * 100.0 / total as f64;
        let score = (overdue_pct + OVERDUE_BASE_SCORE).min(100.0);
        let detail = format!(
            "{} of {} milestones overdue ({:.1}%)",
            overdue, total, overdue_pct
        );
        return Some(RiskFactor::new(RiskCategory::Schedule, score, detail));
    }

    let factor = match schedule.effective_completion_rate() {
        Some(rate) => RiskFactor::new(
            RiskCategory::Schedule,
            score_below(rate, COMPLETION_TABLE),
            format!(
                "Completion {:.1}% ({}/{} milestones achieved)",
                rate,
                schedule.achieved(),
                total
            ),
        ),
        None => RiskFactor::new(
            RiskCategory::Schedule,
            0.0,
            format!(
                "{}/{} milestones achieved; completion rate unavailable",
                schedule.achieved(),
                total
            ),
        ),
    };
    Some(factor)
}

/// Score funding receipts. Programs expecting no funding are not scored.
pub fn evaluate_funding(summary: Option<&FundingSummary>) -> Option<RiskFactor> {
    let funding = summary?;
    if funding.expected() <= Decimal::ZERO {
        return None;
    }

    let received_rate = funding.received_rate();
    let detail = format!(
        "Received {} of {} expected ({:.1}%)",
        funding.received(),
        funding.expected(),
        received_rate
    );

    Some(RiskFactor::new(
        RiskCategory::Funding,
        score_below(received_rate, FUNDING_TABLE),
        detail,
    ))
}

/// Score indicator tracking.
///
/// Only measurement presence counts: the program is at risk when fewer
/// than half of its quantitative indicators have a target recorded.
/// Whether targets were actually met is not evaluated here.
pub fn evaluate_indicators(summary: Option<&IndicatorSummary>) -> Option<RiskFactor> {
    let indicators = summary?;
    let (measured, quantitative) = indicators.quantitative_coverage();

    let score = if measured * 2 < quantitative {
        UNMEASURED_INDICATORS_SCORE
    } else {
        0.0
    };

    let detail = format!(
        "{} of {} quantitative indicators measured; {} of {} indicators have a target",
        measured,
        quantitative,
        indicators.measured_count(),
        indicators.indicators.len()
    );

    Some(RiskFactor::new(RiskCategory::Indicators, score, detail))
}

/// Score documentation and reporting completeness.
pub fn evaluate_compliance(summary: Option<&ComplianceSummary>) -> Option<RiskFactor> {
    let compliance = summary?;
    let documents = compliance.documents();
    let reports = compliance.reports();

    let mut score: f64 = 0.0;
    if documents == 0 {
        score = MISSING_DOCUMENTS_SCORE;
    }
    if reports == 0 {
        score = score.max(MISSING_REPORTS_SCORE);
    }

    let detail = format!("{} document(s) and {} report(s) on file", documents, reports);
    Some(RiskFactor::new(RiskCategory::Compliance, score, detail))
}

/// Run every evaluator, returning factors for available domains in canonical order.
pub fn evaluate_all(summaries: &DomainSummaries) -> Vec<RiskFactor> {
    [
        evaluate_budget(summaries.budget.as_ref()),
        evaluate_schedule(summaries.schedule.as_ref()),
        evaluate_funding(summaries.funding.as_ref()),
        evaluate_indicators(summaries.indicators.as_ref()),
        evaluate_compliance(summaries.compliance.as_ref()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Indicator;
    use crate::risk::RiskLevel;
    use rust_decimal_macros::dec;

    fn budget(
        allocated: Decimal,
        committed: Decimal,
        spent: Decimal,
        available: Decimal,
    ) -> BudgetSummary {
        BudgetSummary {
            total_allocated: Some(allocated),
            total_committed: Some(committed),
            total_spent: Some(spent),
            total_available: Some(available),
        }
    }

    fn budget_score(committed: Decimal, spent: Decimal) -> f64 {
        let summary = budget(dec!(1000), committed, spent, dec!(0));
        evaluate_budget(Some(&summary)).unwrap().score
    }

    #[test]
    fn test_missing_domains_yield_none() {
        assert!(evaluate_budget(None).is_none());
        assert!(evaluate_schedule(None).is_none());
        assert!(evaluate_funding(None).is_none());
        assert!(evaluate_indicators(None).is_none());
        assert!(evaluate_compliance(None).is_none());
    }

    #[test]
    fn test_budget_overdrawn() {
        let summary = budget(dec!(1_000_000), dec!(0), dec!(0), dec!(-50_000));
        let factor = evaluate_budget(Some(&summary)).unwrap();
        assert_eq!(factor.score, 100.0);
        assert_eq!(factor.level, RiskLevel::Critical);
    }

    #[test]
    fn test_budget_decision_table() {
        assert_eq!(budget_score(dec!(0), dec!(950)), 90.0);
        assert_eq!(budget_score(dec!(0), dec!(800)), 70.0);
        assert_eq!(budget_score(dec!(950), dec!(100)), 60.0);
        assert_eq!(budget_score(dec!(800), dec!(100)), 40.0);
        assert_eq!(budget_score(dec!(0), dec!(600)), 20.0);
        assert_eq!(budget_score(dec!(0), dec!(500)), 0.0);
        // Boundaries are strict
        assert_eq!(budget_score(dec!(0), dec!(900)), 70.0);
        assert_eq!(budget_score(dec!(750), dec!(0)), 0.0);
    }

    #[test]
    fn test_budget_zero_allocation() {
        let summary = budget(dec!(0), dec!(500), dec!(500), dec!(0));
        let factor = evaluate_budget(Some(&summary)).unwrap();
        assert_eq!(factor.score, 0.0);
        assert_eq!(factor.level, RiskLevel::Low);
    }

    #[test]
    fn test_budget_monotonic_in_spent_rate() {
        for committed in [dec!(0), dec!(500), dec!(800), dec!(950)] {
            let mut previous = 0.0;
            for spent in (0..=1000).step_by(10) {
                let score = budget_score(committed, Decimal::from(spent));
                assert!(
                    score >= previous,
                    "score dropped from {} to {} at spent={} committed={}",
                    previous,
                    score,
                    spent,
                    committed
                );
                previous = score;
            }
        }
    }

    #[test]
    fn test_budget_extreme_spend_scores_highest() {
        let summary = BudgetSummary {
            total_allocated: Some(Decimal::new(1, 28)),
            total_spent: Some(Decimal::MAX),
            total_available: Some(dec!(0)),
            ..Default::default()
        };
        let factor = evaluate_budget(Some(&summary)).unwrap();
        assert_eq!(factor.score, 90.0);
    }

    #[test]
    fn test_schedule_overdue() {
        let summary = ScheduleSummary {
            total_milestones: Some(10),
            overdue_milestones: Some(3),
            ..Default::default()
        };
        let factor = evaluate_schedule(Some(&summary)).unwrap();
        assert_eq!(factor.score, 60.0);
        assert_eq!(factor.level, RiskLevel::High);
    }

    #[test]
    fn test_schedule_overdue_capped() {
        let summary = ScheduleSummary {
            total_milestones: Some(4),
            overdue_milestones: Some(4),
            ..Default::default()
        };
        let factor = evaluate_schedule(Some(&summary)).unwrap();
        assert_eq!(factor.score, 100.0);
    }

    #[test]
    fn test_schedule_completion_bands() {
        let score = |rate: f64| {
            let summary = ScheduleSummary {
                total_milestones: Some(10),
                completion_rate: Some(rate),
                ..Default::default()
            };
            evaluate_schedule(Some(&summary)).unwrap().score
        };
        assert_eq!(score(20.0), 50.0);
        assert_eq!(score(50.0), 30.0);
        assert_eq!(score(69.9), 30.0);
        assert_eq!(score(70.0), 0.0);
        assert_eq!(score(100.0), 0.0);
    }

    #[test]
    fn test_schedule_overdue_without_milestone_total() {
        let summary = ScheduleSummary {
            overdue_milestones: Some(2),
            completion_rate: Some(90.0),
            ..Default::default()
        };
        let factor = evaluate_schedule(Some(&summary)).unwrap();
        assert_eq!(factor.score, 0.0);
    }

    #[test]
    fn test_schedule_without_rate_or_milestones() {
        let factor = evaluate_schedule(Some(&ScheduleSummary::default())).unwrap();
        assert_eq!(factor.score, 0.0);
        assert!(factor.detail.contains("unavailable"));
    }

    #[test]
    fn test_funding_bands() {
        let score = |received: Decimal| {
            let summary = FundingSummary {
                total_expected: Some(dec!(1_000_000)),
                total_received: Some(received),
            };
            evaluate_funding(Some(&summary)).unwrap().score
        };
        assert_eq!(score(dec!(400_000)), 80.0);
        assert_eq!(score(dec!(500_000)), 50.0);
        assert_eq!(score(dec!(699_999)), 50.0);
        assert_eq!(score(dec!(700_000)), 30.0);
        assert_eq!(score(dec!(850_000)), 0.0);
        assert_eq!(score(dec!(1_200_000)), 0.0);
    }

    #[test]
    fn test_funding_without_expectation_is_not_scored() {
        let summary = FundingSummary {
            total_expected: Some(dec!(0)),
            total_received: Some(dec!(100)),
        };
        assert!(evaluate_funding(Some(&summary)).is_none());
        assert!(evaluate_funding(Some(&FundingSummary::default())).is_none());
    }

    #[test]
    fn test_indicators_coverage() {
        let poorly_tracked = IndicatorSummary::new(vec![
            Indicator::quantitative(Some(5.0)),
            Indicator::quantitative(None),
            Indicator::quantitative(None),
            Indicator::qualitative(Some(1.0)),
        ]);
        let factor = evaluate_indicators(Some(&poorly_tracked)).unwrap();
        assert_eq!(factor.score, 40.0);
        assert_eq!(factor.level, RiskLevel::Medium);

        let half_tracked = IndicatorSummary::new(vec![
            Indicator::quantitative(Some(5.0)),
            Indicator::quantitative(None),
        ]);
        assert_eq!(evaluate_indicators(Some(&half_tracked)).unwrap().score, 0.0);
    }

    #[test]
    fn test_indicators_qualitative_only() {
        let summary = IndicatorSummary::new(vec![
            Indicator::qualitative(None),
            Indicator::qualitative(None),
        ]);
        assert_eq!(evaluate_indicators(Some(&summary)).unwrap().score, 0.0);
        assert_eq!(
            evaluate_indicators(Some(&IndicatorSummary::default()))
                .unwrap()
                .score,
            0.0
        );
    }

    #[test]
    fn test_compliance() {
        let score = |documents: u32, reports: u32| {
            let summary = ComplianceSummary {
                document_count: Some(documents),
                report_count: Some(reports),
            };
            evaluate_compliance(Some(&summary)).unwrap().score
        };
        assert_eq!(score(0, 0), 20.0);
        assert_eq!(score(0, 3), 20.0);
        assert_eq!(score(2, 0), 15.0);
        assert_eq!(score(2, 3), 0.0);
    }

    #[test]
    fn test_evaluate_all_order() {
        let summaries = DomainSummaries {
            compliance: Some(ComplianceSummary::default()),
            budget: Some(BudgetSummary::default()),
            schedule: Some(ScheduleSummary::default()),
            ..Default::default()
        };
        let categories: Vec<_> = evaluate_all(&summaries)
            .into_iter()
            .map(|f| f.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                RiskCategory::Budget,
                RiskCategory::Schedule,
                RiskCategory::Compliance
            ]
        );
    }
}
