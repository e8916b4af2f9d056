//! Domain summary types consumed by the risk engine.
//!
//! Each summary is produced by an external provider for a single program.
//! Every field is optional: a provider may return a partial record, and the
//! whole summary may be missing when its provider fails. Absent numeric
//! fields read as zero through the accessor methods.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::risk::RiskCategory;

/// Budget execution totals, all in the same currency unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    #[serde(default)]
    pub total_allocated: Option<Decimal>,
    #[serde(default)]
    pub total_committed: Option<Decimal>,
    #[serde(default)]
    pub total_spent: Option<Decimal>,
    #[serde(default)]
    pub total_available: Option<Decimal>,
}

impl BudgetSummary {
    pub fn allocated(&self) -> Decimal {
        self.total_allocated.unwrap_or_default()
    }

    pub fn committed(&self) -> Decimal {
        self.total_committed.unwrap_or_default()
    }

    pub fn spent(&self) -> Decimal {
        self.total_spent.unwrap_or_default()
    }

    pub fn available(&self) -> Decimal {
        self.total_available.unwrap_or_default()
    }

    /// Spent amount as a percentage of the allocation (0 when nothing is allocated).
    pub fn spent_rate(&self) -> f64 {
        percentage_of(self.spent(), self.allocated())
    }

    /// Committed amount as a percentage of the allocation (0 when nothing is allocated).
    pub fn commit_rate(&self) -> f64 {
        percentage_of(self.committed(), self.allocated())
    }

    /// Whether the budget is overdrawn.
    pub fn is_overdrawn(&self) -> bool {
        self.available() < Decimal::ZERO
    }
}

/// Milestone schedule counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    #[serde(default)]
    pub total_milestones: Option<u32>,
    #[serde(default)]
    pub achieved_milestones: Option<u32>,
    #[serde(default)]
    pub overdue_milestones: Option<u32>,
    /// Precomputed completion percentage (0-100).
    #[serde(default)]
    pub completion_rate: Option<f64>,
}

impl ScheduleSummary {
    pub fn total(&self) -> u32 {
        self.total_milestones.unwrap_or(0)
    }

    pub fn achieved(&self) -> u32 {
        self.achieved_milestones.unwrap_or(0)
    }

    pub fn overdue(&self) -> u32 {
        self.overdue_milestones.unwrap_or(0)
    }

    /// Completion percentage.
    ///
    /// Uses the provider's precomputed rate when present and falls back to
    /// `achieved / total`. Returns `None` when neither is available.
    pub fn effective_completion_rate(&self) -> Option<f64> {
        match self.completion_rate {
            Some(rate) => Some(rate),
            None if self.total() > 0 => {
                Some(self.achieved() as f64 * 100.0 / self.total() as f64)
            }
            None => None,
        }
    }
}

/// Expected versus received funding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSummary {
    #[serde(default)]
    pub total_expected: Option<Decimal>,
    #[serde(default)]
    pub total_received: Option<Decimal>,
}

impl FundingSummary {
    pub fn expected(&self) -> Decimal {
        self.total_expected.unwrap_or_default()
    }

    pub fn received(&self) -> Decimal {
        self.total_received.unwrap_or_default()
    }

    /// Amount still owed by funders.
    pub fn outstanding(&self) -> Decimal {
        self.expected() - self.received()
    }

    /// Received amount as a percentage of expected (0 when nothing is expected).
    pub fn received_rate(&self) -> f64 {
        percentage_of(self.received(), self.expected())
    }
}

/// Indicator measurement type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorType {
    Quantitative,
    Qualitative,
}

/// A single program indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    /// Target value, `None` while the indicator has not been measured.
    #[serde(default)]
    pub target: Option<f64>,
}

impl Indicator {
    pub fn quantitative(target: Option<f64>) -> Self {
        Self {
            indicator_type: IndicatorType::Quantitative,
            target,
        }
    }

    pub fn qualitative(target: Option<f64>) -> Self {
        Self {
            indicator_type: IndicatorType::Qualitative,
            target,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.target.is_some()
    }
}

/// Ordered list of a program's indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSummary {
    pub indicators: Vec<Indicator>,
}

impl IndicatorSummary {
    pub fn new(indicators: Vec<Indicator>) -> Self {
        Self { indicators }
    }

    /// Number of indicators with a target set.
    pub fn measured_count(&self) -> usize {
        self.indicators.iter().filter(|i| i.is_measured()).count()
    }

    /// Quantitative indicators as `(measured, total)`.
    pub fn quantitative_coverage(&self) -> (usize, usize) {
        self.indicators
            .iter()
            .filter(|i| i.indicator_type == IndicatorType::Quantitative)
            .fold((0, 0), |(measured, total), i| {
                (measured + usize::from(i.is_measured()), total + 1)
            })
    }
}

/// Documentation and reporting counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    #[serde(default)]
    pub document_count: Option<u32>,
    #[serde(default)]
    pub report_count: Option<u32>,
}

impl ComplianceSummary {
    pub fn documents(&self) -> u32 {
        self.document_count.unwrap_or(0)
    }

    pub fn reports(&self) -> u32 {
        self.report_count.unwrap_or(0)
    }
}

/// The five domain summaries for one program.
///
/// A `None` domain means its provider failed, timed out, or had nothing to
/// return. The engine excludes such domains rather than scoring them as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummaries {
    #[serde(default)]
    pub budget: Option<BudgetSummary>,
    #[serde(default)]
    pub schedule: Option<ScheduleSummary>,
    #[serde(default)]
    pub funding: Option<FundingSummary>,
    #[serde(default)]
    pub indicators: Option<IndicatorSummary>,
    #[serde(default)]
    pub compliance: Option<ComplianceSummary>,
}

impl DomainSummaries {
    /// Whether the summary for a category was collected.
    pub fn has(&self, category: RiskCategory) -> bool {
        match category {
            RiskCategory::Budget => self.budget.is_some(),
            RiskCategory::Schedule => self.schedule.is_some(),
            RiskCategory::Funding => self.funding.is_some(),
            RiskCategory::Indicators => self.indicators.is_some(),
            RiskCategory::Compliance => self.compliance.is_some(),
        }
    }

    /// Categories whose summary is missing, in canonical order.
    pub fn missing(&self) -> Vec<RiskCategory> {
        RiskCategory::ALL
            .into_iter()
            .filter(|c| !self.has(*c))
            .collect()
    }

    /// Number of domains that were collected.
    pub fn available_count(&self) -> usize {
        RiskCategory::ALL.len() - self.missing().len()
    }

    pub fn is_empty(&self) -> bool {
        self.available_count() == 0
    }
}

/// Summaries tagged with the program they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSummaries {
    pub program_id: String,
    #[serde(flatten)]
    pub summaries: DomainSummaries,
}

/// `part / whole` as a percentage. Ratios beyond `Decimal` range saturate.
fn percentage_of(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() || part.is_zero() {
        return 0.0;
    }
    let Some(ratio) = part.checked_div(whole) else {
        return if part.is_sign_negative() == whole.is_sign_negative() {
            f64::MAX
        } else {
            f64::MIN
        };
    };
    match ratio.checked_mul(Decimal::ONE_HUNDRED) {
        Some(pct) => pct.try_into().unwrap_or(0.0),
        None => f64::try_from(ratio).map_or(0.0, |r| r * 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_budget_rates() {
        let budget = BudgetSummary {
            total_allocated: Some(dec!(200_000)),
            total_committed: Some(dec!(150_000)),
            total_spent: Some(dec!(50_000)),
            total_available: Some(dec!(0)),
        };
        assert!((budget.spent_rate() - 25.0).abs() < 1e-9);
        assert!((budget.commit_rate() - 75.0).abs() < 1e-9);
        assert!(!budget.is_overdrawn());
    }

    #[test]
    fn test_budget_rates_without_allocation() {
        let budget = BudgetSummary {
            total_spent: Some(dec!(10_000)),
            ..Default::default()
        };
        assert_eq!(budget.spent_rate(), 0.0);
        assert_eq!(budget.commit_rate(), 0.0);
    }

    #[test]
    fn test_completion_rate_fallback() {
        let schedule = ScheduleSummary {
            total_milestones: Some(8),
            achieved_milestones: Some(2),
            ..Default::default()
        };
        assert_eq!(schedule.effective_completion_rate(), Some(25.0));

        let precomputed = ScheduleSummary {
            completion_rate: Some(80.0),
            ..schedule.clone()
        };
        assert_eq!(precomputed.effective_completion_rate(), Some(80.0));

        assert_eq!(ScheduleSummary::default().effective_completion_rate(), None);
    }

    #[test]
    fn test_quantitative_coverage() {
        let summary = IndicatorSummary::new(vec![
            Indicator::quantitative(Some(10.0)),
            Indicator::quantitative(None),
            Indicator::quantitative(None),
            Indicator::qualitative(None),
        ]);
        assert_eq!(summary.quantitative_coverage(), (1, 3));
        assert_eq!(summary.measured_count(), 1);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "budget": {"totalAllocated": 1000, "totalSpent": 250.5},
            "indicators": [{"type": "QUANTITATIVE", "target": 12}, {"type": "QUALITATIVE"}],
            "compliance": {"documentCount": 3}
        }"#;
        let summaries: DomainSummaries = serde_json::from_str(json).unwrap();

        let budget = summaries.budget.as_ref().unwrap();
        assert_eq!(budget.allocated(), dec!(1000));
        assert_eq!(budget.spent(), dec!(250.5));
        assert_eq!(budget.total_available, None);

        let indicators = summaries.indicators.as_ref().unwrap();
        assert_eq!(indicators.indicators.len(), 2);
        assert_eq!(indicators.indicators[1].target, None);

        assert_eq!(summaries.compliance.as_ref().unwrap().reports(), 0);
        assert!(summaries.schedule.is_none());
        assert_eq!(summaries.available_count(), 3);
        assert_eq!(
            summaries.missing(),
            vec![RiskCategory::Schedule, RiskCategory::Funding]
        );
    }

    #[test]
    fn test_program_summaries_flatten() {
        let json = r#"{"programId": "P-7", "funding": {"totalExpected": 10, "totalReceived": 4}}"#;
        let program: ProgramSummaries = serde_json::from_str(json).unwrap();
        assert_eq!(program.program_id, "P-7");
        assert_eq!(program.summaries.funding.unwrap().outstanding(), dec!(6));
    }

    #[test]
    fn test_extreme_ratio_saturates() {
        let huge = BudgetSummary {
            total_allocated: Some(Decimal::new(1, 28)),
            total_spent: Some(Decimal::MAX),
            ..Default::default()
        };
        assert!(huge.spent_rate() > 100.0);

        // The ratio fits but the percentage does not.
        let large = BudgetSummary {
            total_allocated: Some(dec!(1)),
            total_spent: Some(Decimal::MAX),
            ..Default::default()
        };
        assert!(large.spent_rate() > 1e28);

        let negative = FundingSummary {
            total_expected: Some(Decimal::new(1, 28)),
            total_received: Some(Decimal::MIN),
        };
        assert!(negative.received_rate() < 0.0);
    }
}
