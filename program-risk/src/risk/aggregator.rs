//! Weighted aggregation of domain risk factors.
//!
//! Missing domains are not scored as zero risk. The weighted sum is divided
//! by the weights of the domains actually present, so the remaining weights
//! are renormalized.

use serde::{Deserialize, Serialize};

use super::level::{RiskCategory, RiskFactor, RiskLevel};

/// Per-category aggregation weights. Omitted categories take their default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub budget: f64,
    pub schedule: f64,
    pub funding: f64,
    pub indicators: f64,
    pub compliance: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            budget: 0.30,
            schedule: 0.25,
            funding: 0.20,
            indicators: 0.15,
            compliance: 0.10,
        }
    }
}

impl CategoryWeights {
    /// Weight for a category.
    pub fn weight(&self, category: RiskCategory) -> f64 {
        match category {
            RiskCategory::Budget => self.budget,
            RiskCategory::Schedule => self.schedule,
            RiskCategory::Funding => self.funding,
            RiskCategory::Indicators => self.indicators,
            RiskCategory::Compliance => self.compliance,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        RiskCategory::ALL.iter().map(|c| self.weight(*c)).sum()
    }
}

/// Overall score and level for a set of factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedRisk {
    /// Rounded weighted score in [0, 100].
    pub overall_score: f64,
    pub overall_level: RiskLevel,
    /// Sum of the weights of the factors that contributed.
    pub weight_used: f64,
}

impl Default for AggregatedRisk {
    fn default() -> Self {
        Self {
            overall_score: 0.0,
            overall_level: RiskLevel::Low,
            weight_used: 0.0,
        }
    }
}

/// Combines available risk factors into one score.
#[derive(Debug, Clone, Default)]
pub struct RiskAggregator {
    weights: CategoryWeights,
}

impl RiskAggregator {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Aggregate factors. With no factors (or zero total weight) the result is 0 / LOW.
    pub fn aggregate(&self, factors: &[RiskFactor]) -> AggregatedRisk {
        let (weighted_sum, weight_used) =
            factors
                .iter()
                .fold((0.0_f64, 0.0_f64), |(sum, used), factor| {
                    let weight = self.weights.weight(factor.category);
                    (sum + factor.score * weight, used + weight)
                });

        if weight_used <= 0.0 {
            return AggregatedRisk::default();
        }

        let overall_score = (weighted_sum / weight_used).round().clamp(0.0, 100.0);
        AggregatedRisk {
            overall_score,
            overall_level: RiskLevel::from_score(overall_score),
            weight_used,
        }
    }
}
