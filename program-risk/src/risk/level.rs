//! Risk categories, severity levels and scored factors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Score at or above which a factor is critical.
pub const CRITICAL_THRESHOLD: f64 = 75.0;
/// Score at or above which a factor is high.
pub const HIGH_THRESHOLD: f64 = 50.0;
/// Score at or above which a factor is medium.
pub const MEDIUM_THRESHOLD: f64 = 25.0;

/// Program domain a risk factor or action belongs to.
///
/// Variants are declared in canonical evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Budget,
    Schedule,
    Funding,
    Indicators,
    Compliance,
}

impl RiskCategory {
    /// All categories in canonical order.
    pub const ALL: [RiskCategory; 5] = [
        Self::Budget,
        Self::Schedule,
        Self::Funding,
        Self::Indicators,
        Self::Compliance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "BUDGET",
            Self::Schedule => "SCHEDULE",
            Self::Funding => "FUNDING",
            Self::Indicators => "INDICATORS",
            Self::Compliance => "COMPLIANCE",
        }
    }

    /// Generic remediation phrase used when the category scores high.
    pub fn remediation(&self) -> &'static str {
        match self {
            Self::Budget => "review budget and control spending",
            Self::Schedule => "accelerate activities or revise deadlines",
            Self::Funding => "follow up on pending funding",
            Self::Indicators => "analyze performance gaps",
            Self::Compliance => "update documents and reports",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity level derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a score onto its severity band.
    pub fn from_score(score: f64) -> Self {
        if score >= CRITICAL_THRESHOLD {
            Self::Critical
        } else if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Whether this level calls for a corrective action.
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scored assessment of a single domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: RiskCategory,
    /// Score in [0, 100].
    pub score: f64,
    pub level: RiskLevel,
    /// Human-readable explanation of the numbers behind the score.
    pub detail: String,
}

impl RiskFactor {
    /// Build a factor; the score is clamped to [0, 100] and the level derived from it.
    pub fn new(category: RiskCategory, score: f64, detail: impl Into<String>) -> Self {
        let score = score.clamp(0.0, 100.0);
        Self {
            category,
            score,
            level: RiskLevel::from_score(score),
            detail: detail.into(),
        }
    }
}
