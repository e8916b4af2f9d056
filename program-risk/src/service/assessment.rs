//! Assessment service: collects domain summaries and runs the engine.
//!
//! The five summaries are fetched concurrently. Each fetch is bounded by the
//! configured timeout; a failed or timed-out domain is logged and passed to
//! the engine as missing, so one bad provider never aborts the assessment.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::data::{DomainSummaries, ProviderResult, SummaryProvider};
use crate::risk::{CategoryWeights, RiskAssessment, RiskCategory, RiskEngine};

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Per-domain fetch timeout in milliseconds.
    pub fetch_timeout_ms: u64,
    /// Programs assessed concurrently by `assess_many`.
    pub max_batch_concurrency: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 10_000,
            max_batch_concurrency: 8,
        }
    }
}

impl ServiceConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Assessment result for one program, with collection metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRiskReport {
    pub program_id: String,
    pub assessed_at: DateTime<Utc>,
    /// Domains whose summary could not be collected.
    pub missing_domains: Vec<RiskCategory>,
    pub assessment: RiskAssessment,
}

impl ProgramRiskReport {
    /// True when no collected domain produced a risk factor.
    pub fn is_insufficient(&self) -> bool {
        !self.assessment.has_data()
    }
}

/// Fetches summaries from a provider and assesses programs.
pub struct RiskAssessmentService<P> {
    provider: P,
    engine: RiskEngine,
    config: ServiceConfig,
}

impl<P: SummaryProvider> RiskAssessmentService<P> {
    /// Create a service with canonical weights and default settings.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            engine: RiskEngine::default(),
            config: ServiceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_weights(mut self, weights: CategoryWeights) -> Self {
        self.engine = RiskEngine::new(weights);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch all five summaries concurrently, keeping whatever succeeded.
    pub async fn collect(&self, program_id: &str) -> DomainSummaries {
        let timeout = self.config.fetch_timeout();
        let provider = &self.provider;

        let (budget, schedule, funding, indicators, compliance) = tokio::join!(
            fetch_domain(
                program_id,
                RiskCategory::Budget,
                timeout,
                provider.budget_summary(program_id)
            ),
            fetch_domain(
                program_id,
                RiskCategory::Schedule,
                timeout,
                provider.schedule_summary(program_id)
            ),
            fetch_domain(
                program_id,
                RiskCategory::Funding,
                timeout,
                provider.funding_summary(program_id)
            ),
            fetch_domain(
                program_id,
                RiskCategory::Indicators,
                timeout,
                provider.indicators(program_id)
            ),
            fetch_domain(
                program_id,
                RiskCategory::Compliance,
                timeout,
                provider.compliance_summary(program_id)
            ),
        );

        DomainSummaries {
            budget,
            schedule,
            funding,
            indicators,
            compliance,
        }
    }

    /// Collect summaries and assess one program.
    pub async fn assess(&self, program_id: &str) -> ProgramRiskReport {
        let summaries = self.collect(program_id).await;
        let missing_domains = summaries.missing();
        let assessment = self.engine.assess(&summaries);

        if assessment.has_data() {
            info!(
                program_id,
                missing = missing_domains.len(),
                "{}",
                assessment.summary()
            );
        } else {
            warn!(program_id, "No scorable domain summaries; assessment has insufficient data");
        }

        ProgramRiskReport {
            program_id: program_id.to_string(),
            assessed_at: Utc::now(),
            missing_domains,
            assessment,
        }
    }

    /// Assess several programs with bounded concurrency. Output order matches input order.
    pub async fn assess_many(&self, program_ids: &[String]) -> Vec<ProgramRiskReport> {
        let concurrency = self.config.max_batch_concurrency.max(1);
        info!(
            "Assessing {} programs ({} concurrent)",
            program_ids.len(),
            concurrency
        );

        stream::iter(program_ids)
            .map(|id| self.assess(id))
            .buffered(concurrency)
            .collect()
            .await
    }
}

async fn fetch_domain<T, F>(
    program_id: &str,
    category: RiskCategory,
    timeout: Duration,
    request: F,
) -> Option<T>
where
    F: Future<Output = ProviderResult<T>>,
{
    match tokio::time::timeout(timeout, request).await {
        Ok(Ok(summary)) => Some(summary),
        Ok(Err(e)) => {
            warn!(program_id, domain = %category, error = %e, "Domain summary unavailable");
            None
        }
        Err(_) => {
            warn!(
                program_id,
                domain = %category,
                timeout_ms = timeout.as_millis() as u64,
                "Domain summary fetch timed out"
            );
            None
        }
    }
}
