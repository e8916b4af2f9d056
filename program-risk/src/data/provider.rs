//! Domain summary providers.
//!
//! A provider answers the five per-program queries the assessment needs.
//! Each query fails independently; the service turns failures into missing
//! domains instead of aborting.
//!
//! Implementations:
//! - [`HttpSummaryProvider`]: remote data store over HTTP/JSON
//! - [`StaticSummaryProvider`]: in-memory summaries keyed by program id

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::types::{
    BudgetSummary, ComplianceSummary, DomainSummaries, FundingSummary, IndicatorSummary,
    ProgramSummaries, ScheduleSummary,
};

/// Provider errors.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("No {domain} data for program {program_id}")]
    NotFound { program_id: String, domain: String },

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    fn not_found(program_id: &str, domain: &str) -> Self {
        Self::NotFound {
            program_id: program_id.to_string(),
            domain: domain.to_string(),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Source of domain summaries for a program.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Allocated, committed, spent and available budget totals.
    async fn budget_summary(&self, program_id: &str) -> ProviderResult<BudgetSummary>;

    /// Milestone counts and completion percentage.
    async fn schedule_summary(&self, program_id: &str) -> ProviderResult<ScheduleSummary>;

    /// Expected versus received funding.
    async fn funding_summary(&self, program_id: &str) -> ProviderResult<FundingSummary>;

    /// Indicator types and targets.
    async fn indicators(&self, program_id: &str) -> ProviderResult<IndicatorSummary>;

    /// Document and report counts.
    async fn compliance_summary(&self, program_id: &str) -> ProviderResult<ComplianceSummary>;
}

/// Response wrapper used by the data store: `{"data": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// HTTP client for a remote program data store.
///
/// Endpoints, relative to the base URL:
/// - `programs/{id}/budget-summary`
/// - `programs/{id}/milestone-summary`
/// - `programs/{id}/funding-summary`
/// - `programs/{id}/indicators`
/// - `programs/{id}/compliance-summary`
pub struct HttpSummaryProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSummaryProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Use a preconfigured client (proxies, TLS, default timeouts).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Authenticate requests with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, program_id: &str, resource: &str) -> String {
        format!("{}/programs/{}/{}", self.base_url, program_id, resource)
    }

    async fn get<T: DeserializeOwned>(&self, program_id: &str, resource: &str) -> ProviderResult<T> {
        let mut request = self.client.get(self.endpoint(program_id, resource));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::not_found(program_id, resource));
        }

        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Err(ProviderError::Unavailable(resource.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!("{}: {}", status, text)));
        }

        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse {}: {}", resource, e))
        })?;
        Ok(body.data)
    }
}

#[async_trait]
impl SummaryProvider for HttpSummaryProvider {
    async fn budget_summary(&self, program_id: &str) -> ProviderResult<BudgetSummary> {
        self.get(program_id, "budget-summary").await
    }

    async fn schedule_summary(&self, program_id: &str) -> ProviderResult<ScheduleSummary> {
        self.get(program_id, "milestone-summary").await
    }

    async fn funding_summary(&self, program_id: &str) -> ProviderResult<FundingSummary> {
        self.get(program_id, "funding-summary").await
    }

    async fn indicators(&self, program_id: &str) -> ProviderResult<IndicatorSummary> {
        self.get(program_id, "indicators").await
    }

    async fn compliance_summary(&self, program_id: &str) -> ProviderResult<ComplianceSummary> {
        self.get(program_id, "compliance-summary").await
    }
}

/// Serves summaries already held in memory.
///
/// A domain missing from a program's entry is reported as `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct StaticSummaryProvider {
    programs: HashMap<String, DomainSummaries>,
}

impl StaticSummaryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program_id: impl Into<String>, summaries: DomainSummaries) -> Self {
        self.insert(program_id, summaries);
        self
    }

    pub fn insert(&mut self, program_id: impl Into<String>, summaries: DomainSummaries) {
        self.programs.insert(program_id.into(), summaries);
    }

    pub fn program_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.programs.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn domain<T: Clone>(
        &self,
        program_id: &str,
        domain: &str,
        select: impl Fn(&DomainSummaries) -> Option<&T>,
    ) -> ProviderResult<T> {
        self.programs
            .get(program_id)
            .and_then(|s| select(s))
            .cloned()
            .ok_or_else(|| ProviderError::not_found(program_id, domain))
    }
}

impl From<Vec<ProgramSummaries>> for StaticSummaryProvider {
    fn from(programs: Vec<ProgramSummaries>) -> Self {
        let mut provider = Self::new();
        for program in programs {
            provider.insert(program.program_id, program.summaries);
        }
        provider
    }
}

#[async_trait]
impl SummaryProvider for StaticSummaryProvider {
    async fn budget_summary(&self, program_id: &str) -> ProviderResult<BudgetSummary> {
        self.domain(program_id, "budget", |s| s.budget.as_ref())
    }

    async fn schedule_summary(&self, program_id: &str) -> ProviderResult<ScheduleSummary> {
        self.domain(program_id, "schedule", |s| s.schedule.as_ref())
    }

    async fn funding_summary(&self, program_id: &str) -> ProviderResult<FundingSummary> {
        self.domain(program_id, "funding", |s| s.funding.as_ref())
    }

    async fn indicators(&self, program_id: &str) -> ProviderResult<IndicatorSummary> {
        self.domain(program_id, "indicators", |s| s.indicators.as_ref())
    }

    async fn compliance_summary(&self, program_id: &str) -> ProviderResult<ComplianceSummary> {
        self.domain(program_id, "compliance", |s| s.compliance.as_ref())
    }
}
