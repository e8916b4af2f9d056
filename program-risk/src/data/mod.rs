pub mod loader;
pub mod provider;
pub mod types;

pub use loader::{load_programs, parse_programs, read_file, LoaderError, LoaderResult};
pub use provider::{
    ApiResponse, HttpSummaryProvider, ProviderError, ProviderResult, StaticSummaryProvider,
    SummaryProvider,
};
pub use types::{
    BudgetSummary, ComplianceSummary, DomainSummaries, FundingSummary, Indicator,
    IndicatorSummary, IndicatorType, ProgramSummaries, ScheduleSummary,
};
