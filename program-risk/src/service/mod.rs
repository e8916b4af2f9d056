//! Program assessment service.
//!
//! Fans out the five domain summary fetches for a program, joins them, and
//! hands whatever arrived to the risk engine.

pub mod assessment;

pub use assessment::{ProgramRiskReport, RiskAssessmentService, ServiceConfig};
