//! Program risk assessment CLI.
//!
//! # Usage
//!
//! ```bash
//! # Assess programs from a summaries file
//! program-risk assess --input data/programs.json
//!
//! # Same, as JSON, with custom weights
//! program-risk --config config/default.toml assess --input data/programs.json --format json
//!
//! # Fetch summaries from the data store and assess
//! export PROGRAM_RISK_BASE_URL=https://data.example.org/api
//! program-risk fetch --program P-001 --program P-002
//!
//! # Show effective configuration
//! program-risk weights
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use program_risk::data::{load_programs, HttpSummaryProvider};
use program_risk::{RiskAssessment, RiskAssessmentService, RiskCategory, RiskConfig, RiskEngine};

const SEPARATOR: &str = "============================================================";

#[derive(Parser)]
#[command(name = "program-risk")]
#[command(about = "Risk assessment for development program portfolios")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to TOML configuration (weights, fetch timeout)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess programs from a JSON summaries file
    Assess {
        /// Path to summaries file (one program or an array of programs)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Fetch summaries from the program data store and assess
    Fetch {
        /// Data store base URL
        #[arg(long, env = "PROGRAM_RISK_BASE_URL")]
        base_url: String,

        /// Bearer token for the data store
        #[arg(long, env = "PROGRAM_RISK_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Program id (repeatable)
        #[arg(short, long = "program", required = true)]
        programs: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Weights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn load_config(path: Option<&PathBuf>) -> Result<RiskConfig> {
    match path {
        Some(p) => RiskConfig::load(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(RiskConfig::default()),
    }
}

fn print_assessment(program_id: &str, assessment: &RiskAssessment, missing: &[RiskCategory]) {
    println!("{}", SEPARATOR);
    println!("Program {}", program_id);
    println!("{}", SEPARATOR);

    if !assessment.has_data() {
        println!("  Insufficient data: no scorable domain summaries");
        println!();
        return;
    }

    println!(
        "  Overall: {} (score {:.0})",
        assessment.overall_level, assessment.overall_score
    );
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
        println!("  Missing domains: {}", names.join(", "));
    }

    println!("  Factors:");
    for factor in &assessment.factors {
        println!(
            "    {:<11} {:>5.1}  {:<8}  {}",
            factor.category.as_str(),
            factor.score,
            factor.level.as_str(),
            factor.detail
        );
    }

    if assessment.actions.is_empty() {
        println!("  Actions: none");
    } else {
        println!("  Actions:");
        for (i, action) in assessment.actions.iter().enumerate() {
            println!(
                "    {}. [{}] {}: {} (impact {})",
                i + 1,
                action.priority,
                action.category,
                action.description,
                action.impact.as_str()
            );
        }
    }
    println!();
}

fn cmd_assess(config: &RiskConfig, input: PathBuf, format: OutputFormat) -> Result<()> {
    let programs = load_programs(&input)
        .with_context(|| format!("Failed to load summaries from {}", input.display()))?;
    info!("Loaded {} program(s) from {}", programs.len(), input.display());

    let engine = RiskEngine::new(config.weights);
    let results = engine.assess_batch(&programs);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Text => {
            for (program, result) in programs.iter().zip(&results) {
                let missing = program.summaries.missing();
                print_assessment(&result.program_id, &result.assessment, &missing);
            }
        }
    }

    Ok(())
}

async fn cmd_fetch(
    config: &RiskConfig,
    base_url: String,
    token: Option<String>,
    programs: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut provider = HttpSummaryProvider::new(&base_url);
    if let Some(token) = token {
        provider = provider.with_token(token);
    }
    info!("Fetching summaries from {}", provider.base_url());

    let service = RiskAssessmentService::new(provider)
        .with_config(config.service.clone())
        .with_weights(config.weights);
    let reports = service.assess_many(&programs).await;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for report in &reports {
                print_assessment(&report.program_id, &report.assessment, &report.missing_domains);
            }
        }
    }

    Ok(())
}

fn cmd_weights(config: &RiskConfig) {
    println!("{}", SEPARATOR);
    println!("Category weights");
    println!("{}", SEPARATOR);
    for category in RiskCategory::ALL {
        println!("  {:<11} {:.2}", category.as_str(), config.weights.weight(category));
    }
    println!("  {:<11} {:.2}", "TOTAL", config.weights.total());
    println!();
    println!("Fetch timeout: {} ms", config.service.fetch_timeout_ms);
    println!("Batch concurrency: {}", config.service.max_batch_concurrency);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("program_risk=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Assess { input, format } => {
            cmd_assess(&config, input, format)?;
        }
        Commands::Fetch {
            base_url,
            token,
            programs,
            format,
        } => {
            cmd_fetch(&config, base_url, token, programs, format).await?;
        }
        Commands::Weights => cmd_weights(&config),
    }

    Ok(())
}
