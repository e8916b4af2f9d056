//! Loader for domain summary files.
//!
//! Accepts JSON in three shapes:
//! - an array of programs: `[{"programId": "...", "budget": {...}, ...}, ...]`
//! - a single program: `{"programId": "...", "budget": {...}, ...}`
//! - bare summaries: `{"budget": {...}, ...}`, identified by the file stem

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use super::types::{DomainSummaries, ProgramSummaries};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type LoaderResult<T> = Result<T, LoaderError>;

/// Keys allowed on a program object.
const PROGRAM_KEYS: [&str; 6] = [
    "programId",
    "budget",
    "schedule",
    "funding",
    "indicators",
    "compliance",
];

/// Read a file to string, mapping a missing file to `FileNotFound`.
pub fn read_file(path: &Path) -> LoaderResult<String> {
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Parse program summaries from JSON text.
///
/// `fallback_id` names the program when the text holds bare summaries, i.e.
/// an object without a `programId` key. Unknown keys on a program object
/// are rejected so a misspelled domain is not silently dropped.
pub fn parse_programs(content: &str, fallback_id: &str) -> LoaderResult<Vec<ProgramSummaries>> {
    let value: Value = serde_json::from_str(content)?;
    let has_id = value.get("programId").is_some();

    let programs = match value {
        Value::Array(items) => {
            for item in &items {
                check_keys(item)?;
            }
            serde_json::from_value::<Vec<ProgramSummaries>>(Value::Array(items))?
        }
        Value::Object(_) if has_id => {
            check_keys(&value)?;
            vec![serde_json::from_value::<ProgramSummaries>(value)?]
        }
        Value::Object(_) => {
            check_keys(&value)?;
            vec![ProgramSummaries {
                program_id: fallback_id.to_string(),
                summaries: serde_json::from_value::<DomainSummaries>(value)?,
            }]
        }
        _ => {
            return Err(LoaderError::InvalidData(
                "expected a program object or an array of programs".to_string(),
            ))
        }
    };

    let mut seen = HashSet::new();
    for program in &programs {
        if !seen.insert(program.program_id.as_str()) {
            return Err(LoaderError::InvalidData(format!(
                "duplicate program id: {}",
                program.program_id
            )));
        }
    }

    Ok(programs)
}

fn check_keys(value: &Value) -> LoaderResult<()> {
    let Some(map) = value.as_object() else {
        return Ok(());
    };
    match map.keys().find(|k| !PROGRAM_KEYS.contains(&k.as_str())) {
        Some(key) => {
            let program = map
                .get("programId")
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>");
            Err(LoaderError::InvalidData(format!(
                "unknown field `{}` in program {}",
                key, program
            )))
        }
        None => Ok(()),
    }
}

/// Load program summaries from a JSON file.
pub fn load_programs(path: &Path) -> LoaderResult<Vec<ProgramSummaries>> {
    let content = read_file(path)?;
    let fallback_id = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "program".to_string());
    parse_programs(&content, &fallback_id)
}
