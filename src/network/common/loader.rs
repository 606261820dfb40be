use crate::network::common::errors::InferenceError;
use crate::network::inference::query::Query;
use crate::network::model::definition::VariableDefinition;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk model: the variable descriptors in registration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub variables: Vec<VariableDefinition>,
}

/// On-disk query list, evaluated in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryFile {
    pub queries: Vec<Query>,
}

pub fn load_model(path: impl AsRef<Path>) -> Result<Vec<VariableDefinition>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {}", path.display()))?;
    let model: ModelFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse model file {}", path.display()))?;
    info!("Loaded {} variables from {}", model.variables.len(), path.display());
    Ok(model.variables)
}

pub fn load_queries(path: impl AsRef<Path>) -> Result<Vec<Query>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read query file {}", path.display()))?;
    let file: QueryFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse query file {}", path.display()))?;
    info!("Loaded {} queries from {}", file.queries.len(), path.display());
    Ok(file.queries)
}

/// One line per query result
pub fn format_result(result: &std::result::Result<f64, InferenceError>) -> String {
    match result {
        Ok(probability) => probability.to_string(),
        Err(e) => format!("error: {}", e),
    }
}

/// Write one line per result, in query order
pub fn write_results(
    path: impl AsRef<Path>,
    results: &[std::result::Result<f64, InferenceError>],
) -> Result<()> {
    let path = path.as_ref();
    let mut lines: Vec<String> = results.iter().map(format_result).collect();
    lines.push(String::new());
    fs::write(path, lines.join("\n"))
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    Ok(())
}
