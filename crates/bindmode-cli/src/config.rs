use crate::error::{CliError, Result};
use bindmode::core::topology::registry::TemplateRegistry;
use bindmode::engine::config::{AnalysisConfig, AnalysisConfigBuilder};
use bindmode::workflows::analyze::load_templates;
use std::path::Path;
use tracing::debug;

/// Builds the analysis configuration from an optional TOML file and `KEY=VALUE`
/// overrides. Overrides are applied after the file, in the order given.
pub fn resolve_config(config_path: Option<&Path>, set_values: &[String]) -> Result<AnalysisConfig> {
    let base = match config_path {
        Some(path) => {
            debug!("Loading configuration from file: {:?}", path);
            let content = std::fs::read_to_string(path)?;
            AnalysisConfig::from_toml_str(&content).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?
        }
        None => AnalysisConfig::default(),
    };

    let pairs = set_values
        .iter()
        .map(|kv_pair| parse_set_value(kv_pair))
        .collect::<Result<Vec<_>>>()?;
    Ok(AnalysisConfigBuilder::from_config(base).set_all(pairs)?.build()?)
}

fn parse_set_value(kv_pair: &str) -> Result<(&str, &str)> {
    match kv_pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(CliError::Argument(format!(
            "Invalid --set format: '{}'. Expected KEY=VALUE.",
            kv_pair
        ))),
    }
}

/// The built-in residue templates, extended by a user template file if one is given.
pub fn resolve_templates(templates_path: Option<&Path>) -> Result<TemplateRegistry> {
    if let Some(path) = templates_path {
        debug!("Loading additional residue templates from: {:?}", path);
    }
    Ok(load_templates(templates_path)?)
}
