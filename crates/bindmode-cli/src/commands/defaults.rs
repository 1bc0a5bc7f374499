use crate::error::Result;
use bindmode::engine::config::AnalysisConfig;

/// Prints the default analysis parameters in the format accepted by `--config`.
pub fn run() -> Result<()> {
    let text = AnalysisConfig::default().to_toml_string()?;
    print!("{}", text);
    Ok(())
}
