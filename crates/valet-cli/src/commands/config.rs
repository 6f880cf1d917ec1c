//! Configuration management commands.

use anyhow::Result;
use valet_config::ValetConfig;

use crate::ConfigFormat;

/// Show the merged configuration.
pub fn show(config: &ValetConfig, format: ConfigFormat) -> Result<()> {
    match format {
        ConfigFormat::Json => {
            let json = serde_json::to_string_pretty(config)?;
            println!("{json}");
        }
        ConfigFormat::Toml => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{toml_str}");
        }
        ConfigFormat::Text => {
            println!("Valet Configuration");
            println!("===================\n");

            println!("IO:");
            println!("  Input: {}", config.io.input.display());
            println!("  Output: {}", config.io.output.display());
            println!();

            println!("REPL:");
            println!("  Prompt: {:?}", config.repl.prompt);
            println!("  History: {}", config.repl.history);
            println!();

            println!("Logging:");
            println!("  Filter: {}", config.logging.filter);
        }
    }

    Ok(())
}
