//! `trellis config`: inspect the effective configuration.

use std::collections::BTreeMap;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&BTreeMap::from([(key.as_str(), value.as_str())]))?;
            } else {
                output.print(&value)?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::ConfigError {
        message: format!(
            "Unknown config key '{key}' (known: {})",
            AppConfig::KEYS.join(", ")
        ),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "scaffold.blueprint").unwrap(), "picnic");
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }

    #[test]
    fn get_unknown_key_lists_known_ones() {
        let err = get_config_value(&AppConfig::default(), "defaults.lang").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert!(err.to_string().contains("scaffold.jobs"));
    }
}
