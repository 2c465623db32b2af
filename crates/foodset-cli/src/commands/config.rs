//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use foodset_core::config::DEFAULT_CATEGORIES;
use foodset_core::models::parse_list;
use foodset_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "log_file": config.log_file,
                    "categories": config.categories
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:   {}", config.data_dir.display());
            println!(
                "  log_file:   {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  categories: {}", config.categories.join(", "));
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            if value.trim().is_empty() {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "categories" => {
            config.categories = if value == "default" {
                DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
            } else {
                parse_list(value)
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, log_file, categories",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_keys() {
        let mut config = Config::default();

        apply(&mut config, "data_dir", "/data/food").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data/food"));

        apply(&mut config, "log_file", "/tmp/foodset.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/foodset.log")));
        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());

        apply(&mut config, "categories", "Fruit, Meat,Dairy").unwrap();
        assert_eq!(config.categories, vec!["Fruit", "Meat", "Dairy"]);
        apply(&mut config, "categories", "default").unwrap();
        assert_eq!(config.categories.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn test_apply_unknown_key() {
        let mut config = Config::default();
        let err = apply(&mut config, "sync_url", "x").unwrap_err();
        assert!(err.to_string().contains("Valid keys"));
        assert!(apply(&mut config, "data_dir", " ").is_err());
    }

    #[test]
    fn test_set_writes_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let data_dir = temp_dir.path().join("data");
        let output = Output::new(OutputFormat::Quiet);
        Config {
            data_dir,
            ..Config::default()
        }
        .save_to_path(&path)
        .unwrap();

        set(
            "categories".to_string(),
            "Fruit, Meat".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let saved = Config::load_from_path(&path).unwrap();
        assert_eq!(saved.categories, vec!["Fruit", "Meat"]);
    }
}
