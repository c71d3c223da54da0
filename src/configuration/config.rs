#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiBase,
    ConfigFile,
}

/// Settings resolved once at startup and handed to whatever needs them.
/// Precedence is defaults, then the config file, then flags and env vars.
pub struct Config {
    values: DashMap<ConfigKey, String>,
}

impl Default for Config {
    fn default() -> Config {
        let config = Config {
            values: DashMap::new(),
        };
        for key in ConfigKey::iter() {
            config.set(key, &Config::default_value(key));
        }

        return config;
    }
}

impl Config {
    pub fn get(&self, key: ConfigKey) -> String {
        if let Some(val) = self.values.get(&key) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(&self, key: ConfigKey, value: &str) {
        self.values.insert(key, value.to_string());
    }

    pub fn default_value(key: ConfigKey) -> String {
        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("symptocheck/config.toml");

        let res = match key {
            ConfigKey::ApiBase => "http://localhost:8000/api".to_string(),
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
        };

        return res;
    }

    fn validate(&self) -> Result<()> {
        let api_base = self.get(ConfigKey::ApiBase);
        if let Err(err) = reqwest::Url::parse(&api_base) {
            bail!(format!(
                "Invalid value for '{}': {api_base} ({err})",
                ConfigKey::ApiBase
            ));
        }

        return Ok(());
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<Config> {
        let config = Config::default();

        let mut config_file = config.get(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }
        config.set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    match val.as_str() {
                        Some(val_str) if val_str.is_empty() => continue,
                        Some(val_str) => config.set(key, val_str),
                        None => {
                            bail!(format!("config.toml has an invalid value for key '{key}': expected a string"));
                        }
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    config.set(key, val)
                }
            }
        }

        config.validate()?;

        tracing::debug!(
            api_base = config.get(ConfigKey::ApiBase),
            config_file = config.get(ConfigKey::ConfigFile),
            "config"
        );

        return Ok(config);
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let val = Config::default_value(key);
                let line = if val.is_empty() {
                    format!("# {key} = \"\"")
                } else {
                    format!("{key} = \"{val}\"")
                };

                return Some(format!("# {description}\n{line}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
