//! core::config::schema
//!
//! Configuration schema types.
//!
//! Located at (in order of precedence):
//! 1. `$FB_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/formblocks/config.toml`
//! 3. `~/.formblocks/config.toml` (where `fb config set` writes when no
//!    file exists yet)
//!
//! # Validation
//!
//! Config values are validated after parsing: endpoints must be http(s)
//! URLs, the key variable must look like an environment variable name, and
//! token limits must be positive.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// [generator]
/// endpoint = "https://api.openai.com/v1/chat/completions"
/// model = "gpt-5-mini"
/// api_key_env = "OPENAI_API_KEY"
/// max_completion_tokens = 2000
///
/// [audit]
/// path = "/var/log/formblocks/audit.jsonl"
///
/// [export]
/// out_dir = "src/schemas"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Attribute generator settings
    pub generator: Option<GeneratorConfig>,

    /// Audit log settings
    pub audit: Option<AuditConfig>,

    /// Export defaults
    pub export: Option<ExportConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(generator) = &self.generator {
            generator.validate()?;
        }
        if let Some(audit) = &self.audit {
            if audit.path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(ConfigError::InvalidValue(
                    "audit.path cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Set one value by its dotted key, then validate the result.
    ///
    /// # Errors
    ///
    /// `InvalidValue` for an unknown key, an unparsable value, or a value
    /// that fails validation. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.clone();
        match key {
            "generator.endpoint" => {
                next.generator.get_or_insert_with(Default::default).endpoint = Some(value.into())
            }
            "generator.model" => {
                next.generator.get_or_insert_with(Default::default).model = Some(value.into())
            }
            "generator.api_key_env" => {
                next.generator.get_or_insert_with(Default::default).api_key_env =
                    Some(value.into())
            }
            "generator.max_completion_tokens" => {
                let tokens = value.parse::<u32>().map_err(|_| {
                    ConfigError::InvalidValue(format!(
                        "generator.max_completion_tokens must be an integer, got '{}'",
                        value
                    ))
                })?;
                next.generator
                    .get_or_insert_with(Default::default)
                    .max_completion_tokens = Some(tokens)
            }
            "audit.path" => {
                next.audit.get_or_insert_with(Default::default).path = Some(value.into())
            }
            "export.out_dir" => {
                next.export.get_or_insert_with(Default::default).out_dir = Some(value.into())
            }
            other => {
                return Err(ConfigError::InvalidValue(format!(
                    "unknown config key '{}'",
                    other
                )))
            }
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Chat-completions generator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Chat-completions URL
    pub endpoint: Option<String>,

    /// Model name sent with each request
    pub model: Option<String>,

    /// Name of the environment variable holding the bearer key
    pub api_key_env: Option<String>,

    /// Upper bound on reply tokens
    pub max_completion_tokens: Option<u32>,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "generator.endpoint must be an http(s) URL, got '{}'",
                    endpoint
                )));
            }
        }

        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "generator.model cannot be empty".to_string(),
                ));
            }
        }

        if let Some(var) = &self.api_key_env {
            let valid = !var.is_empty()
                && !var.starts_with(|c: char| c.is_ascii_digit())
                && var.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(ConfigError::InvalidValue(format!(
                    "generator.api_key_env '{}' is not a valid environment variable name",
                    var
                )));
            }
        }

        if self.max_completion_tokens == Some(0) {
            return Err(ConfigError::InvalidValue(
                "generator.max_completion_tokens must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Audit log settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// JSON-lines file that receives one record per generation call
    pub path: Option<PathBuf>,
}

/// Export defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory for `<form_type>_schema.ts` / `.json` files
    pub out_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod file_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = FileConfig::default();
            assert!(config.generator.is_none());
            assert!(config.audit.is_none());
            assert!(config.export.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn parse_full() {
            let config: FileConfig = toml::from_str(
                r#"
                [generator]
                endpoint = "https://example.test/v1/chat/completions"
                model = "small"
                api_key_env = "FB_KEY"
                max_completion_tokens = 500

                [audit]
                path = "/tmp/audit.jsonl"

                [export]
                out_dir = "schemas"
                "#,
            )
            .unwrap();

            let generator = config.generator.as_ref().unwrap();
            assert_eq!(generator.model.as_deref(), Some("small"));
            assert_eq!(generator.max_completion_tokens, Some(500));
            assert_eq!(
                config.export.unwrap().out_dir,
                Some(PathBuf::from("schemas"))
            );
        }

        #[test]
        fn set_known_keys() {
            let mut config = FileConfig::default();
            config.set("generator.model", "small").unwrap();
            config.set("generator.max_completion_tokens", "64").unwrap();
            config.set("export.out_dir", "schemas").unwrap();

            let generator = config.generator.as_ref().unwrap();
            assert_eq!(generator.model.as_deref(), Some("small"));
            assert_eq!(generator.max_completion_tokens, Some(64));
            assert_eq!(config.export.unwrap().out_dir, Some(PathBuf::from("schemas")));
        }

        #[test]
        fn set_rejects_bad_input_and_keeps_state() {
            let mut config = FileConfig::default();
            assert!(config.set("generator.colour", "x").is_err());
            assert!(config.set("generator.max_completion_tokens", "lots").is_err());
            assert!(config.set("generator.max_completion_tokens", "0").is_err());
            assert!(config.set("generator.endpoint", "ftp://x").is_err());
            assert_eq!(config, FileConfig::default());
        }

        #[test]
        fn roundtrip() {
            let config = FileConfig {
                generator: Some(GeneratorConfig {
                    model: Some("small".to_string()),
                    ..Default::default()
                }),
                audit: Some(AuditConfig {
                    path: Some(PathBuf::from("/tmp/a.jsonl")),
                }),
                export: None,
            };
            let text = toml::to_string_pretty(&config).unwrap();
            let parsed: FileConfig = toml::from_str(&text).unwrap();
            assert_eq!(config, parsed);
        }

        #[test]
        fn unknown_section_rejected() {
            let result: Result<FileConfig, _> = toml::from_str("[forge]\nowner = \"x\"");
            assert!(result.is_err());
        }

        #[test]
        fn empty_audit_path_rejected() {
            let config = FileConfig {
                audit: Some(AuditConfig {
                    path: Some(PathBuf::new()),
                }),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    mod generator_config {
        use super::*;

        #[test]
        fn non_http_endpoint_rejected() {
            let config = GeneratorConfig {
                endpoint: Some("ftp://example.test".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn bad_env_var_name_rejected() {
            for name in ["", "1KEY", "MY-KEY"] {
                let config = GeneratorConfig {
                    api_key_env: Some(name.to_string()),
                    ..Default::default()
                };
                assert!(config.validate().is_err(), "{name} should be rejected");
            }
        }

        #[test]
        fn zero_tokens_rejected() {
            let config = GeneratorConfig {
                max_completion_tokens: Some(0),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn valid_config() {
            let config = GeneratorConfig {
                endpoint: Some("http://localhost:8080/v1/chat/completions".to_string()),
                model: Some("local".to_string()),
                api_key_env: Some("LOCAL_KEY".to_string()),
                max_completion_tokens: Some(100),
            };
            assert!(config.validate().is_ok());
        }
    }
}
