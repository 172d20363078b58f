//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pipeline
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{HolidaysFile, PipelineConfig, PipelineFile, SourcesConfig, StatesFile};

/// Loads and provides access to the pipeline configuration.
///
/// # Directory Structure
///
/// ```text
/// config/vr/
/// ├── pipeline.yaml   # Metadata, rules, exclusions, publish settings
/// ├── states.yaml     # State code -> state name
/// ├── sources.yaml    # Extract file names and header names
/// └── holidays.yaml   # Holidays on top of the national calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use vr_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/vr").unwrap();
/// println!("Loaded: {}", loader.config().metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PipelineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, holds invalid YAML, or
    /// fails semantic validation (see [`ConfigLoader::validate`]).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let pipeline = Self::load_yaml::<PipelineFile>(&path.join("pipeline.yaml"))?;
        let states = Self::load_yaml::<StatesFile>(&path.join("states.yaml"))?;
        let sources = Self::load_yaml::<SourcesConfig>(&path.join("sources.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysFile>(&path.join("holidays.yaml"))?;

        let config = PipelineConfig::new(pipeline, states.states, sources, holidays.holidays);
        Self::validate(&config)?;

        tracing::debug!(
            path = %path.display(),
            version = %config.metadata().version,
            states = config.states().len(),
            "Loaded pipeline configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Checks the values the calculation relies on.
    ///
    /// - employer and employee shares are non-negative and sum to 1
    /// - the termination cutoff day lies in 1..=31
    /// - every state code is two uppercase ASCII letters
    /// - every leave-deduction state is a known state code
    /// - the leave-return pattern is a valid regular expression
    pub fn validate(config: &PipelineConfig) -> EngineResult<()> {
        let rules = config.rules();

        if rules.employer_share < Decimal::ZERO || rules.employee_share < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: "benefit shares must not be negative".to_string(),
            });
        }
        if rules.employer_share + rules.employee_share != Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "employer_share ({}) and employee_share ({}) must sum to 1",
                    rules.employer_share, rules.employee_share
                ),
            });
        }
        if !(1..=31).contains(&rules.termination_cutoff_day) {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "termination_cutoff_day must be within 1-31, got {}",
                    rules.termination_cutoff_day
                ),
            });
        }

        for code in config.states().keys() {
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("state code '{}' must be two uppercase letters", code),
                });
            }
        }
        for code in &rules.leave_deduction_states {
            if config.state_name(code).is_none() {
                return Err(EngineError::InvalidConfig {
                    message: format!("leave deduction state '{}' is not a known state", code),
                });
            }
        }

        let pattern = &config.exclusions().leave_return_pattern;
        if let Err(e) = regex::Regex::new(pattern) {
            return Err(EngineError::InvalidConfig {
                message: format!("leave_return_pattern '{}' is not a valid regex: {}", pattern, e),
            });
        }

        Ok(())
    }

    /// Returns the underlying pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> PipelineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{PipelineFile, RulesConfig, SourcesConfig, default_states};
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/vr"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config_with_rules(rules: RulesConfig) -> PipelineConfig {
        let pipeline = PipelineFile {
            rules,
            ..PipelineFile::default()
        };
        PipelineConfig::new(pipeline, default_states(), SourcesConfig::default(), vec![])
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().metadata().code, "VR");
        assert_eq!(loader.config().publish().table_name, "tabela_compra_vr");
    }

    #[test]
    fn test_loaded_states_cover_extract_states() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        for code in ["SP", "RJ", "RS", "PR"] {
            assert!(loader.config().state_name(code).is_some(), "missing {}", code);
        }
    }

    #[test]
    fn test_loaded_rules() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rules = loader.config().rules();
        assert_eq!(rules.notice_ok_marker, "OK");
        assert_eq!(rules.termination_cutoff_day, 15);
        assert_eq!(rules.leave_deduction_states, vec!["PR".to_string()]);
        assert_eq!(rules.employer_share, dec("0.80"));
    }

    #[test]
    fn test_loaded_sources_use_extract_headers() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let sources = loader.config().sources();
        assert_eq!(sources.active_workers.columns.worker_id, "MATRICULA");
        assert_eq!(sources.terminations.columns.termination_date, "DATA DEMISSÃO");
        assert_eq!(sources.overseas.columns.worker_id, "Cadastro");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("pipeline.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("pipeline.yaml"), "rules: [not, a, map").unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("pipeline.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_shares_must_sum_to_one() {
        let config = config_with_rules(RulesConfig {
            employer_share: dec("0.7"),
            employee_share: dec("0.2"),
            ..RulesConfig::default()
        });
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_cutoff_day_out_of_range_rejected() {
        let config = config_with_rules(RulesConfig {
            termination_cutoff_day: 0,
            ..RulesConfig::default()
        });
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_unknown_leave_deduction_state_rejected() {
        let config = config_with_rules(RulesConfig {
            leave_deduction_states: vec!["MG".to_string()],
            ..RulesConfig::default()
        });
        let err = ConfigLoader::validate(&config).unwrap_err();
        assert!(err.to_string().contains("MG"));
    }

    #[test]
    fn test_default_configuration_is_valid() {
        assert!(ConfigLoader::validate(&PipelineConfig::default()).is_ok());
    }
}
