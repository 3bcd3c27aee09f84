//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading scheme
//! configurations from YAML or JSON files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{PolicyDocument, PolicyParameters, SchemeConfig, SchemeMetadata};

/// Loads and provides access to credit scheme configuration.
///
/// The `ConfigLoader` reads configuration files from a directory
/// and provides the policy parameters effective for a tax year.
///
/// # Directory Structure
///
/// ```text
/// config/integrated_employment/
/// ├── scheme.yaml          # Scheme metadata
/// └── policies/
///     └── 2024.yaml        # Policy parameters effective from tax year 2024
/// ```
///
/// Policy files may be YAML (`.yaml`, `.yml`) or JSON (`.json`).
///
/// # Example
///
/// ```no_run
/// use employment_credit::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/integrated_employment").unwrap();
/// let policy = loader.get_policy(2024).unwrap();
/// println!("Min tax limit: {:?}", policy.min_tax_limit_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SchemeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `scheme.yaml` or the `policies` directory is missing
    /// - Any file is malformed or uses an unknown size/region label
    /// - Any policy fails validation
    /// - Two policy files share an effective tax year
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_document::<SchemeMetadata>(&path.join("scheme.yaml"))?;
        let policies = Self::load_policies(&path.join("policies"))?;

        Ok(Self {
            config: SchemeConfig::new(metadata, policies),
        })
    }

    /// Loads a standalone policy parameters document.
    ///
    /// The document uses the flat format without `effective_tax_year`. Files ending
    /// in `.json` are parsed as JSON, everything else as YAML.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use employment_credit::config::ConfigLoader;
    ///
    /// let policy = ConfigLoader::load_policy_file("./params.json")?;
    /// # Ok::<(), employment_credit::error::EngineError>(())
    /// ```
    pub fn load_policy_file<P: AsRef<Path>>(path: P) -> EngineResult<PolicyParameters> {
        let path = path.as_ref();
        let parameters = Self::load_document::<PolicyParameters>(path)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Parses a policy parameters document from a YAML string.
    pub fn policy_from_yaml_str(content: &str) -> EngineResult<PolicyParameters> {
        let parameters: PolicyParameters =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline yaml>".to_string(),
                message: e.to_string(),
            })?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Parses a policy parameters document from a JSON string.
    pub fn policy_from_json_str(content: &str) -> EngineResult<PolicyParameters> {
        let parameters: PolicyParameters =
            serde_json::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline json>".to_string(),
                message: e.to_string(),
            })?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Loads and parses a YAML or JSON file.
    fn load_document<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })
        } else {
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })
        }
    }

    /// Loads all policy files from the policies directory.
    fn load_policies(policies_dir: &Path) -> EngineResult<Vec<PolicyDocument>> {
        let policies_dir_str = policies_dir.display().to_string();

        let entries = fs::read_dir(policies_dir).map_err(|_| EngineError::ConfigNotFound {
            path: policies_dir_str.clone(),
        })?;

        let mut policies: Vec<PolicyDocument> = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: policies_dir_str.clone(),
            })?;

            let path = entry.path();
            let is_policy_file = path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml" || ext == "json");
            if !is_policy_file {
                continue;
            }

            let document = Self::load_document::<PolicyDocument>(&path)?;
            document.parameters.validate()?;

            if policies
                .iter()
                .any(|p| p.effective_tax_year == document.effective_tax_year)
            {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "duplicate policy for effective tax year {}",
                        document.effective_tax_year
                    ),
                });
            }

            policies.push(document);
        }

        if policies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no policy files found)", policies_dir_str),
            });
        }

        Ok(policies)
    }

    /// Returns the underlying scheme configuration.
    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Gets the policy parameters effective for a tax year.
    ///
    /// Returns the policy with the latest effective year on or before `tax_year`.
    pub fn get_policy(&self, tax_year: i32) -> EngineResult<&PolicyParameters> {
        self.config
            .policies()
            .iter()
            .rfind(|p| p.effective_tax_year <= tax_year)
            .map(|p| &p.parameters)
            .ok_or(EngineError::PolicyNotFound { tax_year })
    }

    /// Returns the most recent policy and its effective tax year.
    pub fn latest_policy(&self) -> (i32, &PolicyParameters) {
        // load() guarantees at least one policy
        let latest = &self.config.policies()[self.config.policies().len() - 1];
        (latest.effective_tax_year, &latest.parameters)
    }
}
