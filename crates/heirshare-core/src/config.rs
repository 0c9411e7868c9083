//! Engine configuration
//!
//! Loaded from TOML (file or string) or from `HEIRSHARE_*` environment
//! variables. Every field has a default, so an empty document is valid.

use crate::error::{SuccessionError, SuccessionResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

/// What to do with a donation rule that names an heir missing from the shares map,
/// or that is malformed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownHeirPolicy {
    /// Fail the calculation
    Reject,
    /// Drop the rule and log it
    Ignore,
}

impl FromStr for UnknownHeirPolicy {
    type Err = SuccessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            other => Err(SuccessionError::configuration(
                "unknown_heir_policy",
                "reject | ignore",
                other,
                "unrecognised policy",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    #[serde(default = "default_unknown_heir_policy")]
    pub unknown_heir_policy: UnknownHeirPolicy,
    /// Upper bound on heir records in one forest
    #[serde(default = "default_max_heirs")]
    pub max_heirs: usize,
    /// Upper bound on representation nesting (a top-level heir has depth 0)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// A spouse who took the separate half is not also a beneficiary of the orders
    #[serde(default = "default_true")]
    pub spouse_half_excludes_orders: bool,
    /// Emit each redistribution warning as a `warn!` event
    #[serde(default = "default_true")]
    pub log_warnings: bool,
}

fn default_unknown_heir_policy() -> UnknownHeirPolicy {
    UnknownHeirPolicy::Reject
}

fn default_max_heirs() -> usize {
    512
}

fn default_max_depth() -> usize {
    32
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unknown_heir_policy: default_unknown_heir_policy(),
            max_heirs: default_max_heirs(),
            max_depth: default_max_depth(),
            spouse_half_excludes_orders: true,
            log_warnings: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> SuccessionResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| SuccessionError::Configuration {
            message: e.to_string(),
            setting: None,
            expected: Some("valid engine TOML".to_string()),
            actual: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading engine config {}", path.display()))?;
        let config = Self::from_toml_str(&source)
            .with_context(|| format!("parsing engine config {}", path.display()))?;
        info!(path = %path.display(), "loaded engine configuration");
        Ok(config)
    }

    /// Defaults overridden by `HEIRSHARE_*` environment variables.
    pub fn from_environment() -> SuccessionResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> SuccessionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(policy) = lookup("HEIRSHARE_UNKNOWN_HEIR_POLICY") {
            config.unknown_heir_policy = policy.parse()?;
        }
        if let Some(value) = lookup("HEIRSHARE_MAX_HEIRS") {
            config.max_heirs = parse_setting("max_heirs", &value)?;
        }
        if let Some(value) = lookup("HEIRSHARE_MAX_DEPTH") {
            config.max_depth = parse_setting("max_depth", &value)?;
        }
        if let Some(value) = lookup("HEIRSHARE_SPOUSE_HALF_EXCLUDES_ORDERS") {
            config.spouse_half_excludes_orders = parse_setting("spouse_half_excludes_orders", &value)?;
        }
        if let Some(value) = lookup("HEIRSHARE_LOG_WARNINGS") {
            config.log_warnings = parse_setting("log_warnings", &value)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SuccessionResult<()> {
        if self.max_heirs == 0 {
            return Err(SuccessionError::configuration(
                "max_heirs",
                "at least 1",
                "0",
                "a forest must be allowed to hold an heir",
            ));
        }
        if self.unknown_heir_policy == UnknownHeirPolicy::Ignore {
            warn!("unknown heir references will be dropped instead of rejected");
        }
        Ok(())
    }
}

fn parse_setting<T: FromStr>(setting: &str, value: &str) -> SuccessionResult<T> {
    value.trim().parse().map_err(|_| {
        SuccessionError::configuration(
            setting,
            std::any::type_name::<T>(),
            value,
            format!("cannot parse {setting}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.unknown_heir_policy, UnknownHeirPolicy::Reject);
        assert!(config.spouse_half_excludes_orders);
    }

    #[test]
    fn toml_overrides_fields() {
        let config = EngineConfig::from_toml_str(
            "unknown_heir_policy = \"ignore\"\nmax_depth = 4\nlog_warnings = false\n",
        )
        .unwrap();
        assert_eq!(config.unknown_heir_policy, UnknownHeirPolicy::Ignore);
        assert_eq!(config.max_depth, 4);
        assert!(!config.log_warnings);
        assert_eq!(config.max_heirs, 512);
    }

    #[test]
    fn zero_max_heirs_is_rejected() {
        let err = EngineConfig::from_toml_str("max_heirs = 0").unwrap_err();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn environment_lookup() {
        let env: HashMap<&str, &str> = [
            ("HEIRSHARE_UNKNOWN_HEIR_POLICY", "Ignore"),
            ("HEIRSHARE_MAX_HEIRS", "40"),
            ("HEIRSHARE_SPOUSE_HALF_EXCLUDES_ORDERS", "false"),
        ]
        .into_iter()
        .collect();
        let config = EngineConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.unknown_heir_policy, UnknownHeirPolicy::Ignore);
        assert_eq!(config.max_heirs, 40);
        assert!(!config.spouse_half_excludes_orders);
    }

    #[test]
    fn bad_environment_value() {
        let err = EngineConfig::from_lookup(|k| {
            (k == "HEIRSHARE_MAX_DEPTH").then(|| "deep".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, SuccessionError::Configuration { .. }));
    }
}
