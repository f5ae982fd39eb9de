//! Scope policy
//!
//! Three levels, mirroring the rest of codegraph:
//! - Level 1: `ScopePolicy::preset(Dialect::Go)`
//! - Level 2: builder overrides (`.force_capture(true)`)
//! - Level 3: YAML (`ScopePolicy::from_yaml("policy.yaml")`)

use super::error::{ConfigError, ConfigResult};
use super::io::{PolicyExportV1, PolicyOverrides};
use super::preset::Dialect;
use super::validation::{check_scope_depth, check_synthetic_prefixes, Validatable};
use crate::shared::constants::{policy, scope};
use serde::{Deserialize, Serialize};

/// Lexical rules a scope tree is built under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopePolicy {
    pub dialect: Dialect,
    /// Set on the root scope and inherited by every descendant
    pub force_capture: bool,
    pub switch_auto_break: bool,
    /// Names starting with one of these are hidden from `all_variable_names`
    pub synthetic_prefixes: Vec<String>,
    pub max_scope_depth: usize,
}

impl ScopePolicy {
    pub fn preset(dialect: Dialect) -> Self {
        Self {
            dialect,
            force_capture: dialect.force_capture(),
            switch_auto_break: dialect.switch_auto_break(),
            synthetic_prefixes: vec![policy::DEFAULT_SYNTHETIC_PREFIX.to_string()],
            max_scope_depth: scope::DEFAULT_MAX_SCOPE_DEPTH,
        }
    }

    pub fn force_capture(mut self, force_capture: bool) -> Self {
        self.force_capture = force_capture;
        self
    }

    pub fn switch_auto_break(mut self, auto_break: bool) -> Self {
        self.switch_auto_break = auto_break;
        self
    }

    pub fn synthetic_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synthetic_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_scope_depth(mut self, depth: usize) -> Self {
        self.max_scope_depth = depth;
        self
    }

    /// Validate and return the policy
    pub fn build(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Empty names and configured prefixes mark compiler-generated bindings
    pub fn is_synthetic(&self, name: &str) -> bool {
        name.is_empty()
            || self
                .synthetic_prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str()))
    }

    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: PolicyExportV1 = serde_yaml::from_str(content)?;

        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(policy::SCHEMA_VERSION) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    expected: policy::SCHEMA_VERSION,
                })
            }
        }

        let dialect = Dialect::from_str(&export.preset)
            .map_err(|_| ConfigError::UnknownDialect(export.preset.clone()))?;

        let mut config = Self::preset(dialect);
        if let Some(overrides) = export.overrides {
            if let Some(force_capture) = overrides.force_capture {
                config.force_capture = force_capture;
            }
            if let Some(auto_break) = overrides.switch_auto_break {
                config.switch_auto_break = auto_break;
            }
            if let Some(prefixes) = overrides.synthetic_prefixes {
                config.synthetic_prefixes = prefixes;
            }
            if let Some(depth) = overrides.max_scope_depth {
                config.max_scope_depth = depth;
            }
        }

        config.build()
    }

    /// Export as YAML, writing only the fields that differ from the preset
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let base = Self::preset(self.dialect);
        let overrides = PolicyOverrides {
            force_capture: (self.force_capture != base.force_capture).then_some(self.force_capture),
            switch_auto_break: (self.switch_auto_break != base.switch_auto_break)
                .then_some(self.switch_auto_break),
            synthetic_prefixes: (self.synthetic_prefixes != base.synthetic_prefixes)
                .then(|| self.synthetic_prefixes.clone()),
            max_scope_depth: (self.max_scope_depth != base.max_scope_depth)
                .then_some(self.max_scope_depth),
        };

        let export = PolicyExportV1 {
            version: Some(policy::SCHEMA_VERSION),
            preset: self.dialect.to_string(),
            overrides: Some(overrides),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

impl Default for ScopePolicy {
    fn default() -> Self {
        Self::preset(Dialect::default())
    }
}

impl Validatable for ScopePolicy {
    fn validate(&self) -> ConfigResult<()> {
        check_scope_depth(self.max_scope_depth)?;
        check_synthetic_prefixes(&self.synthetic_prefixes)
    }
}
