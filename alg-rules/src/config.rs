//! Runtime configuration of the rule engine.

use once_cell::sync::Lazy;
use std::env;

/// The environment variable that turns on rule debugging when set to `1` or `true`.
pub const DEBUG_VAR: &str = "ALG_DEBUG";

/// Options that apply to every rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleConfig {
    /// If true, [`Rule::apply_to`](crate::Rule::apply_to) checks that the rule can be applied to
    /// the node it is given, and panics if it cannot.
    pub debug: bool,
}

impl RuleConfig {
    /// Builds the configuration from the value of [`DEBUG_VAR`], if it is set. The `debug-rules`
    /// feature forces debugging on.
    pub fn from_value(value: Option<&str>) -> Self {
        let requested = value
            .map(|value| value.trim().to_ascii_lowercase())
            .is_some_and(|value| value == "1" || value == "true");
        Self {
            debug: cfg!(feature = "debug-rules") || requested,
        }
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_value(env::var(DEBUG_VAR).ok().as_deref())
    }
}

static CONFIG: Lazy<RuleConfig> = Lazy::new(RuleConfig::from_env);

/// Returns the configuration read from the environment the first time it is needed.
pub fn config() -> &'static RuleConfig {
    &CONFIG
}
