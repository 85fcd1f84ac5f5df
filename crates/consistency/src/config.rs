use std::time::Duration;

use shotline_core::consistency::{EntityFallbackPolicy, ScoringMode, SeverityPolicy, Tolerances};

/// Default upper bound on a single reference store call.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },
}

fn invalid(var: &'static str, message: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        message: message.to_string(),
    }
}

/// Consistency engine configuration loaded from environment variables.
///
/// All fields have defaults suitable for interactive editing.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub tolerances: Tolerances,
    pub severity_policy: SeverityPolicy,
    pub entity_fallback: EntityFallbackPolicy,
    pub scoring: ScoringMode,
    pub store_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            severity_policy: SeverityPolicy::default(),
            entity_fallback: EntityFallbackPolicy::default(),
            scoring: ScoringMode::default(),
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default           |
    /// |-----------------------------------|-------------------|
    /// | `CONSISTENCY_WEIGHT_TOLERANCE`    | `0.2`             |
    /// | `CONSISTENCY_INTENSITY_TOLERANCE` | `0.15`            |
    /// | `CONSISTENCY_PALETTE_TOLERANCE`   | `0.34`            |
    /// | `CONSISTENCY_PARAMETER_TOLERANCE` | `0.25`            |
    /// | `CONSISTENCY_ENTITY_FALLBACK`     | `inherit_nothing` |
    /// | `CONSISTENCY_SCORING`             | `uniform`         |
    /// | `CONSISTENCY_STORE_TIMEOUT_MS`    | `5000`            |
    /// | `CONSISTENCY_SEVERITY_POLICY`     | *(unset)*         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Tolerances::default();

        let tolerance = |var: &'static str, default: f64| -> Result<f64, ConfigError> {
            match lookup(var) {
                Some(raw) => raw.trim().parse::<f64>().map_err(|e| invalid(var, e)),
                None => Ok(default),
            }
        };

        let tolerances = Tolerances {
            weight: tolerance("CONSISTENCY_WEIGHT_TOLERANCE", defaults.weight)?,
            intensity: tolerance("CONSISTENCY_INTENSITY_TOLERANCE", defaults.intensity)?,
            palette: tolerance("CONSISTENCY_PALETTE_TOLERANCE", defaults.palette)?,
            parameter: tolerance("CONSISTENCY_PARAMETER_TOLERANCE", defaults.parameter)?,
        };
        tolerances
            .validate()
            .map_err(|e| invalid("CONSISTENCY_*_TOLERANCE", e))?;

        let entity_fallback = match lookup("CONSISTENCY_ENTITY_FALLBACK") {
            Some(raw) => EntityFallbackPolicy::parse(&raw)
                .map_err(|e| invalid("CONSISTENCY_ENTITY_FALLBACK", e))?,
            None => EntityFallbackPolicy::default(),
        };

        let scoring = match lookup("CONSISTENCY_SCORING") {
            Some(raw) => ScoringMode::parse(&raw).map_err(|e| invalid("CONSISTENCY_SCORING", e))?,
            None => ScoringMode::default(),
        };

        let store_timeout_ms = match lookup("CONSISTENCY_STORE_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid("CONSISTENCY_STORE_TIMEOUT_MS", e))?,
            None => DEFAULT_STORE_TIMEOUT_MS,
        };
        if store_timeout_ms == 0 {
            return Err(invalid("CONSISTENCY_STORE_TIMEOUT_MS", "must be > 0"));
        }

        let severity_policy = match lookup("CONSISTENCY_SEVERITY_POLICY") {
            Some(raw) if !raw.trim().is_empty() => SeverityPolicy::from_json(&raw)
                .map_err(|e| invalid("CONSISTENCY_SEVERITY_POLICY", e))?,
            _ => SeverityPolicy::default(),
        };

        Ok(Self {
            tolerances,
            severity_policy,
            entity_fallback,
            scoring,
            store_timeout: Duration::from_millis(store_timeout_ms),
        })
    }
}
