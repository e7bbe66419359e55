//! Training configuration with builder pattern.
//!
//! [`TreeConfig`] uses the `bon` crate for builder generation with
//! validation at build time.
//!
//! # Example
//!
//! ```
//! use digitree::training::TreeConfig;
//!
//! // All defaults
//! let config = TreeConfig::builder().build().unwrap();
//!
//! // Customize the stopping rule
//! let config = TreeConfig::builder()
//!     .threshold_ratio(0.95)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;

// =============================================================================
// Verbosity
// =============================================================================

/// How chatty training is on stderr.
///
/// Diagnostics never touch stdout; the drivers reserve stdout for the
/// single result integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Report tree shape (nodes, leaves, depth) after a build.
    Info,
}

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Threshold ratio must be in (0, 1].
    InvalidThresholdRatio(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidThresholdRatio(v) => {
                write!(f, "threshold_ratio must be in (0, 1], got {}", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// TreeConfig
// =============================================================================

/// Configuration for decision-tree training.
///
/// The only hyperparameter of the induction algorithm is the stopping
/// threshold: recursion stops once the majority label's share of a subset
/// strictly exceeds `threshold_ratio`, emitting a leaf with that label.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct TreeConfig {
    /// Stopping rule: emit a leaf once the majority label's share exceeds
    /// this ratio. Must be in (0, 1]. Default: 0.9.
    ///
    /// At 1.0 recursion continues until subsets are fully pure or no pixel
    /// separates them.
    #[builder(default = 0.9)]
    pub threshold_ratio: f64,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: tree_config_builder::IsComplete> TreeConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `threshold_ratio` is outside (0, 1].
    pub fn build(self) -> Result<TreeConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl TreeConfig {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold_ratio > 0.0 && self.threshold_ratio <= 1.0) {
            return Err(ConfigError::InvalidThresholdRatio(self.threshold_ratio));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TreeConfig::builder().build().unwrap();
        assert_eq!(config.threshold_ratio, 0.9);
        assert_eq!(config.verbosity, Verbosity::Silent);
    }

    #[test]
    fn custom_threshold() {
        let config = TreeConfig::builder().threshold_ratio(0.75).build().unwrap();
        assert_eq!(config.threshold_ratio, 0.75);
    }

    #[test]
    fn rejects_zero_threshold() {
        let result = TreeConfig::builder().threshold_ratio(0.0).build();
        assert_eq!(result.unwrap_err(), ConfigError::InvalidThresholdRatio(0.0));
    }

    #[test]
    fn rejects_threshold_above_one() {
        let result = TreeConfig::builder().threshold_ratio(1.5).build();
        assert!(matches!(result, Err(ConfigError::InvalidThresholdRatio(_))));
    }

    #[test]
    fn rejects_nan_threshold() {
        let result = TreeConfig::builder().threshold_ratio(f64::NAN).build();
        assert!(matches!(result, Err(ConfigError::InvalidThresholdRatio(_))));
    }
}
