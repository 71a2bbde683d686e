use thiserror::Error;

/// Configuration for the golden section solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
    max_depth: usize,
}

/// Errors that can occur when validating a golden section solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must lie strictly between 0 and 1, got {0}")]
    Tolerance(f64),

    #[error("max_depth must be at least 1")]
    MaxDepth,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_depth: 500,
        }
    }
}

impl Config {
    /// Creates a new config with a validated tolerance.
    ///
    /// The tolerance is relative: the search converges once the bracket width
    /// drops below `tolerance * (|mid| + |x|)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is outside `(0, 1)` or `max_depth` is zero.
    pub fn new(tolerance: f64, max_depth: usize) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0 && tolerance < 1.0) {
            return Err(ConfigError::Tolerance(tolerance));
        }
        if max_depth == 0 {
            return Err(ConfigError::MaxDepth);
        }

        Ok(Self {
            tolerance,
            max_depth,
        })
    }

    /// Creates a config with the given tolerance and the default depth limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is outside `(0, 1)`.
    pub fn with_tolerance(tolerance: f64) -> Result<Self, ConfigError> {
        Self::new(tolerance, Self::default().max_depth)
    }

    /// Returns the relative convergence tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the maximum recursion depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
