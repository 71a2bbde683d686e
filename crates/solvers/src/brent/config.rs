use thiserror::Error;

/// Configuration for Brent's method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
    max_iters: usize,
}

/// Errors that can occur when validating a Brent config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {0}")]
    Tolerance(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iters: 50,
        }
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// The tolerance is absolute: iteration stops once `|b - a| <= tolerance`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive.
    pub fn new(tolerance: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance(tolerance));
        }
        Ok(Self {
            tolerance,
            max_iters,
        })
    }

    /// Creates a config with the given tolerance and the default cap of 50 iterations.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive.
    pub fn with_tolerance(tolerance: f64) -> Result<Self, ConfigError> {
        Self::new(tolerance, Self::default().max_iters)
    }

    /// Returns the absolute bracket tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the iteration cap.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}
