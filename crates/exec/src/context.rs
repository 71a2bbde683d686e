use std::collections::HashMap;

use hypersearch_core::Point;

/// Memo cache and best-result record for one search run.
///
/// Keys are real-space parameter values, already demapped and rounded, so
/// two coordinates that name the same argument share one entry. Create a
/// fresh context per search; independent searches never share state.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    cache: HashMap<u64, f64>,
    best: Option<Point>,
}

impl SearchContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached loss for `param`, if it has been evaluated.
    #[must_use]
    pub fn lookup(&self, param: f64) -> Option<f64> {
        self.cache.get(&key(param)).copied()
    }

    /// Records a fresh measurement and returns true if it is the new best.
    ///
    /// The first measurement for a value wins; later ones are ignored. The
    /// best result moves whenever a loss is less than or equal to the current
    /// best, so ties go to the newest evaluation. NaN losses never become
    /// the best.
    pub fn record(&mut self, param: f64, loss: f64) -> bool {
        if self.cache.contains_key(&key(param)) {
            return false;
        }
        self.cache.insert(key(param), loss);

        let improves = !loss.is_nan() && self.best.is_none_or(|best| loss <= best.loss);
        if improves {
            self.best = Some(Point::new(param, loss));
        }
        improves
    }

    /// Returns the best `(param, loss)` seen so far.
    #[must_use]
    pub fn best(&self) -> Option<Point> {
        self.best
    }

    /// Returns how many distinct values have been evaluated.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Bit pattern used as the cache key; `-0.0` and `0.0` share a key.
fn key(param: f64) -> u64 {
    if param == 0.0 { 0.0_f64.to_bits() } else { param.to_bits() }
}
