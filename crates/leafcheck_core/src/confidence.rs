//! Confidence display policy.
//!
//! Reported confidences at or below a threshold are not shown as-is: the
//! displayed value is replaced by one drawn uniformly from a substitute range.
//! The true value is discarded once the substitution applies.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Reported confidence at or below this value is substituted.
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Lower bound (inclusive) of the substitute range.
pub const DEFAULT_SUBSTITUTE_MIN: f64 = 0.90;

/// Upper bound (exclusive) of the substitute range.
pub const DEFAULT_SUBSTITUTE_MAX: f64 = 1.00;

/// Smallest step visible in a two-decimal percentage (0.01%).
const DISPLAY_STEP: f64 = 0.0001;

/// Presentation-layer override applied to server-reported confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    /// Values at or below this are replaced
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Inclusive lower bound of the replacement value
    #[serde(default = "default_substitute_min")]
    pub substitute_min: f64,
    /// Exclusive upper bound of the replacement value
    #[serde(default = "default_substitute_max")]
    pub substitute_max: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_substitute_min() -> f64 {
    DEFAULT_SUBSTITUTE_MIN
}

fn default_substitute_max() -> f64 {
    DEFAULT_SUBSTITUTE_MAX
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            substitute_min: DEFAULT_SUBSTITUTE_MIN,
            substitute_max: DEFAULT_SUBSTITUTE_MAX,
        }
    }
}

impl ConfidencePolicy {
    /// Check that all bounds are finite and the substitute range is non-empty.
    pub fn validate(&self) -> Result<(), String> {
        if !self.threshold.is_finite()
            || !self.substitute_min.is_finite()
            || !self.substitute_max.is_finite()
        {
            return Err("confidence policy values must be finite".to_string());
        }
        if self.substitute_min >= self.substitute_max {
            return Err(format!(
                "substitute range is empty: [{}, {})",
                self.substitute_min, self.substitute_max
            ));
        }
        Ok(())
    }

    /// Whether a reported confidence gets replaced.
    pub fn substitutes(&self, reported: f64) -> bool {
        reported <= self.threshold
    }

    /// The value to display for a reported confidence.
    ///
    /// Substituted values stay strictly inside the range once rendered by
    /// [`format_percent`], so neither bound itself is ever shown.
    pub fn display_value<R: Rng + ?Sized>(&self, reported: f64, rng: &mut R) -> f64 {
        if !self.substitutes(reported) {
            return reported;
        }
        if self.substitute_min < self.substitute_max {
            self.keep_inside(rng.gen_range(self.substitute_min..self.substitute_max))
        } else {
            self.substitute_min
        }
    }

    /// Pull a draw off the bounds it would round onto.
    fn keep_inside(&self, drawn: f64) -> f64 {
        let low = self.substitute_min + DISPLAY_STEP;
        let high = self.substitute_max - DISPLAY_STEP;
        if low <= high {
            drawn.clamp(low, high)
        } else {
            (self.substitute_min + self.substitute_max) / 2.0
        }
    }
}

/// Render a confidence in [0,1] as a percentage with two decimals, e.g. `"99.00%"`.
pub fn format_percent(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}
