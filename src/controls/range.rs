/*
 * Shared bounded-value state for progress bars and sliders. The write rules
 * are deliberately asymmetric: moving an endpoint into an invalid position is
 * rejected and leaves the state untouched, while writing a value outside the
 * range silently clamps to the nearest endpoint.
 */

use crate::error::{Error, Result};

/// A committed value change, with both endpoints for event payloads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeChange {
    pub previous: f64,
    pub current: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeState {
    minimum: f64,
    maximum: f64,
    value: f64,
    small_change: f64,
    large_change: f64,
}

impl Default for RangeState {
    fn default() -> RangeState {
        RangeState {
            minimum: 0.0,
            maximum: 100.0,
            value: 0.0,
            small_change: 1.0,
            large_change: 5.0,
        }
    }
}

impl RangeState {
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn small_change(&self) -> f64 {
        self.small_change
    }

    pub fn large_change(&self) -> f64 {
        self.large_change
    }

    pub fn set_small_change(&mut self, step: f64) -> Result<()> {
        if step <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "small change must be positive, got {step}"
            )));
        }
        self.small_change = step;
        Ok(())
    }

    pub fn set_large_change(&mut self, step: f64) -> Result<()> {
        if step <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "large change must be positive, got {step}"
            )));
        }
        self.large_change = step;
        Ok(())
    }

    /// Raises the ceiling. Rejected if `maximum` would not stay above the
    /// minimum; the current value is clamped under the new ceiling.
    pub fn set_maximum(&mut self, maximum: f64) -> Result<Option<RangeChange>> {
        if maximum <= self.minimum {
            return Err(Error::InvalidRange(format!(
                "maximum {maximum} must exceed minimum {}",
                self.minimum
            )));
        }
        self.maximum = maximum;
        Ok(self.clamp_value())
    }

    /// Lowers the floor. Rejected if `minimum` would not stay below the
    /// maximum; the current value is clamped above the new floor.
    pub fn set_minimum(&mut self, minimum: f64) -> Result<Option<RangeChange>> {
        if minimum >= self.maximum {
            return Err(Error::InvalidRange(format!(
                "minimum {minimum} must stay below maximum {}",
                self.maximum
            )));
        }
        self.minimum = minimum;
        Ok(self.clamp_value())
    }

    /// Writes a value, clamping into the range. Returns the change if the
    /// stored value actually moved.
    pub fn set_value(&mut self, value: f64) -> Option<RangeChange> {
        let clamped = value.clamp(self.minimum, self.maximum);
        if clamped == self.value {
            return None;
        }
        let change = RangeChange {
            previous: self.value,
            current: clamped,
        };
        self.value = clamped;
        Some(change)
    }

    /// Fraction of the range the current value covers, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        let span = self.maximum - self.minimum;
        if span <= 0.0 {
            0.0
        } else {
            (self.value - self.minimum) / span
        }
    }

    fn clamp_value(&mut self) -> Option<RangeChange> {
        self.set_value(self.value)
    }
}
