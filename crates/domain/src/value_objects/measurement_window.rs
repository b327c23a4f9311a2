use crate::error::{Result, YieldError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wall-clock time over which a position's rewards accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementWindow {
    pub duration_seconds: Decimal,
}

impl MeasurementWindow {
    /// Creates a window of `duration_seconds`.
    ///
    /// # Errors
    /// [`YieldError::InvalidDuration`] when the duration is not positive.
    pub fn new(duration_seconds: Decimal) -> Result<Self> {
        let window = Self { duration_seconds };
        window.validate()?;
        Ok(window)
    }

    /// Creates a window from whole seconds.
    ///
    /// # Errors
    /// [`YieldError::InvalidDuration`] for zero.
    pub fn from_secs(secs: u64) -> Result<Self> {
        Self::new(Decimal::from(secs))
    }

    /// Window between two instants, at millisecond resolution.
    ///
    /// # Errors
    /// [`YieldError::InvalidDuration`] unless `end` is after `start`.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let millis = (end - start).num_milliseconds();
        Self::new(Decimal::new(millis, 3))
    }

    /// # Errors
    /// [`YieldError::InvalidDuration`] when the duration is not positive.
    pub fn validate(&self) -> Result<()> {
        if self.duration_seconds <= Decimal::ZERO {
            return Err(YieldError::InvalidDuration {
                duration_seconds: self.duration_seconds,
            });
        }
        Ok(())
    }
}
