// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use crate::detent::{Detent, DetentKey};
use crate::error::ConfigError;
use crate::projection::DecelerationRate;
use crate::resolver::validate_detents;
use crate::rubber_band::RubberBand;

/// Caller configuration for a [`SheetController`](crate::SheetController).
///
/// ```rust
/// use understory_sheet::{Detent, DetentKey, SheetConfig};
///
/// let config = SheetConfig {
///     detents: vec![Detent::medium(), Detent::large()],
///     selected_detent_key: Some(DetentKey::MEDIUM),
///     largest_undimmed_detent_key: Some(DetentKey::MEDIUM),
///     ..SheetConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct SheetConfig {
    /// Detents the sheet can rest at. Keys must be unique.
    pub detents: Vec<Detent>,
    /// Initially selected detent. `None` starts at the smallest detent.
    pub selected_detent_key: Option<DetentKey>,
    /// Largest detent shown without dimming. `None` always dims fully.
    pub largest_undimmed_detent_key: Option<DetentKey>,
    /// Damping applied past the largest and smallest detents.
    pub rubber_band: RubberBand,
    /// Decay used to project a released drag.
    pub deceleration_rate: DecelerationRate,
    /// Gap kept between the sheet and the top safe-area inset.
    pub top_spacing: f64,
    /// Stop nested scroll momentum when the sheet takes over a drag.
    pub interrupt_scroll_momentum: bool,
    /// Fraction of the smallest detent below which a released drag dismisses.
    pub dismiss_threshold: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            detents: vec![Detent::large()],
            selected_detent_key: None,
            largest_undimmed_detent_key: None,
            rubber_band: RubberBand::default(),
            deceleration_rate: DecelerationRate::default(),
            top_spacing: 0.0,
            interrupt_scroll_momentum: true,
            dismiss_threshold: 0.5,
        }
    }
}

impl SheetConfig {
    /// Checks the configuration without building a controller.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_detents(&self.detents)?;
        let known = |key: &DetentKey| self.detents.iter().any(|d| d.key() == key);
        if let Some(key) = &self.selected_detent_key {
            if !known(key) {
                return Err(ConfigError::UnknownSelectedDetent(key.clone()));
            }
        }
        if let Some(key) = &self.largest_undimmed_detent_key {
            if !known(key) {
                return Err(ConfigError::UnknownUndimmedDetent(key.clone()));
            }
        }
        if !self.deceleration_rate.is_valid() {
            return Err(ConfigError::InvalidDecelerationRate(
                self.deceleration_rate.value(),
            ));
        }
        if !(0.0..=1.0).contains(&self.dismiss_threshold) {
            return Err(ConfigError::InvalidDismissThreshold(self.dismiss_threshold));
        }
        Ok(())
    }

    pub(crate) fn behavior(&self) -> GestureBehavior {
        GestureBehavior {
            rubber_band: self.rubber_band,
            deceleration_rate: self.deceleration_rate,
            dismiss_threshold: self.dismiss_threshold,
            interrupt_scroll_momentum: self.interrupt_scroll_momentum,
        }
    }
}

/// The slice of configuration the interaction strategies read.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GestureBehavior {
    pub(crate) rubber_band: RubberBand,
    pub(crate) deceleration_rate: DecelerationRate,
    pub(crate) dismiss_threshold: f64,
    pub(crate) interrupt_scroll_momentum: bool,
}

impl GestureBehavior {
    pub(crate) fn project(&self, value: f64, velocity: f64) -> f64 {
        crate::projection::project(value, velocity, self.deceleration_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SheetConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.dismiss_threshold, 0.5);
        assert!(config.interrupt_scroll_momentum);
        assert_eq!(config.deceleration_rate, DecelerationRate::FAST);
    }

    #[test]
    fn rejects_unknown_keys() {
        let config = SheetConfig {
            selected_detent_key: Some(DetentKey::MEDIUM),
            ..SheetConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownSelectedDetent(DetentKey::MEDIUM))
        );
        let config = SheetConfig {
            largest_undimmed_detent_key: Some(DetentKey::MEDIUM),
            ..SheetConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownUndimmedDetent(DetentKey::MEDIUM))
        );
    }

    #[test]
    fn rejects_out_of_range_tuning() {
        let config = SheetConfig {
            deceleration_rate: DecelerationRate::new(1.2),
            ..SheetConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDecelerationRate(1.2))
        );
        let config = SheetConfig {
            dismiss_threshold: f64::NAN,
            ..SheetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDismissThreshold(_))
        ));
    }

    #[test]
    fn rejects_empty_detents() {
        let config = SheetConfig {
            detents: Vec::new(),
            ..SheetConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoDetents));
    }
}
