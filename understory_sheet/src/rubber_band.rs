// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overscroll damping applied when a drag pushes past a hard limit.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`

/// Damping curve mapping a raw excess distance past a limit to the distance the
/// sheet actually moves.
///
/// Every variant maps `0` to `0` and negative input is treated as `0`.
#[derive(Clone, Copy, Debug)]
pub enum RubberBand {
    /// `factor · √excess`. The default uses a factor of `2`.
    SquareRoot {
        /// Multiplier applied to the square root.
        factor: f64,
    },
    /// No damping; the sheet follows the pointer past the limit.
    Linear,
    /// The sheet stops hard at the limit.
    Rigid,
    /// Caller-supplied curve.
    Custom(fn(f64) -> f64),
}

impl Default for RubberBand {
    fn default() -> Self {
        Self::SquareRoot { factor: 2.0 }
    }
}

impl RubberBand {
    /// Maps a raw excess distance to the damped distance.
    #[must_use]
    pub fn apply(self, excess: f64) -> f64 {
        let excess = if excess.is_nan() { 0.0 } else { excess.max(0.0) };
        match self {
            Self::SquareRoot { factor } => factor * excess.sqrt(),
            Self::Linear => excess,
            Self::Rigid => 0.0,
            Self::Custom(curve) => curve(excess),
        }
    }

    /// Damps `value` outside `[lower, upper]`, leaving values inside untouched.
    #[must_use]
    pub fn constrain(self, value: f64, lower: f64, upper: f64) -> f64 {
        if value > upper {
            upper + self.apply(value - upper)
        } else if value < lower {
            lower - self.apply(lower - value)
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RubberBand;

    #[test]
    fn default_is_twice_the_square_root() {
        let band = RubberBand::default();
        for e in [0.0, 0.25, 1.0, 4.0, 9.0, 100.0] {
            assert!((band.apply(e) - 2.0 * e.sqrt()).abs() < 1e-12, "e = {e}");
        }
    }

    #[test]
    fn default_slope_drops_below_one_past_unit_excess() {
        let band = RubberBand::default();
        let mut e = 1.0;
        while e < 1_000.0 {
            let slope = band.apply(e + 0.5) - band.apply(e);
            assert!(slope < 0.5, "slope {slope} at {e}");
            e += 7.5;
        }
        assert!(band.apply(400.0) < 400.0);
    }

    #[test]
    fn negative_and_nan_excess_are_zero() {
        let band = RubberBand::default();
        assert_eq!(band.apply(-5.0), 0.0);
        assert_eq!(band.apply(f64::NAN), 0.0);
    }

    #[test]
    fn constrain_damps_both_sides() {
        let band = RubberBand::default();
        assert_eq!(band.constrain(150.0, 100.0, 200.0), 150.0);
        assert_eq!(band.constrain(216.0, 100.0, 200.0), 208.0);
        assert_eq!(band.constrain(84.0, 100.0, 200.0), 92.0);
        assert_eq!(RubberBand::Rigid.constrain(250.0, 100.0, 200.0), 200.0);
        assert_eq!(RubberBand::Linear.constrain(250.0, 100.0, 200.0), 250.0);
    }

    #[test]
    fn custom_curve_is_used() {
        let band = RubberBand::Custom(|e| e / 4.0);
        assert_eq!(band.apply(40.0), 10.0);
    }
}
