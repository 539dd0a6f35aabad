// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::detent::DetentKey;

/// Error returned when a sheet configuration is rejected.
///
/// Only construction validates; once a sheet is running none of its
/// operations fail.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The detent list is empty.
    NoDetents,
    /// Two detents share the same key.
    DuplicateDetentKey(DetentKey),
    /// The initially selected detent is not in the detent list.
    UnknownSelectedDetent(DetentKey),
    /// The largest undimmed detent is not in the detent list.
    UnknownUndimmedDetent(DetentKey),
    /// A fixed detent height is negative or not finite.
    InvalidFixedHeight {
        /// The offending detent.
        key: DetentKey,
        /// The rejected height.
        height: f64,
    },
    /// A fractional detent ratio is outside `[0, 1]`.
    InvalidFraction {
        /// The offending detent.
        key: DetentKey,
        /// The rejected ratio.
        ratio: f64,
    },
    /// The deceleration rate is outside `(0, 1)`.
    InvalidDecelerationRate(f64),
    /// The dismiss threshold is outside `[0, 1]`.
    InvalidDismissThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDetents => f.write_str("a sheet needs at least one detent"),
            Self::DuplicateDetentKey(key) => write!(f, "detent key `{key}` is used more than once"),
            Self::UnknownSelectedDetent(key) => {
                write!(f, "selected detent `{key}` is not in the detent list")
            }
            Self::UnknownUndimmedDetent(key) => {
                write!(f, "largest undimmed detent `{key}` is not in the detent list")
            }
            Self::InvalidFixedHeight { key, height } => {
                write!(f, "detent `{key}` has an invalid fixed height {height}")
            }
            Self::InvalidFraction { key, ratio } => {
                write!(f, "detent `{key}` has a fraction {ratio} outside [0, 1]")
            }
            Self::InvalidDecelerationRate(rate) => {
                write!(f, "deceleration rate {rate} is outside (0, 1)")
            }
            Self::InvalidDismissThreshold(threshold) => {
                write!(f, "dismiss threshold {threshold} is outside [0, 1]")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
