// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detents: named height rules a sheet can rest at.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

/// Identifier for a [`Detent`].
///
/// Keys are compared by their string contents. Static names are stored without
/// allocating, so the well-known keys below are free to clone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DetentKey(Cow<'static, str>);

impl DetentKey {
    /// Key of [`Detent::content`].
    pub const CONTENT: Self = Self::new("content");
    /// Key of [`Detent::medium`].
    pub const MEDIUM: Self = Self::new("medium");
    /// Key of [`Detent::large`].
    pub const LARGE: Self = Self::new("large");

    /// Creates a key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for DetentKey {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DetentKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for DetentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a [`Detent`] maps to a concrete height.
///
/// Heights are measured in logical pixels upward from the bottom edge of the
/// container. Every rule resolves into `[0, maximum_value]`, see
/// [`DetentResolver::resolve_value`](crate::DetentResolver::resolve_value).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DetentRule {
    /// The preferred height reported by the presented content, plus the
    /// bottom safe-area inset.
    ContentSize,
    /// A fixed height.
    Fixed(f64),
    /// A fraction of the maximum available height.
    Fraction(f64),
    /// All of the available height.
    Largest,
}

/// A named target height the sheet can rest at.
///
/// Detents are immutable values created from caller configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Detent {
    key: DetentKey,
    rule: DetentRule,
}

impl Detent {
    /// Creates a detent with an explicit key and rule.
    #[must_use]
    pub const fn new(key: DetentKey, rule: DetentRule) -> Self {
        Self { key, rule }
    }

    /// A detent sized to the presented content.
    #[must_use]
    pub const fn content() -> Self {
        Self::new(DetentKey::CONTENT, DetentRule::ContentSize)
    }

    /// Half of the available height.
    #[must_use]
    pub const fn medium() -> Self {
        Self::new(DetentKey::MEDIUM, DetentRule::Fraction(0.5))
    }

    /// All of the available height.
    #[must_use]
    pub const fn large() -> Self {
        Self::new(DetentKey::LARGE, DetentRule::Largest)
    }

    /// All of the available height, under a custom key.
    #[must_use]
    pub fn largest(key: impl Into<DetentKey>) -> Self {
        Self::new(key.into(), DetentRule::Largest)
    }

    /// A detent with a fixed height.
    #[must_use]
    pub fn fixed(key: impl Into<DetentKey>, height: f64) -> Self {
        Self::new(key.into(), DetentRule::Fixed(height))
    }

    /// A detent covering `ratio` of the available height.
    #[must_use]
    pub fn fraction(key: impl Into<DetentKey>, ratio: f64) -> Self {
        Self::new(key.into(), DetentRule::Fraction(ratio))
    }

    /// Returns the detent key.
    #[must_use]
    pub fn key(&self) -> &DetentKey {
        &self.key
    }

    /// Returns the height rule.
    #[must_use]
    pub fn rule(&self) -> DetentRule {
        self.rule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn static_and_owned_keys_compare_by_contents() {
        let owned = DetentKey::from("medium".to_string());
        assert_eq!(owned, DetentKey::MEDIUM);
        assert_eq!(DetentKey::from("large"), DetentKey::LARGE);
        assert_eq!(DetentKey::LARGE.to_string(), "large");
    }

    #[test]
    fn well_known_detents() {
        assert_eq!(Detent::medium().rule(), DetentRule::Fraction(0.5));
        assert_eq!(Detent::large().rule(), DetentRule::Largest);
        assert_eq!(Detent::content().key(), &DetentKey::CONTENT);
        let fixed = Detent::fixed("peek", 120.0);
        assert_eq!(fixed.key().as_str(), "peek");
        assert_eq!(fixed.rule(), DetentRule::Fixed(120.0));
    }
}
