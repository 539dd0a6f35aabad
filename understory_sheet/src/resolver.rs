// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Size};
use smallvec::SmallVec;

use crate::detent::{Detent, DetentKey, DetentRule};
use crate::error::ConfigError;

/// Container geometry reported by the host on every layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetMetrics {
    /// Size of the container the sheet is presented in.
    pub container: Size,
    /// Safe-area insets of the container. `y0` is the top inset and `y1` the
    /// bottom inset.
    pub safe_area: Insets,
}

impl SheetMetrics {
    /// Metrics for a container with no safe-area insets.
    #[must_use]
    pub const fn new(container: Size) -> Self {
        Self {
            container,
            safe_area: Insets::ZERO,
        }
    }

    /// Returns these metrics with the given safe-area insets.
    #[must_use]
    pub const fn with_safe_area(mut self, safe_area: Insets) -> Self {
        self.safe_area = safe_area;
        self
    }
}

impl Default for SheetMetrics {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

/// Holds the detent list and the selected detent, and resolves detents to
/// concrete heights for the current container geometry.
///
/// Resolved heights are recomputed whenever an input changes (metrics, content
/// height, keyboard height, top spacing, or the detent list) and whenever
/// [`invalidate_detents`](Self::invalidate_detents) is called. Queries read the
/// most recent resolution.
///
/// Smallest and largest are decided by resolved value, not by declaration
/// order, so the detent list does not need to be sorted.
///
/// ```rust
/// use kurbo::Size;
/// use understory_sheet::{Detent, DetentKey, DetentResolver, SheetMetrics};
///
/// let mut resolver = DetentResolver::new(
///     [Detent::fixed("medium", 300.0), Detent::fixed("large", 700.0)],
///     Some(DetentKey::MEDIUM),
/// )
/// .unwrap();
/// resolver.set_metrics(SheetMetrics::new(Size::new(400.0, 800.0)));
///
/// assert_eq!(resolver.resolve_current_detent_value(), 300.0);
/// assert_eq!(resolver.select_nearest_detent(650.0), Some(DetentKey::LARGE));
/// assert_eq!(resolver.resolve_current_detent_value(), 700.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DetentResolver {
    detents: SmallVec<[Detent; 4]>,
    selected: Option<DetentKey>,
    metrics: SheetMetrics,
    top_spacing: f64,
    keyboard_height: f64,
    content_height: Option<f64>,
    maximum_value: f64,
    resolved: SmallVec<[f64; 4]>,
    revision: u64,
}

impl DetentResolver {
    /// Creates a resolver over `detents` with an optional initial selection.
    ///
    /// Rejects an empty list, duplicate keys, invalid fixed heights or
    /// fractions, and a selection that is not in the list.
    pub fn new(
        detents: impl IntoIterator<Item = Detent>,
        selected: Option<DetentKey>,
    ) -> Result<Self, ConfigError> {
        let detents: SmallVec<[Detent; 4]> = detents.into_iter().collect();
        validate_detents(&detents)?;
        if let Some(key) = &selected {
            if !detents.iter().any(|d| d.key() == key) {
                return Err(ConfigError::UnknownSelectedDetent(key.clone()));
            }
        }
        let mut resolver = Self {
            detents,
            selected,
            ..Self::default()
        };
        resolver.invalidate_detents();
        Ok(resolver)
    }

    /// Returns the detents in declaration order.
    #[must_use]
    pub fn detents(&self) -> &[Detent] {
        &self.detents
    }

    /// Replaces the detent list.
    ///
    /// If the current selection is no longer present it is cleared, which
    /// makes the smallest detent current. Returns whether the selection was
    /// cleared.
    pub fn set_detents(
        &mut self,
        detents: impl IntoIterator<Item = Detent>,
    ) -> Result<bool, ConfigError> {
        let detents: SmallVec<[Detent; 4]> = detents.into_iter().collect();
        validate_detents(&detents)?;
        self.detents = detents;
        let cleared = match &self.selected {
            Some(key) if self.index_of(key).is_none() => {
                self.selected = None;
                true
            }
            _ => false,
        };
        self.invalidate_detents();
        Ok(cleared)
    }

    /// Returns the selected detent key, if any.
    #[must_use]
    pub fn selected_detent_key(&self) -> Option<&DetentKey> {
        self.selected.as_ref()
    }

    /// Selects a detent by key.
    ///
    /// Unknown keys are ignored. Returns `true` if the selection changed.
    pub fn set_selected_detent_key(&mut self, key: Option<DetentKey>) -> bool {
        if let Some(key) = &key {
            if self.index_of(key).is_none() {
                log::debug!("ignoring selection of unknown detent `{key}`");
                return false;
            }
        }
        if self.selected == key {
            return false;
        }
        self.selected = key;
        true
    }

    /// Returns the current container metrics.
    #[must_use]
    pub fn metrics(&self) -> SheetMetrics {
        self.metrics
    }

    /// Updates the container metrics and re-resolves.
    pub fn set_metrics(&mut self, metrics: SheetMetrics) {
        if self.metrics == metrics {
            return;
        }
        self.metrics = metrics;
        self.invalidate_detents();
    }

    /// Returns the gap kept between the sheet and the top safe-area inset.
    #[must_use]
    pub fn top_spacing(&self) -> f64 {
        self.top_spacing
    }

    /// Sets the gap kept between the sheet and the top safe-area inset.
    pub fn set_top_spacing(&mut self, top_spacing: f64) {
        if self.top_spacing == top_spacing {
            return;
        }
        self.top_spacing = top_spacing;
        self.invalidate_detents();
    }

    /// Returns the height of the keyboard overlapping the sheet.
    #[must_use]
    pub fn keyboard_height(&self) -> f64 {
        self.keyboard_height
    }

    /// Sets the height of the keyboard overlapping the sheet and re-resolves.
    pub fn set_keyboard_height(&mut self, height: f64) {
        let height = sanitize(height);
        if self.keyboard_height == height {
            return;
        }
        self.keyboard_height = height;
        self.invalidate_detents();
    }

    /// Returns the preferred content height, if the content reported one.
    #[must_use]
    pub fn content_height(&self) -> Option<f64> {
        self.content_height
    }

    /// Sets the preferred content height used by content-sized detents.
    pub fn set_content_height(&mut self, height: Option<f64>) {
        let height = height.map(sanitize);
        if self.content_height == height {
            return;
        }
        self.content_height = height;
        self.invalidate_detents();
    }

    /// Returns the maximum height available to the sheet.
    #[must_use]
    pub fn maximum_value(&self) -> f64 {
        self.maximum_value
    }

    /// Counter bumped every time the detents are re-resolved.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Re-resolves every detent against the current geometry.
    pub fn invalidate_detents(&mut self) {
        let metrics = &self.metrics;
        self.maximum_value = sanitize(
            metrics.container.height
                - metrics.safe_area.y0
                - self.top_spacing
                - self.keyboard_height,
        );
        let resolved: SmallVec<[f64; 4]> =
            self.detents.iter().map(|d| self.resolve_value(d)).collect();
        self.resolved = resolved;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Resolves a detent to a height in `[0, maximum_value]`.
    ///
    /// Content-sized detents resolve to the full available height until the
    /// content reports its preferred height.
    #[must_use]
    pub fn resolve_value(&self, detent: &Detent) -> f64 {
        let max = self.maximum_value;
        let value = match detent.rule() {
            DetentRule::ContentSize => self
                .content_height
                .map_or(max, |height| height + self.metrics.safe_area.y1),
            DetentRule::Fixed(height) => height,
            DetentRule::Fraction(ratio) => ratio * max,
            DetentRule::Largest => max,
        };
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, max)
        }
    }

    /// Returns the resolved height of the detent with `key`.
    #[must_use]
    pub fn resolved_value(&self, key: &DetentKey) -> Option<f64> {
        self.index_of(key).map(|index| self.resolved[index])
    }

    /// Resolved height of the selected detent, or of the smallest detent when
    /// nothing is selected.
    #[must_use]
    pub fn resolve_current_detent_value(&self) -> f64 {
        self.selected
            .as_ref()
            .and_then(|key| self.resolved_value(key))
            .unwrap_or_else(|| self.resolve_smallest_detent_value())
    }

    /// Smallest resolved height, or `0` without detents.
    #[must_use]
    pub fn resolve_smallest_detent_value(&self) -> f64 {
        self.resolved.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    /// Largest resolved height, or `0` without detents.
    #[must_use]
    pub fn resolve_largest_detent_value(&self) -> f64 {
        self.resolved.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    /// Smallest resolved height strictly greater than `value`.
    #[must_use]
    pub fn next_larger_value(&self, value: f64) -> Option<f64> {
        self.resolved
            .iter()
            .copied()
            .filter(|&v| v > value)
            .reduce(f64::min)
    }

    /// Returns the detent whose resolved height is closest to `target`.
    ///
    /// Exact ties go to the larger detent.
    #[must_use]
    pub fn nearest_detent(&self, target: f64) -> Option<&Detent> {
        if target.is_nan() {
            return None;
        }
        let target = target.clamp(0.0, self.maximum_value);
        let mut best: Option<(usize, f64, f64)> = None;
        for (index, &value) in self.resolved.iter().enumerate() {
            let distance = (value - target).abs();
            let better = match best {
                None => true,
                Some((_, best_distance, best_value)) => {
                    distance < best_distance || (distance == best_distance && value > best_value)
                }
            };
            if better {
                best = Some((index, distance, value));
            }
        }
        best.map(|(index, ..)| &self.detents[index])
    }

    /// Selects the detent nearest to `target`.
    ///
    /// Returns the new key if the selection actually changed, so callers can
    /// emit exactly one change notification.
    pub fn select_nearest_detent(&mut self, target: f64) -> Option<DetentKey> {
        let key = self.nearest_detent(target)?.key().clone();
        if self.selected.as_ref() == Some(&key) {
            return None;
        }
        log::debug!("selected detent `{key}` for target {target}");
        self.selected = Some(key.clone());
        Some(key)
    }

    fn index_of(&self, key: &DetentKey) -> Option<usize> {
        self.detents.iter().position(|d| d.key() == key)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

pub(crate) fn validate_detents(detents: &[Detent]) -> Result<(), ConfigError> {
    if detents.is_empty() {
        return Err(ConfigError::NoDetents);
    }
    for (index, detent) in detents.iter().enumerate() {
        if detents[..index].iter().any(|d| d.key() == detent.key()) {
            return Err(ConfigError::DuplicateDetentKey(detent.key().clone()));
        }
        match detent.rule() {
            DetentRule::Fixed(height) if !height.is_finite() || height < 0.0 => {
                return Err(ConfigError::InvalidFixedHeight {
                    key: detent.key().clone(),
                    height,
                });
            }
            DetentRule::Fraction(ratio) if !(0.0..=1.0).contains(&ratio) => {
                return Err(ConfigError::InvalidFraction {
                    key: detent.key().clone(),
                    ratio,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medium_large() -> DetentResolver {
        let mut resolver = DetentResolver::new(
            [Detent::fixed("medium", 300.0), Detent::fixed("large", 700.0)],
            Some(DetentKey::MEDIUM),
        )
        .unwrap();
        resolver.set_metrics(SheetMetrics::new(Size::new(400.0, 800.0)));
        resolver
    }

    #[test]
    fn rejects_invalid_configurations() {
        assert_eq!(
            DetentResolver::new([], None).unwrap_err(),
            ConfigError::NoDetents
        );
        assert_eq!(
            DetentResolver::new([Detent::large(), Detent::large()], None).unwrap_err(),
            ConfigError::DuplicateDetentKey(DetentKey::LARGE)
        );
        assert_eq!(
            DetentResolver::new([Detent::large()], Some(DetentKey::MEDIUM)).unwrap_err(),
            ConfigError::UnknownSelectedDetent(DetentKey::MEDIUM)
        );
        assert!(matches!(
            DetentResolver::new([Detent::fraction("x", 1.5)], None),
            Err(ConfigError::InvalidFraction { .. })
        ));
        assert!(matches!(
            DetentResolver::new([Detent::fixed("x", -1.0)], None),
            Err(ConfigError::InvalidFixedHeight { .. })
        ));
    }

    #[test]
    fn resolves_each_rule() {
        let mut resolver = DetentResolver::new(
            [
                Detent::content(),
                Detent::fixed("peek", 120.0),
                Detent::medium(),
                Detent::large(),
            ],
            None,
        )
        .unwrap();
        resolver.set_metrics(
            SheetMetrics::new(Size::new(400.0, 900.0))
                .with_safe_area(Insets::new(0.0, 50.0, 0.0, 30.0)),
        );
        resolver.set_top_spacing(50.0);

        assert_eq!(resolver.maximum_value(), 800.0);
        // Content height is unknown, so it fills the available space.
        assert_eq!(resolver.resolved_value(&DetentKey::CONTENT), Some(800.0));
        assert_eq!(resolver.resolved_value(&"peek".into()), Some(120.0));
        assert_eq!(resolver.resolved_value(&DetentKey::MEDIUM), Some(400.0));
        assert_eq!(resolver.resolved_value(&DetentKey::LARGE), Some(800.0));

        resolver.set_content_height(Some(200.0));
        assert_eq!(resolver.resolved_value(&DetentKey::CONTENT), Some(230.0));
    }

    #[test]
    fn values_are_clamped_to_maximum() {
        let mut resolver = DetentResolver::new([Detent::fixed("tall", 2_000.0)], None).unwrap();
        resolver.set_metrics(SheetMetrics::new(Size::new(400.0, 800.0)));
        assert_eq!(resolver.resolve_largest_detent_value(), 800.0);
        resolver.set_keyboard_height(300.0);
        assert_eq!(resolver.resolve_largest_detent_value(), 500.0);
    }

    #[test]
    fn smallest_and_largest_ignore_declaration_order() {
        let mut resolver = DetentResolver::new(
            [
                Detent::fixed("b", 500.0),
                Detent::fixed("a", 100.0),
                Detent::fixed("c", 300.0),
            ],
            None,
        )
        .unwrap();
        resolver.set_metrics(SheetMetrics::new(Size::new(400.0, 800.0)));
        assert_eq!(resolver.resolve_smallest_detent_value(), 100.0);
        assert_eq!(resolver.resolve_largest_detent_value(), 500.0);
        // Nothing selected: the smallest detent is current.
        assert_eq!(resolver.resolve_current_detent_value(), 100.0);
        assert_eq!(resolver.next_larger_value(100.0), Some(300.0));
        assert_eq!(resolver.next_larger_value(500.0), None);
    }

    #[test]
    fn empty_resolver_yields_zero() {
        let resolver = DetentResolver::default();
        assert_eq!(resolver.resolve_current_detent_value(), 0.0);
        assert_eq!(resolver.resolve_smallest_detent_value(), 0.0);
        assert_eq!(resolver.resolve_largest_detent_value(), 0.0);
        assert!(resolver.nearest_detent(100.0).is_none());
    }

    #[test]
    fn nearest_prefers_larger_on_ties() {
        let mut resolver = medium_large();
        assert_eq!(
            resolver.nearest_detent(500.0).map(Detent::key),
            Some(&DetentKey::LARGE)
        );
        assert_eq!(resolver.select_nearest_detent(500.0), Some(DetentKey::LARGE));
    }

    #[test]
    fn select_nearest_reports_only_real_changes() {
        let mut resolver = medium_large();
        assert_eq!(resolver.select_nearest_detent(320.0), None);
        assert_eq!(resolver.select_nearest_detent(650.0), Some(DetentKey::LARGE));
        assert_eq!(resolver.select_nearest_detent(690.0), None);
        assert_eq!(resolver.select_nearest_detent(-40.0), Some(DetentKey::MEDIUM));
        assert_eq!(resolver.select_nearest_detent(f64::NAN), None);
    }

    #[test]
    fn invalidate_is_idempotent() {
        let mut resolver = medium_large();
        resolver.invalidate_detents();
        let first: SmallVec<[f64; 4]> = resolver.resolved.clone();
        let revision = resolver.revision();
        resolver.invalidate_detents();
        assert_eq!(resolver.resolved, first);
        assert_eq!(resolver.revision(), revision + 1);
    }

    #[test]
    fn set_detents_clears_missing_selection() {
        let mut resolver = medium_large();
        assert_eq!(resolver.set_detents([Detent::fixed("large", 700.0)]), Ok(true));
        assert_eq!(resolver.selected_detent_key(), None);
        assert_eq!(resolver.resolve_current_detent_value(), 700.0);
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let mut resolver = medium_large();
        assert!(!resolver.set_selected_detent_key(Some("missing".into())));
        assert_eq!(resolver.selected_detent_key(), Some(&DetentKey::MEDIUM));
        assert!(resolver.set_selected_detent_key(None));
        assert_eq!(resolver.resolve_current_detent_value(), 300.0);
    }
}
