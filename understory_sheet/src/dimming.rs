// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::detent::DetentKey;
use crate::resolver::DetentResolver;

/// Opacity of the dimming layer behind the sheet, in `[0, 1]`.
///
/// Without a largest undimmed detent the sheet always dims fully. Otherwise
/// the ratio is `0` at or below that detent's height, ramps linearly across the
/// gap up to the next larger detent, and stays `0` if there is no larger
/// detent. An unknown key also dims fully.
#[must_use]
pub fn resolve_dimming_ratio(
    resolver: &DetentResolver,
    visible_height: f64,
    largest_undimmed: Option<&DetentKey>,
) -> f64 {
    let Some(key) = largest_undimmed else {
        return 1.0;
    };
    let Some(undimmed) = resolver.resolved_value(key) else {
        return 1.0;
    };
    let Some(next) = resolver.next_larger_value(undimmed) else {
        return 0.0;
    };
    if visible_height.is_nan() || visible_height <= undimmed {
        return 0.0;
    }
    ((visible_height - undimmed) / (next - undimmed)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::resolve_dimming_ratio;
    use crate::{Detent, DetentKey, DetentResolver, SheetMetrics};
    use kurbo::Size;

    fn resolver() -> DetentResolver {
        let mut resolver = DetentResolver::new(
            [
                Detent::fixed("small", 200.0),
                Detent::fixed("medium", 400.0),
                Detent::fixed("large", 700.0),
            ],
            None,
        )
        .unwrap();
        resolver.set_metrics(SheetMetrics::new(Size::new(400.0, 800.0)));
        resolver
    }

    #[test]
    fn no_undimmed_detent_dims_fully() {
        assert_eq!(resolve_dimming_ratio(&resolver(), 100.0, None), 1.0);
        let unknown = DetentKey::new("nope");
        assert_eq!(resolve_dimming_ratio(&resolver(), 100.0, Some(&unknown)), 1.0);
    }

    #[test]
    fn ramps_between_undimmed_and_next_larger() {
        let resolver = resolver();
        let key = DetentKey::MEDIUM;
        assert_eq!(resolve_dimming_ratio(&resolver, 300.0, Some(&key)), 0.0);
        assert_eq!(resolve_dimming_ratio(&resolver, 400.0, Some(&key)), 0.0);
        assert_eq!(resolve_dimming_ratio(&resolver, 550.0, Some(&key)), 0.5);
        assert_eq!(resolve_dimming_ratio(&resolver, 700.0, Some(&key)), 1.0);
        assert_eq!(resolve_dimming_ratio(&resolver, 760.0, Some(&key)), 1.0);
    }

    #[test]
    fn largest_undimmed_never_dims() {
        let resolver = resolver();
        let key = DetentKey::LARGE;
        assert_eq!(resolve_dimming_ratio(&resolver, 790.0, Some(&key)), 0.0);
    }

    #[test]
    fn non_decreasing_in_visible_height() {
        let resolver = resolver();
        let key = DetentKey::new("small");
        let mut previous = 0.0;
        let mut height = 0.0;
        while height <= 800.0 {
            let ratio = resolve_dimming_ratio(&resolver, height, Some(&key));
            assert!(ratio >= previous, "ratio dropped at {height}");
            if height <= 200.0 {
                assert_eq!(ratio, 0.0);
            }
            previous = ratio;
            height += 12.5;
        }
    }
}
