// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cooperation between the sheet's drag gesture and a nested scroll view.
//!
//! The engine never holds the scroll view itself. The host identifies it by a
//! [`ScrollViewId`] and reports its geometry as a [`ScrollSnapshot`] when
//! asked. At most one scroll view is claimed per gesture; the claim is dropped
//! when the gesture begins and when it ends.

use kurbo::Vec2;

bitflags::bitflags! {
    /// Axes along which a scroll view's content can actually scroll.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ScrollAxes: u8 {
        /// Content is wider than the viewport.
        const HORIZONTAL = 0b0000_0001;
        /// Content is taller than the viewport.
        const VERTICAL   = 0b0000_0010;
    }
}

/// Host-assigned handle for a nested scroll view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScrollViewId(pub u64);

/// Geometry of a nested scroll view at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSnapshot {
    /// Which scroll view this describes.
    pub id: ScrollViewId,
    /// Current content offset. `y` is negative while the content is pulled
    /// down past its top inset.
    pub content_offset: Vec2,
    /// Adjusted top content inset.
    pub top_inset: f64,
    /// Axes the content can scroll along.
    pub scrollable_axes: ScrollAxes,
}

impl ScrollSnapshot {
    /// Tolerance used when comparing the offset against the top edge.
    pub const TOP_TOLERANCE: f64 = 0.5;

    /// Snapshot of vertically scrollable content resting at its top.
    #[must_use]
    pub const fn at_top(id: ScrollViewId) -> Self {
        Self {
            id,
            content_offset: Vec2::ZERO,
            top_inset: 0.0,
            scrollable_axes: ScrollAxes::VERTICAL,
        }
    }

    /// Returns this snapshot with a different vertical offset.
    #[must_use]
    pub const fn with_offset_y(mut self, y: f64) -> Self {
        self.content_offset.y = y;
        self
    }

    /// Returns `true` if the content is not scrolled away from its top edge.
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        self.content_offset.y <= -self.top_inset + Self::TOP_TOLERANCE
    }

    /// Returns `true` if the content scrolls horizontally.
    #[must_use]
    pub fn scrolls_horizontally(&self) -> bool {
        self.scrollable_axes.contains(ScrollAxes::HORIZONTAL)
    }

    /// Returns `true` if the content scrolls vertically.
    #[must_use]
    pub fn scrolls_vertically(&self) -> bool {
        self.scrollable_axes.contains(ScrollAxes::VERTICAL)
    }
}

/// Tracks the scroll view claimed by the current gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollCooperation {
    claimed: Option<ScrollViewId>,
}

impl ScrollCooperation {
    /// Returns the claimed scroll view, if any.
    #[must_use]
    pub fn claimed(&self) -> Option<ScrollViewId> {
        self.claimed
    }

    /// Drops the current claim.
    pub fn release(&mut self) {
        self.claimed = None;
    }

    /// Decides whether the sheet's drag and the scroll view's own pan may be
    /// recognized at the same time, claiming the view if so.
    ///
    /// Horizontally scrollable content never cooperates. Otherwise the content
    /// cooperates if it rests at its top edge or the sheet is already being
    /// dragged. A second view is refused while another one is claimed.
    pub fn should_recognize_simultaneously(
        &mut self,
        snapshot: &ScrollSnapshot,
        sheet_dragging: bool,
    ) -> bool {
        if snapshot.scrolls_horizontally() {
            return false;
        }
        if let Some(claimed) = self.claimed {
            if claimed != snapshot.id {
                return false;
            }
        }
        let cooperate = snapshot.is_at_top() || sheet_dragging;
        if cooperate {
            self.claimed = Some(snapshot.id);
        }
        cooperate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ScrollViewId = ScrollViewId(1);
    const B: ScrollViewId = ScrollViewId(2);

    #[test]
    fn top_detection_respects_inset() {
        let snapshot = ScrollSnapshot {
            top_inset: 20.0,
            ..ScrollSnapshot::at_top(A)
        };
        assert!(snapshot.with_offset_y(-20.0).is_at_top());
        assert!(snapshot.with_offset_y(-40.0).is_at_top());
        assert!(!snapshot.with_offset_y(0.0).is_at_top());
    }

    #[test]
    fn content_at_top_cooperates_and_is_claimed() {
        let mut scroll = ScrollCooperation::default();
        assert!(scroll.should_recognize_simultaneously(&ScrollSnapshot::at_top(A), false));
        assert_eq!(scroll.claimed(), Some(A));
    }

    #[test]
    fn scrolled_content_only_cooperates_while_dragging() {
        let mut scroll = ScrollCooperation::default();
        let scrolled = ScrollSnapshot::at_top(A).with_offset_y(120.0);
        assert!(!scroll.should_recognize_simultaneously(&scrolled, false));
        assert_eq!(scroll.claimed(), None);
        assert!(scroll.should_recognize_simultaneously(&scrolled, true));
    }

    #[test]
    fn horizontal_content_never_cooperates() {
        let mut scroll = ScrollCooperation::default();
        let snapshot = ScrollSnapshot {
            scrollable_axes: ScrollAxes::HORIZONTAL | ScrollAxes::VERTICAL,
            ..ScrollSnapshot::at_top(A)
        };
        assert!(!scroll.should_recognize_simultaneously(&snapshot, true));
    }

    #[test]
    fn only_one_view_per_gesture() {
        let mut scroll = ScrollCooperation::default();
        assert!(scroll.should_recognize_simultaneously(&ScrollSnapshot::at_top(A), false));
        assert!(!scroll.should_recognize_simultaneously(&ScrollSnapshot::at_top(B), false));
        scroll.release();
        assert!(scroll.should_recognize_simultaneously(&ScrollSnapshot::at_top(B), false));
        assert_eq!(scroll.claimed(), Some(B));
    }
}
