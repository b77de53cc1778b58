// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport visibility notifications.
//!
//! Every viewport-driven behaviour is built on one primitive: register an
//! element with a [`NotifierConfig`] and receive a [`VisibilityEntry`]
//! whenever its visible-area fraction crosses the configured threshold.
//!
//! Browsers provide this natively (`IntersectionObserver`); the web backend
//! wraps it. [`IntersectionTracker`] is the same contract computed from
//! geometry, for hosts without a native primitive.
//!
//! # Delivery
//!
//! - The first recompute after [`observe`](IntersectionTracker::observe)
//!   always delivers the element's current state.
//! - Later recomputes deliver an entry only when the state flips.
//! - All entries of one recompute are returned together, in observation
//!   order; no entry is delivered for an unobserved element.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::node::NodeId;

/// Per-side adjustment of the root (viewport) box, in CSS pixels.
///
/// Positive values grow the box, negative values shrink it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
}

impl Margin {
    /// No adjustment.
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same adjustment on every side.
    #[must_use]
    pub const fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    /// Adjusts only the bottom edge.
    #[must_use]
    pub const fn bottom(px: f64) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: px,
            left: 0.0,
        }
    }

    /// Applies the margin to `root`.
    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        Rect::new(
            root.x0 - self.left,
            root.y0 - self.top,
            root.x1 + self.right,
            root.y1 + self.bottom,
        )
    }

    /// Renders the margin in CSS `rootMargin` syntax (`top right bottom left`).
    #[must_use]
    pub fn to_css(&self) -> alloc::string::String {
        alloc::format!(
            "{}px {}px {}px {}px",
            self.top + 0.0,
            self.right + 0.0,
            self.bottom + 0.0,
            self.left + 0.0
        )
    }
}

/// Threshold and root margin for one notifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotifierConfig {
    /// Visible-area fraction (0.0–1.0) whose crossing triggers delivery.
    /// Zero means "any intersection at all".
    pub threshold: f64,
    /// Adjustment of the viewport box.
    pub root_margin: Margin,
}

impl NotifierConfig {
    /// Cards and stats cards: 10%, triggered 50px after the bottom edge.
    #[must_use]
    pub const fn reveal() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Margin::bottom(-50.0),
        }
    }

    /// Full-width blocks: any intersection, triggered 50px after the bottom edge.
    #[must_use]
    pub const fn reveal_blocks() -> Self {
        Self {
            threshold: 0.0,
            root_margin: Margin::bottom(-50.0),
        }
    }

    /// Stat counters: half visible.
    #[must_use]
    pub const fn counters() -> Self {
        Self {
            threshold: 0.5,
            root_margin: Margin::ZERO,
        }
    }

    /// Lazy decorations: 10%.
    #[must_use]
    pub const fn lazy_decorations() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Margin::ZERO,
        }
    }

    /// Animation pausing: any intersection with a box grown by 100px.
    #[must_use]
    pub const fn pausing() -> Self {
        Self {
            threshold: 0.0,
            root_margin: Margin::uniform(100.0),
        }
    }

    /// Decides visibility from a host-reported intersection.
    ///
    /// `intersecting` is the host's own "touches the root" flag; `ratio` is
    /// the visible-area fraction.
    #[must_use]
    pub fn is_visible(&self, intersecting: bool, ratio: f64) -> bool {
        intersecting && (self.threshold <= 0.0 || ratio >= self.threshold)
    }

    /// Decides visibility of `target` against the viewport `root`.
    #[must_use]
    pub fn evaluate(&self, target: Rect, root: Rect) -> bool {
        let root = self.root_margin.apply(root);
        let intersecting = target.x0 <= root.x1
            && target.x1 >= root.x0
            && target.y0 <= root.y1
            && target.y1 >= root.y0
            && root.width() >= 0.0
            && root.height() >= 0.0;
        let area = target.area();
        let ratio = if !intersecting {
            0.0
        } else if area <= 0.0 {
            1.0
        } else {
            target.intersect(root).area() / area
        };
        self.is_visible(intersecting, ratio)
    }
}

/// Which behaviour a notifier feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Watch {
    /// Glass cards and stats cards.
    Reveal,
    /// Full-width feature and footer blocks.
    RevealBlocks,
    /// Stat number counters.
    Counters,
    /// Lazily activated decoration containers.
    LazyDecorations,
    /// Decoration containers whose animations pause off-screen.
    Pausing,
}

/// One visibility crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisibilityEntry {
    /// The element that crossed.
    pub node: NodeId,
    /// Whether it is now visible under the notifier's config.
    pub visible: bool,
}

#[derive(Clone, Copy, Debug)]
struct Observed {
    node: NodeId,
    last: Option<bool>,
}

/// Geometric implementation of the notifier contract.
#[derive(Clone, Debug)]
pub struct IntersectionTracker {
    config: NotifierConfig,
    observed: Vec<Observed>,
}

impl IntersectionTracker {
    /// Creates a tracker with no observed elements.
    #[must_use]
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            observed: Vec::new(),
        }
    }

    /// Returns the tracker's config.
    #[must_use]
    pub fn config(&self) -> NotifierConfig {
        self.config
    }

    /// Starts tracking `node`. Observing an already observed node is a no-op.
    pub fn observe(&mut self, node: NodeId) {
        if !self.is_observed(node) {
            self.observed.push(Observed { node, last: None });
        }
    }

    /// Permanently stops delivery for `node`.
    pub fn unobserve(&mut self, node: NodeId) {
        self.observed.retain(|o| o.node != node);
    }

    /// Returns `true` if `node` is tracked.
    #[must_use]
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observed.iter().any(|o| o.node == node)
    }

    /// Number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    /// Returns `true` if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Recomputes every tracked element against `viewport` and returns the
    /// crossings.
    ///
    /// `bounds` maps a node to its border box in document coordinates.
    pub fn update(
        &mut self,
        viewport: Rect,
        mut bounds: impl FnMut(NodeId) -> Rect,
    ) -> Vec<VisibilityEntry> {
        let mut entries = Vec::new();
        for observed in &mut self.observed {
            let visible = self.config.evaluate(bounds(observed.node), viewport);
            if observed.last != Some(visible) {
                observed.last = Some(visible);
                entries.push(VisibilityEntry {
                    node: observed.node,
                    visible,
                });
            }
        }
        entries
    }
}
