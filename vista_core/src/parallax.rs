// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-linked hero fade and decorative layer offsets.
//!
//! The driver has two layers that share one frame task:
//!
//! - **Hero**: fades `.animated-gradient-bg` from 1.0 towards 0.2 as the
//!   page scrolls through the hero's height.
//! - **Decorative families**: moves every `.shape`, `.suit`/`.mini-suit` and
//!   `.geo-shape` by an index-dependent fraction of the scroll offset.
//!
//! Scroll events only [`request`](crate::frame::FrameQueue::request)
//! [`FrameTask::Parallax`]; the recomputation happens once per frame in
//! [`ParallaxDriver::update`], however many scroll events arrived.

use alloc::vec::Vec;

use tracing::debug;

use crate::config::Capabilities;
use crate::document::Document;
use crate::frame::{FrameQueue, FrameTask};
use crate::node::NodeId;
use crate::style::StyleStore;
use crate::transform::StyleTransform;

/// The hero background whose opacity follows the scroll offset.
pub const HERO_SELECTOR: &str = ".animated-gradient-bg";

/// How much of the hero's opacity is lost over its full height.
pub const HERO_FADE: f64 = 0.8;

/// Lowest opacity the hero fades to.
pub const HERO_MIN_OPACITY: f64 = 0.2;

/// One family of decorative elements moving at index-dependent speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerFamily {
    /// Selector for the family's elements.
    pub selector: &'static str,
    /// Speed of the first element, in px per scrolled px.
    pub base_speed: f64,
    /// Speed added per subsequent element.
    pub speed_step: f64,
    /// `-1.0` moves against the scroll, `1.0` with it.
    pub direction: f64,
    /// Rotation in degrees per scrolled px, if the family rotates.
    pub rotation: Option<f64>,
}

impl LayerFamily {
    /// Floating shapes drift upwards.
    pub const SHAPES: Self = Self {
        selector: ".shape",
        base_speed: 0.2,
        speed_step: 0.05,
        direction: -1.0,
        rotation: None,
    };

    /// Card suits drift upwards and turn slowly.
    pub const SUITS: Self = Self {
        selector: ".suit, .mini-suit",
        base_speed: 0.1,
        speed_step: 0.03,
        direction: -1.0,
        rotation: Some(0.05),
    };

    /// Geometric shapes sink and turn.
    pub const GEO_SHAPES: Self = Self {
        selector: ".geo-shape",
        base_speed: 0.15,
        speed_step: 0.04,
        direction: 1.0,
        rotation: Some(0.1),
    };

    /// Speed of the element at `index` within the family.
    #[must_use]
    pub fn speed(&self, index: usize) -> f64 {
        self.base_speed + index as f64 * self.speed_step
    }

    /// Transform of the element at `index` for the scroll offset `scroll_y`.
    #[must_use]
    pub fn transform(&self, index: usize, scroll_y: f64) -> StyleTransform {
        let t = StyleTransform::translate_y(self.direction * scroll_y * self.speed(index));
        match self.rotation {
            Some(deg_per_px) => t.then_rotate(scroll_y * deg_per_px),
            None => t,
        }
    }
}

/// Every decorative family, in the order they are attached.
pub const FAMILIES: [LayerFamily; 3] = [
    LayerFamily::SHAPES,
    LayerFamily::SUITS,
    LayerFamily::GEO_SHAPES,
];

/// Hero opacity for `scroll_y` within a hero of height `hero_height`.
///
/// Returns `None` once the hero has scrolled out (`scroll_y >= hero_height`);
/// the last value written then stays in place.
#[must_use]
pub fn hero_opacity(scroll_y: f64, hero_height: f64) -> Option<f64> {
    if hero_height <= 0.0 || scroll_y >= hero_height {
        return None;
    }
    let opacity = 1.0 - (scroll_y / hero_height) * HERO_FADE;
    Some(opacity.max(HERO_MIN_OPACITY))
}

#[derive(Clone, Copy, Debug)]
struct Layer {
    node: NodeId,
    family: LayerFamily,
    index: usize,
}

/// Frame-coalesced scroll recomputation of the hero and decorative layers.
#[derive(Clone, Debug, Default)]
pub struct ParallaxDriver {
    motion: bool,
    hero: Option<NodeId>,
    layers: Vec<Layer>,
}

impl ParallaxDriver {
    /// Attaches the hero layer.
    ///
    /// Inert under reduced motion or when the page has no hero.
    pub fn attach_hero(caps: Capabilities, doc: &mut dyn Document) -> Self {
        if !caps.allows_motion() {
            debug!("parallax skipped: reduced motion");
            return Self::default();
        }
        let hero = doc.query(HERO_SELECTOR);
        if hero.is_none() {
            debug!("parallax skipped: no hero");
        }
        Self {
            motion: true,
            hero,
            layers: Vec::new(),
        }
    }

    /// Attaches the decorative families. Independent of the hero.
    ///
    /// Returns the number of elements taken over.
    pub fn attach_layers(&mut self, doc: &mut dyn Document) -> usize {
        if !self.motion {
            debug!("deep parallax skipped: reduced motion");
            return 0;
        }
        let before = self.layers.len();
        for family in FAMILIES {
            for (index, node) in doc.query_all(family.selector).into_iter().enumerate() {
                self.layers.push(Layer {
                    node,
                    family,
                    index,
                });
            }
        }
        let added = self.layers.len() - before;
        debug!(layers = added, "deep parallax attached");
        added
    }

    /// Returns `true` if either layer has something to move.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.hero.is_some() || !self.layers.is_empty()
    }

    /// The hero element, if the hero layer is active.
    #[must_use]
    pub fn hero(&self) -> Option<NodeId> {
        self.hero
    }

    /// Handles a scroll notification.
    ///
    /// Returns `true` if this scroll scheduled a new recomputation, `false`
    /// if it coalesced into a pending one or the driver is inert.
    pub fn on_scroll(&self, queue: &mut FrameQueue) -> bool {
        self.is_active() && queue.request(FrameTask::Parallax)
    }

    /// Recomputes every layer from the current scroll offset.
    pub fn update(&mut self, doc: &dyn Document, store: &mut StyleStore) {
        if !self.is_active() {
            return;
        }
        let scroll_y = doc.scroll().scroll_y;

        if let Some(hero) = self.hero {
            if let Some(opacity) = hero_opacity(scroll_y, doc.offset_height(hero)) {
                store.set_opacity(hero, opacity);
            }
        }
        for layer in &self.layers {
            store.set_transform(layer.node, layer.family.transform(layer.index, scroll_y));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::testing::FakeDocument;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn hero_opacity_fades_over_hero_height() {
        assert_eq!(hero_opacity(0.0, 800.0), Some(1.0));
        assert_close(hero_opacity(400.0, 800.0).unwrap(), 0.6);
        assert_eq!(hero_opacity(800.0, 800.0), None, "boundary is held");
        assert_eq!(hero_opacity(2000.0, 800.0), None);
    }

    #[test]
    fn zero_height_hero_is_ignored() {
        assert_eq!(hero_opacity(0.0, 0.0), None);
    }

    #[test]
    fn family_transforms_match_direction_and_rotation() {
        assert_eq!(
            LayerFamily::SHAPES.transform(1, 100.0).to_string(),
            "translateY(-25px)"
        );
        assert_eq!(
            LayerFamily::SUITS.transform(0, 100.0).to_string(),
            "translateY(-10px) rotate(5deg)"
        );
        assert_eq!(
            LayerFamily::GEO_SHAPES.transform(0, 100.0).to_string(),
            "translateY(15px) rotate(10deg)"
        );
    }

    #[test]
    fn speeds_step_with_position_within_each_family() {
        let mut doc = FakeDocument::new();
        let suit_0 = doc.add(".suit").id();
        let geo_0 = doc.add(".geo-shape").id();
        let suit_1 = doc.add(".mini-suit").id();
        let suit_2 = doc.add(".suit").id();
        let geo_1 = doc.add(".geo-shape").id();
        let geo_2 = doc.add(".geo-shape").id();
        doc.set_scroll_y(200.0);

        let mut driver = ParallaxDriver::attach_hero(Capabilities::standard(), &mut doc);
        assert_eq!(driver.attach_layers(&mut doc), 6);
        let mut store = StyleStore::new();
        driver.update(&doc, &mut store);

        let check = |node: NodeId, translate: f64, rotate: f64| {
            let Some(t) = store.transform(node) else {
                panic!("no transform on {node:?}");
            };
            assert_close(t.translate_y, translate);
            assert_close(t.rotate_deg.unwrap_or(f64::NAN), rotate);
        };
        // 0.1 + i * 0.03 upwards, 0.05 deg per px, `.suit` and `.mini-suit` share the count.
        check(suit_0, -20.0, 10.0);
        check(suit_1, -26.0, 10.0);
        check(suit_2, -32.0, 10.0);
        // 0.15 + i * 0.04 downwards, 0.1 deg per px.
        check(geo_0, 30.0, 20.0);
        check(geo_1, 38.0, 20.0);
        check(geo_2, 46.0, 20.0);
    }

    #[test]
    fn scroll_bursts_coalesce_into_one_recompute() {
        let mut doc = FakeDocument::new();
        doc.add(HERO_SELECTOR).with_height(800.0);
        let driver = ParallaxDriver::attach_hero(Capabilities::standard(), &mut doc);
        let mut queue = FrameQueue::new();

        assert!(driver.on_scroll(&mut queue));
        for _ in 0..10 {
            assert!(!driver.on_scroll(&mut queue));
        }
        assert_eq!(queue.take(), [FrameTask::Parallax]);
    }

    #[test]
    fn update_writes_hero_and_layers() {
        let mut doc = FakeDocument::new();
        let hero = doc.add(HERO_SELECTOR).with_height(800.0).id();
        let shape = doc.add(".shape").id();
        doc.set_scroll_y(400.0);

        let mut driver = ParallaxDriver::attach_hero(Capabilities::standard(), &mut doc);
        assert_eq!(driver.attach_layers(&mut doc), 1);

        let mut store = StyleStore::new();
        driver.update(&doc, &mut store);
        assert_close(store.opacity(hero).unwrap(), 0.6);
        assert_eq!(
            store.transform(shape),
            Some(StyleTransform::translate_y(-80.0))
        );
    }

    #[test]
    fn opacity_is_held_past_the_hero() {
        let mut doc = FakeDocument::new();
        let hero = doc.add(HERO_SELECTOR).with_height(800.0).id();
        let mut driver = ParallaxDriver::attach_hero(Capabilities::standard(), &mut doc);
        let mut store = StyleStore::new();

        doc.set_scroll_y(700.0);
        driver.update(&doc, &mut store);
        let held = store.opacity(hero).unwrap();

        doc.set_scroll_y(1600.0);
        driver.update(&doc, &mut store);
        assert_eq!(store.opacity(hero), Some(held));
    }

    #[test]
    fn layers_run_without_a_hero() {
        let mut doc = FakeDocument::new();
        doc.add(".geo-shape");
        let mut driver = ParallaxDriver::attach_hero(Capabilities::standard(), &mut doc);
        assert!(driver.hero().is_none());
        assert!(!driver.is_active());
        driver.attach_layers(&mut doc);
        assert!(driver.is_active());
    }

    #[test]
    fn reduced_motion_attaches_nothing() {
        let mut doc = FakeDocument::new();
        doc.add(HERO_SELECTOR).with_height(800.0);
        doc.add(".shape");
        let mut driver = ParallaxDriver::attach_hero(Capabilities::reduced_motion(), &mut doc);
        assert_eq!(driver.attach_layers(&mut doc), 0);
        assert!(!driver.is_active());

        let mut queue = FrameQueue::new();
        assert!(!driver.on_scroll(&mut queue));
        assert!(queue.is_idle());
    }
}
