// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifiers computed from page geometry.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Rect;

use vista_core::backend::{Notifier, NotifierFactory};
use vista_core::node::NodeId;
use vista_core::visibility::{IntersectionTracker, NotifierConfig, VisibilityEntry, Watch};

type Trackers = Rc<RefCell<BTreeMap<Watch, IntersectionTracker>>>;

/// Registers elements with the factory's tracker for one [`Watch`].
#[derive(Debug)]
pub struct TrackerNotifier {
    watch: Watch,
    trackers: Trackers,
}

impl Notifier for TrackerNotifier {
    fn observe(&mut self, node: NodeId) {
        if let Some(tracker) = self.trackers.borrow_mut().get_mut(&self.watch) {
            tracker.observe(node);
        }
    }

    fn unobserve(&mut self, node: NodeId) {
        if let Some(tracker) = self.trackers.borrow_mut().get_mut(&self.watch) {
            tracker.unobserve(node);
        }
    }
}

/// Hands out [`TrackerNotifier`]s and computes their crossings on demand.
///
/// A browser computes intersections on its own schedule; here the host calls
/// [`update`](Self::update) whenever geometry may have changed.
#[derive(Clone, Debug, Default)]
pub struct TrackerFactory {
    trackers: Trackers,
}

impl TrackerFactory {
    /// Creates a factory with no notifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Watches a notifier exists for, in [`Watch`] order.
    #[must_use]
    pub fn watches(&self) -> Vec<Watch> {
        self.trackers.borrow().keys().copied().collect()
    }

    /// Config of the notifier for `watch`.
    #[must_use]
    pub fn config(&self, watch: Watch) -> Option<NotifierConfig> {
        self.trackers.borrow().get(&watch).map(IntersectionTracker::config)
    }

    /// Returns `true` if `node` is still tracked under `watch`.
    #[must_use]
    pub fn is_observed(&self, watch: Watch, node: NodeId) -> bool {
        self.trackers
            .borrow()
            .get(&watch)
            .is_some_and(|t| t.is_observed(node))
    }

    /// Recomputes every notifier against `viewport`.
    ///
    /// Returns one non-empty batch per watch, in [`Watch`] order. The
    /// trackers are released before returning, so handlers may unobserve
    /// while processing the batches.
    pub fn update(
        &self,
        viewport: Rect,
        mut bounds: impl FnMut(NodeId) -> Rect,
    ) -> Vec<(Watch, Vec<VisibilityEntry>)> {
        let mut trackers = self.trackers.borrow_mut();
        trackers
            .iter_mut()
            .map(|(&watch, tracker)| (watch, tracker.update(viewport, &mut bounds)))
            .filter(|(_, entries)| !entries.is_empty())
            .collect()
    }
}

impl NotifierFactory for TrackerFactory {
    fn create(&mut self, watch: Watch, config: NotifierConfig) -> Box<dyn Notifier> {
        self.trackers
            .borrow_mut()
            .insert(watch, IntersectionTracker::new(config));
        Box::new(TrackerNotifier {
            watch,
            trackers: Rc::clone(&self.trackers),
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    #[test]
    fn batches_per_watch_with_initial_state() {
        let mut factory = TrackerFactory::new();
        let mut pausing = factory.create(Watch::Pausing, NotifierConfig::pausing());
        let mut counters = factory.create(Watch::Counters, NotifierConfig::counters());
        pausing.observe(NodeId(0));
        counters.observe(NodeId(1));

        let inside = Rect::new(0.0, 100.0, 100.0, 200.0);
        let batches = factory.update(VIEWPORT, |_| inside);
        assert_eq!(
            batches,
            [
                (Watch::Counters, vec![VisibilityEntry { node: NodeId(1), visible: true }]),
                (Watch::Pausing, vec![VisibilityEntry { node: NodeId(0), visible: true }]),
            ],
            "one batch per watch, in watch order"
        );
        assert!(
            factory.update(VIEWPORT, |_| inside).is_empty(),
            "no crossing, no batch"
        );
    }

    #[test]
    fn unobserve_through_notifier_stops_delivery() {
        let mut factory = TrackerFactory::new();
        let mut reveal = factory.create(Watch::Reveal, NotifierConfig::reveal());
        reveal.observe(NodeId(3));
        assert!(factory.is_observed(Watch::Reveal, NodeId(3)), "observed");
        reveal.unobserve(NodeId(3));
        assert!(!factory.is_observed(Watch::Reveal, NodeId(3)), "unobserved");
        assert!(factory.update(VIEWPORT, |_| VIEWPORT).is_empty(), "nothing tracked");
        assert_eq!(factory.watches(), [Watch::Reveal]);
        assert_eq!(factory.config(Watch::Reveal), Some(NotifierConfig::reveal()));
    }
}
