// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot fade-in of cards and full-width blocks.
//!
//! At attach time every target is put in the hidden state (transparent,
//! shifted down by [`HIDDEN_OFFSET_PX`]) with a transition that staggers
//! siblings. The first visible crossing flips it to its resting state and
//! stops observing it; nothing ever hides it again.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::fmt;

use tracing::debug;

use crate::backend::{Notifier, NotifierFactory};
use crate::document::Document;
use crate::node::NodeId;
use crate::style::{StyleStore, Transition, TransitionProperties};
use crate::trace::{Behavior, RevealEvent, Tracer};
use crate::transform::StyleTransform;
use crate::visibility::{NotifierConfig, VisibilityEntry, Watch};

/// Vertical offset of a hidden element, in CSS pixels.
pub const HIDDEN_OFFSET_PX: f64 = 30.0;

/// A group of reveal targets sharing timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealGroup {
    /// Selector for the group's elements.
    pub selector: &'static str,
    /// `false` takes only the first match.
    pub all: bool,
    /// Transition duration in seconds.
    pub duration_s: f64,
    /// Delay added per element index, in seconds. `None` writes no delay.
    pub stagger_s: Option<f64>,
}

impl RevealGroup {
    /// Feature cards.
    pub const CARDS: Self = Self {
        selector: ".glass-card",
        all: true,
        duration_s: 0.6,
        stagger_s: Some(0.1),
    };

    /// Stats cards.
    pub const STATS_CARDS: Self = Self {
        selector: ".stats-card",
        all: true,
        duration_s: 0.6,
        stagger_s: Some(0.15),
    };

    /// The main features block.
    pub const FEATURES_BLOCK: Self = Self {
        selector: ".features-main-block",
        all: false,
        duration_s: 0.8,
        stagger_s: None,
    };

    /// The footer call-to-action.
    pub const FOOTER_BLOCK: Self = Self {
        selector: ".footer-gradient",
        all: false,
        duration_s: 0.8,
        stagger_s: None,
    };

    /// Transition for the element at `index` within the group.
    #[must_use]
    pub fn transition(&self, index: usize) -> Transition {
        Transition {
            properties: TransitionProperties::OpacityAndTransform,
            duration_s: self.duration_s,
            delay_s: self.stagger_s.map(|step| index as f64 * step),
        }
    }
}

/// Card groups, observed at 10%.
pub const CARD_GROUPS: [RevealGroup; 2] = [RevealGroup::CARDS, RevealGroup::STATS_CARDS];

/// Full-width blocks, observed at any intersection.
pub const BLOCK_GROUPS: [RevealGroup; 2] = [RevealGroup::FEATURES_BLOCK, RevealGroup::FOOTER_BLOCK];

/// Where a reveal target is in its one-way lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealStatus {
    /// Waiting for its first visible crossing.
    Hidden,
    /// Flipped to the resting state; no longer observed.
    Revealed,
}

/// Owns the reveal notifiers and the per-element status side-table.
pub struct RevealController {
    cards: Option<Box<dyn Notifier>>,
    blocks: Option<Box<dyn Notifier>>,
    status: BTreeMap<NodeId, RevealStatus>,
}

impl fmt::Debug for RevealController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealController")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl RevealController {
    /// Hides every target and starts observing it.
    ///
    /// A notifier is only created for a watch that has at least one target.
    pub fn attach(
        doc: &mut dyn Document,
        factory: &mut dyn NotifierFactory,
        store: &mut StyleStore,
    ) -> Self {
        let mut status = BTreeMap::new();
        let cards = Self::attach_groups(
            &CARD_GROUPS,
            Watch::Reveal,
            NotifierConfig::reveal(),
            doc,
            factory,
            store,
            &mut status,
        );
        let blocks = Self::attach_groups(
            &BLOCK_GROUPS,
            Watch::RevealBlocks,
            NotifierConfig::reveal_blocks(),
            doc,
            factory,
            store,
            &mut status,
        );
        debug!(targets = status.len(), "reveal attached");
        Self {
            cards,
            blocks,
            status,
        }
    }

    fn attach_groups(
        groups: &[RevealGroup],
        watch: Watch,
        config: NotifierConfig,
        doc: &mut dyn Document,
        factory: &mut dyn NotifierFactory,
        store: &mut StyleStore,
        status: &mut BTreeMap<NodeId, RevealStatus>,
    ) -> Option<Box<dyn Notifier>> {
        let mut notifier: Option<Box<dyn Notifier>> = None;
        for group in groups {
            let nodes = if group.all {
                doc.query_all(group.selector)
            } else {
                doc.query(group.selector).into_iter().collect()
            };
            for (index, node) in nodes.into_iter().enumerate() {
                if status.contains_key(&node) {
                    continue;
                }
                store.set_opacity(node, 0.0);
                store.set_transform(node, StyleTransform::translate_y(HIDDEN_OFFSET_PX));
                store.set_transition(node, group.transition(index));
                status.insert(node, RevealStatus::Hidden);
                notifier
                    .get_or_insert_with(|| factory.create(watch, config))
                    .observe(node);
            }
        }
        notifier
    }

    /// Returns the status of `node`, or `None` if it is not a reveal target.
    #[must_use]
    pub fn status(&self, node: NodeId) -> Option<RevealStatus> {
        self.status.get(&node).copied()
    }

    /// Number of reveal targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.status.len()
    }

    /// Returns `true` if there are no reveal targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Handles a batch of crossings from the [`Watch::Reveal`] or
    /// [`Watch::RevealBlocks`] notifier.
    pub fn on_visibility(
        &mut self,
        watch: Watch,
        entries: &[VisibilityEntry],
        store: &mut StyleStore,
        tracer: &mut Tracer<'_>,
    ) {
        let notifier = match watch {
            Watch::Reveal => &mut self.cards,
            Watch::RevealBlocks => &mut self.blocks,
            _ => return,
        };
        for entry in entries.iter().filter(|e| e.visible) {
            let Some(status) = self.status.get_mut(&entry.node) else {
                continue;
            };
            if *status == RevealStatus::Revealed {
                continue;
            }
            *status = RevealStatus::Revealed;
            store.set_opacity(entry.node, 1.0);
            store.set_transform(entry.node, StyleTransform::IDENTITY);
            if let Some(n) = notifier.as_mut() {
                n.unobserve(entry.node);
            }
            tracer.reveal(&RevealEvent {
                node: entry.node,
                behavior: Behavior::Reveal,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::testing::{FakeDocument, NotifierCall, RecordingFactory};

    fn visible(node: NodeId) -> VisibilityEntry {
        VisibilityEntry { node, visible: true }
    }

    #[test]
    fn cards_get_staggered_transitions() {
        let mut doc = FakeDocument::new();
        let a = doc.add(".glass-card").id();
        let b = doc.add(".glass-card").id();
        let s = doc.add(".stats-card").id();
        let t = doc.add(".stats-card").id();
        let mut factory = RecordingFactory::new();
        let mut store = StyleStore::new();
        let _reveal = RevealController::attach(&mut doc, &mut factory, &mut store);

        let text = |n| store.transition(n).unwrap().to_string();
        assert_eq!(text(a), "opacity 0.6s ease 0s, transform 0.6s ease 0s");
        assert_eq!(text(b), "opacity 0.6s ease 0.1s, transform 0.6s ease 0.1s");
        assert_eq!(text(s), "opacity 0.6s ease 0s, transform 0.6s ease 0s");
        assert_eq!(text(t), "opacity 0.6s ease 0.15s, transform 0.6s ease 0.15s");
        assert_eq!(store.opacity(a), Some(0.0));
        assert_eq!(store.transform(a), Some(StyleTransform::translate_y(30.0)));
    }

    #[test]
    fn blocks_use_their_own_notifier() {
        let mut doc = FakeDocument::new();
        let features = doc.add(".features-main-block").id();
        doc.add(".features-main-block");
        let footer = doc.add(".footer-gradient").id();
        let mut factory = RecordingFactory::new();
        let mut store = StyleStore::new();
        let reveal = RevealController::attach(&mut doc, &mut factory, &mut store);

        assert_eq!(factory.created(), [Watch::RevealBlocks]);
        assert_eq!(factory.observed(Watch::RevealBlocks), [features, footer]);
        assert_eq!(reveal.len(), 2, "only the first block per selector");
        assert_eq!(
            store.transition(footer).unwrap().to_string(),
            "opacity 0.8s ease, transform 0.8s ease"
        );
        assert_eq!(
            factory.calls()[0],
            NotifierCall::Create(Watch::RevealBlocks, NotifierConfig::reveal_blocks())
        );
    }

    #[test]
    fn reveal_happens_once_and_unobserves() {
        let mut doc = FakeDocument::new();
        let card = doc.add(".glass-card").id();
        let mut factory = RecordingFactory::new();
        let mut store = StyleStore::new();
        let mut reveal = RevealController::attach(&mut doc, &mut factory, &mut store);
        let _ = store.flush();

        let mut tracer = Tracer::none();
        reveal.on_visibility(Watch::Reveal, &[visible(card)], &mut store, &mut tracer);
        assert_eq!(reveal.status(card), Some(RevealStatus::Revealed));
        assert_eq!(store.opacity(card), Some(1.0));
        assert_eq!(store.transform(card), Some(StyleTransform::IDENTITY));
        assert!(factory.observed(Watch::Reveal).is_empty());

        let _ = store.flush();
        reveal.on_visibility(
            Watch::Reveal,
            &[visible(card), VisibilityEntry { node: card, visible: false }],
            &mut store,
            &mut tracer,
        );
        assert!(store.flush().is_empty(), "second crossing is ignored");
    }

    #[test]
    fn hidden_crossings_and_strangers_are_ignored() {
        let mut doc = FakeDocument::new();
        let card = doc.add(".glass-card").id();
        let mut factory = RecordingFactory::new();
        let mut store = StyleStore::new();
        let mut reveal = RevealController::attach(&mut doc, &mut factory, &mut store);
        let _ = store.flush();

        let mut tracer = Tracer::none();
        let entries = vec![
            VisibilityEntry { node: card, visible: false },
            visible(NodeId(99)),
        ];
        reveal.on_visibility(Watch::Reveal, &entries, &mut store, &mut tracer);
        assert_eq!(reveal.status(card), Some(RevealStatus::Hidden));
        assert!(store.flush().is_empty());
    }

    #[test]
    fn empty_page_creates_no_notifier() {
        let mut doc = FakeDocument::new();
        let mut factory = RecordingFactory::new();
        let mut store = StyleStore::new();
        let reveal = RevealController::attach(&mut doc, &mut factory, &mut store);
        assert!(reveal.is_empty());
        assert!(factory.created().is_empty());
    }
}
