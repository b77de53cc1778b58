// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoration lifecycle: lazy activation and off-screen pausing.
//!
//! Two independent halves share the decoration containers:
//!
//! - [`LazyDecorations`] keeps the stats and features decorations hidden
//!   until they are first 10% visible, then fades them in once.
//! - [`AnimationPausing`] toggles `animation-play-state` on the animated
//!   descendants of every decoration container, every time the container
//!   enters or leaves a viewport grown by 100px.
//!
//! Both are inert under reduced motion.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::fmt;

use tracing::debug;

use crate::backend::{Notifier, NotifierFactory};
use crate::config::Capabilities;
use crate::document::Document;
use crate::node::NodeId;
use crate::style::{PlayState, StyleStore, Transition, TransitionProperties, Visibility};
use crate::trace::{Behavior, PlayStateEvent, RevealEvent, Tracer};
use crate::visibility::{NotifierConfig, VisibilityEntry, Watch};

/// Decorations activated lazily; the first match of each is taken.
pub const LAZY_SELECTORS: [&str; 2] = [".stats-decoration", ".features-decoration"];

/// Containers whose animations pause off-screen.
pub const CONTAINER_SELECTOR: &str = ".floating-shapes, .card-suits-decoration, \
    .stats-decoration, .features-decoration, .gradient-orbs, .footer-mini-suits, \
    .hero-title-suits";

/// Animated descendants toggled with their container.
pub const ANIMATED_SELECTOR: &str = ".shape, .suit, .mini-suit, .geo-shape, .neon-line, \
    .particle, .orb, .stats-mini-suit, .footer-mini-suit, .title-suit";

/// Fade used when a lazy decoration appears.
pub const LAZY_TRANSITION: Transition = Transition {
    properties: TransitionProperties::Opacity,
    duration_s: 0.6,
    delay_s: None,
};

/// Where a lazy decoration is in its one-way lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LazyStatus {
    /// Hidden, waiting for its first visible crossing.
    Hidden,
    /// Shown; no longer observed.
    Shown,
}

/// One-shot activation of decoration containers.
pub struct LazyDecorations {
    notifier: Option<Box<dyn Notifier>>,
    status: BTreeMap<NodeId, LazyStatus>,
}

impl fmt::Debug for LazyDecorations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyDecorations")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl LazyDecorations {
    /// Hides each lazy decoration and starts observing it.
    pub fn attach(
        caps: Capabilities,
        doc: &mut dyn Document,
        factory: &mut dyn NotifierFactory,
        store: &mut StyleStore,
    ) -> Self {
        let mut this = Self {
            notifier: None,
            status: BTreeMap::new(),
        };
        if !caps.allows_motion() {
            debug!("lazy decorations skipped: reduced motion");
            return this;
        }
        for selector in LAZY_SELECTORS {
            let Some(node) = doc.query(selector) else {
                continue;
            };
            if this.status.contains_key(&node) {
                continue;
            }
            store.set_opacity(node, 0.0);
            store.set_visibility(node, Visibility::Hidden);
            store.set_transition(node, LAZY_TRANSITION);
            this.status.insert(node, LazyStatus::Hidden);
            this.notifier
                .get_or_insert_with(|| {
                    factory.create(Watch::LazyDecorations, NotifierConfig::lazy_decorations())
                })
                .observe(node);
        }
        debug!(decorations = this.status.len(), "lazy decorations attached");
        this
    }

    /// Returns the status of `node`, or `None` if it is not lazy.
    #[must_use]
    pub fn status(&self, node: NodeId) -> Option<LazyStatus> {
        self.status.get(&node).copied()
    }

    /// Number of lazy decorations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.status.len()
    }

    /// Returns `true` if nothing is lazy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Handles a batch of [`Watch::LazyDecorations`] crossings.
    pub fn on_visibility(
        &mut self,
        entries: &[VisibilityEntry],
        store: &mut StyleStore,
        tracer: &mut Tracer<'_>,
    ) {
        for entry in entries.iter().filter(|e| e.visible) {
            let Some(status) = self.status.get_mut(&entry.node) else {
                continue;
            };
            if *status == LazyStatus::Shown {
                continue;
            }
            *status = LazyStatus::Shown;
            store.set_opacity(entry.node, 1.0);
            store.set_visibility(entry.node, Visibility::Visible);
            if let Some(n) = self.notifier.as_mut() {
                n.unobserve(entry.node);
            }
            tracer.reveal(&RevealEvent {
                node: entry.node,
                behavior: Behavior::LazyDecoration,
            });
        }
    }
}

/// Play/pause of decorative animations by container visibility.
pub struct AnimationPausing {
    notifier: Option<Box<dyn Notifier>>,
    containers: usize,
    toggles: u64,
}

impl fmt::Debug for AnimationPausing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationPausing")
            .field("containers", &self.containers)
            .field("toggles", &self.toggles)
            .finish_non_exhaustive()
    }
}

impl AnimationPausing {
    /// Starts observing every decoration container.
    pub fn attach(
        caps: Capabilities,
        doc: &mut dyn Document,
        factory: &mut dyn NotifierFactory,
    ) -> Self {
        let mut this = Self {
            notifier: None,
            containers: 0,
            toggles: 0,
        };
        if !caps.allows_motion() {
            debug!("animation pausing skipped: reduced motion");
            return this;
        }
        let containers = doc.query_all(CONTAINER_SELECTOR);
        if containers.is_empty() {
            debug!("animation pausing skipped: no containers");
            return this;
        }
        let mut notifier = factory.create(Watch::Pausing, NotifierConfig::pausing());
        for &node in &containers {
            notifier.observe(node);
        }
        this.containers = containers.len();
        this.notifier = Some(notifier);
        debug!(containers = this.containers, "animation pausing attached");
        this
    }

    /// Number of observed containers.
    #[must_use]
    pub fn containers(&self) -> usize {
        self.containers
    }

    /// Number of container notifications handled so far.
    #[must_use]
    pub fn toggles(&self) -> u64 {
        self.toggles
    }

    /// Handles a batch of [`Watch::Pausing`] crossings.
    ///
    /// Descendants are queried afresh for every entry, so elements added to a
    /// container after start-up are picked up.
    pub fn on_visibility(
        &mut self,
        entries: &[VisibilityEntry],
        doc: &mut dyn Document,
        store: &mut StyleStore,
        tracer: &mut Tracer<'_>,
    ) {
        if self.notifier.is_none() {
            return;
        }
        for entry in entries {
            let state = PlayState::for_visibility(entry.visible);
            let descendants = doc.query_within(entry.node, ANIMATED_SELECTOR);
            for &child in &descendants {
                store.set_play_state(child, state);
            }
            self.toggles += 1;
            tracer.play_state(&PlayStateEvent {
                container: entry.node,
                state,
                descendants: u32::try_from(descendants.len()).unwrap_or(u32::MAX),
            });
        }
    }
}
