// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading overlay fade-out.
//!
//! When the page has fully loaded, `.loader` is made transparent and, once its
//! fade has had [`FADE`] to run, removed from layout with `display: none`.

use tracing::debug;

use crate::document::Document;
use crate::frame::{FrameQueue, FrameTask};
use crate::node::NodeId;
use crate::style::StyleStore;
use crate::time::{Duration, HostTime};

/// The loading overlay.
pub const SELECTOR: &str = ".loader";

/// Time between the fade starting and the overlay leaving layout.
pub const FADE: Duration = Duration::from_millis(300);

/// Loader lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoaderPhase {
    /// The page has not finished loading.
    #[default]
    Waiting,
    /// Fading; hidden at the given time.
    Fading {
        /// The overlay.
        node: NodeId,
        /// When `display: none` is applied.
        hide_at: HostTime,
    },
    /// Gone, or there never was an overlay.
    Finished,
}

/// Drives the loading overlay.
#[derive(Clone, Copy, Debug, Default)]
pub struct Loader {
    phase: LoaderPhase,
}

impl Loader {
    /// Creates a loader waiting for the load signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// Handles the "page fully loaded" signal. Later signals are ignored.
    pub fn on_load(
        &mut self,
        now: HostTime,
        doc: &mut dyn Document,
        store: &mut StyleStore,
        queue: &mut FrameQueue,
    ) {
        if self.phase != LoaderPhase::Waiting {
            return;
        }
        let Some(node) = doc.query(SELECTOR) else {
            self.phase = LoaderPhase::Finished;
            return;
        };
        store.set_opacity(node, 0.0);
        self.phase = LoaderPhase::Fading {
            node,
            hide_at: now + FADE,
        };
        queue.request(FrameTask::LoaderFade);
        debug!("loader fading");
    }

    /// Runs one [`FrameTask::LoaderFade`] frame.
    pub fn step(&mut self, now: HostTime, store: &mut StyleStore, queue: &mut FrameQueue) {
        let LoaderPhase::Fading { node, hide_at } = self.phase else {
            return;
        };
        if now >= hide_at {
            store.set_display_none(node, true);
            self.phase = LoaderPhase::Finished;
        } else {
            queue.request(FrameTask::LoaderFade);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDocument;

    #[test]
    fn fades_then_hides_after_delay() {
        let mut doc = FakeDocument::new();
        let node = doc.add(SELECTOR).id();
        let mut store = StyleStore::new();
        let mut queue = FrameQueue::new();
        let mut loader = Loader::new();

        loader.on_load(HostTime(1_000_000), &mut doc, &mut store, &mut queue);
        assert_eq!(store.opacity(node), Some(0.0));
        assert!(!store.display_none(node));
        assert_eq!(queue.take(), [FrameTask::LoaderFade]);

        loader.step(HostTime(1_200_000), &mut store, &mut queue);
        assert!(!store.display_none(node), "fade still running");
        assert_eq!(queue.take(), [FrameTask::LoaderFade]);

        loader.step(HostTime(1_300_000), &mut store, &mut queue);
        assert!(store.display_none(node));
        assert_eq!(loader.phase(), LoaderPhase::Finished);
        assert!(queue.is_idle());
    }

    #[test]
    fn missing_loader_finishes_quietly() {
        let mut doc = FakeDocument::new();
        let mut store = StyleStore::new();
        let mut queue = FrameQueue::new();
        let mut loader = Loader::new();
        loader.on_load(HostTime(0), &mut doc, &mut store, &mut queue);
        assert_eq!(loader.phase(), LoaderPhase::Finished);
        assert!(queue.is_idle());
        assert!(store.is_empty());
    }

    #[test]
    fn second_load_signal_is_ignored() {
        let mut doc = FakeDocument::new();
        doc.add(SELECTOR);
        let mut store = StyleStore::new();
        let mut queue = FrameQueue::new();
        let mut loader = Loader::new();
        loader.on_load(HostTime(0), &mut doc, &mut store, &mut queue);
        let first = loader.phase();
        loader.on_load(HostTime(5_000_000), &mut doc, &mut store, &mut queue);
        assert_eq!(loader.phase(), first);
    }
}
