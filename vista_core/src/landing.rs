// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composition root: one start-up hook, one owner for every behaviour.
//!
//! [`Landing::attach`] wires the behaviours in a fixed order. After that the
//! host forwards its events to the `on_*` methods, runs
//! [`on_frame`](Landing::on_frame) while
//! [`has_pending_frame`](Landing::has_pending_frame) is true, and hands
//! [`flush`](Landing::flush)ed changes to its presenter.
//!
//! Every visual property has exactly one writer:
//!
//! | property | writer |
//! |---|---|
//! | hero `opacity` | parallax |
//! | decorative `transform` | parallax |
//! | card/block `opacity`, `transform`, `transition` | reveal |
//! | stat text | counter |
//! | decoration container `opacity`, `visibility`, `transition` | lazy decorations |
//! | decorative `animation-play-state` | animation pausing |
//! | card `tabindex`, `role` | keyboard navigation |
//! | trail `left`, `top` | cursor trail |
//! | loader `opacity`, `display` | loader |

use kurbo::Point;
use tracing::{debug, info};

use crate::backend::NotifierFactory;
use crate::config::Capabilities;
use crate::counter::{CounterAnimator, CounterConfig};
use crate::cursor::CursorTrail;
use crate::decoration::{AnimationPausing, LazyDecorations};
use crate::document::Document;
use crate::frame::{FrameQueue, FrameTask};
use crate::keyboard::{KeyAction, KeyboardNavigation};
use crate::loader::Loader;
use crate::node::NodeId;
use crate::parallax::ParallaxDriver;
use crate::reveal::RevealController;
use crate::style::{StyleChanges, StyleStore};
use crate::time::HostTime;
use crate::trace::{AttachEvent, Behavior, FrameEvent, Tracer, VisibilityEvent};
use crate::visibility::{VisibilityEntry, Watch};

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Every behaviour of the page, plus the shared frame queue and style store.
#[derive(Debug)]
pub struct Landing {
    caps: Capabilities,
    queue: FrameQueue,
    store: StyleStore,
    parallax: ParallaxDriver,
    reveal: RevealController,
    keyboard: KeyboardNavigation,
    counters: CounterAnimator,
    lazy: LazyDecorations,
    pausing: AnimationPausing,
    cursor: CursorTrail,
    loader: Loader,
    frame_index: u64,
    last_frame: HostTime,
}

impl Landing {
    /// Runs the start-up hook with the standard counter timing.
    pub fn attach(
        caps: Capabilities,
        doc: &mut dyn Document,
        factory: &mut dyn NotifierFactory,
        tracer: &mut Tracer<'_>,
    ) -> Self {
        Self::attach_with(caps, CounterConfig::standard(), doc, factory, tracer)
    }

    /// Runs the start-up hook.
    ///
    /// Behaviours attach in this order: parallax, reveal, keyboard
    /// navigation, counters, deep parallax, lazy decorations, animation
    /// pausing, cursor trail.
    pub fn attach_with(
        caps: Capabilities,
        counter_config: CounterConfig,
        doc: &mut dyn Document,
        factory: &mut dyn NotifierFactory,
        tracer: &mut Tracer<'_>,
    ) -> Self {
        let mut queue = FrameQueue::new();
        let mut store = StyleStore::new();

        let mut parallax = ParallaxDriver::attach_hero(caps, doc);
        tracer.attach(&AttachEvent {
            behavior: Behavior::Parallax,
            active: parallax.hero().is_some(),
            nodes: count(usize::from(parallax.hero().is_some())),
        });

        let reveal = RevealController::attach(doc, factory, &mut store);
        tracer.attach(&AttachEvent {
            behavior: Behavior::Reveal,
            active: !reveal.is_empty(),
            nodes: count(reveal.len()),
        });

        let keyboard = KeyboardNavigation::attach(doc, &mut store);
        tracer.attach(&AttachEvent {
            behavior: Behavior::Keyboard,
            active: !keyboard.cards().is_empty(),
            nodes: count(keyboard.cards().len()),
        });

        let counters = CounterAnimator::attach(caps, counter_config, doc, factory);
        tracer.attach(&AttachEvent {
            behavior: Behavior::Counter,
            active: counters.is_observing(),
            nodes: count(counters.len()),
        });

        let layers = parallax.attach_layers(doc);
        tracer.attach(&AttachEvent {
            behavior: Behavior::DeepParallax,
            active: layers > 0,
            nodes: count(layers),
        });

        let lazy = LazyDecorations::attach(caps, doc, factory, &mut store);
        tracer.attach(&AttachEvent {
            behavior: Behavior::LazyDecoration,
            active: !lazy.is_empty(),
            nodes: count(lazy.len()),
        });

        let pausing = AnimationPausing::attach(caps, doc, factory);
        tracer.attach(&AttachEvent {
            behavior: Behavior::AnimationPausing,
            active: pausing.containers() > 0,
            nodes: count(pausing.containers()),
        });

        let cursor = CursorTrail::attach(caps, doc, &mut queue);
        tracer.attach(&AttachEvent {
            behavior: Behavior::CursorTrail,
            active: cursor.ball().is_some(),
            nodes: count(usize::from(cursor.ball().is_some())),
        });

        info!(
            reduced_motion = caps.reduced_motion,
            scroll = parallax.is_active(),
            "site initialized"
        );

        Self {
            caps,
            queue,
            store,
            parallax,
            reveal,
            keyboard,
            counters,
            lazy,
            pausing,
            cursor,
            loader: Loader::new(),
            frame_index: 0,
            last_frame: HostTime::default(),
        }
    }

    /// Capabilities the page was attached with.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// Whether the host needs to deliver scroll events at all.
    #[must_use]
    pub fn wants_scroll(&self) -> bool {
        self.parallax.is_active()
    }

    /// Whether the host should arm a display-frame callback.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        !self.queue.is_idle()
    }

    /// Handles a scroll event. Returns `true` if a new frame was requested.
    pub fn on_scroll(&mut self) -> bool {
        self.parallax.on_scroll(&mut self.queue)
    }

    /// Handles a batch of visibility crossings from the notifier for `watch`.
    pub fn on_visibility(
        &mut self,
        watch: Watch,
        entries: &[VisibilityEntry],
        doc: &mut dyn Document,
        tracer: &mut Tracer<'_>,
    ) {
        tracer.visibility(&VisibilityEvent {
            watch,
            entries: count(entries.len()),
            visible: count(entries.iter().filter(|e| e.visible).count()),
        });
        match watch {
            Watch::Reveal | Watch::RevealBlocks => {
                self.reveal
                    .on_visibility(watch, entries, &mut self.store, tracer);
            }
            Watch::Counters => self.counters.on_visibility(
                entries,
                doc,
                &mut self.queue,
                &mut self.store,
                tracer,
                self.last_frame,
            ),
            Watch::LazyDecorations => self.lazy.on_visibility(entries, &mut self.store, tracer),
            Watch::Pausing => self
                .pausing
                .on_visibility(entries, doc, &mut self.store, tracer),
        }
    }

    /// Handles a key press on `node`.
    #[must_use]
    pub fn on_key(&self, node: NodeId, key: &str) -> KeyAction {
        self.keyboard.on_key(node, key)
    }

    /// Handles a pointer move, in viewport coordinates.
    pub fn on_pointer_move(&mut self, pointer: Point) {
        self.cursor.on_pointer_move(pointer);
    }

    /// Handles the "page fully loaded" signal.
    pub fn on_load(&mut self, now: HostTime, doc: &mut dyn Document) {
        self.loader
            .on_load(now, doc, &mut self.store, &mut self.queue);
    }

    /// Runs every task queued for this frame, in registration order.
    ///
    /// Tasks requested while the batch runs go to the next frame.
    pub fn on_frame(&mut self, now: HostTime, doc: &mut dyn Document, tracer: &mut Tracer<'_>) {
        self.last_frame = now;
        let tasks = self.queue.take();
        if tasks.is_empty() {
            return;
        }
        tracer.frame(&FrameEvent {
            frame_index: self.frame_index,
            now,
            tasks: count(tasks.len()),
        });
        self.frame_index += 1;

        for task in tasks {
            match task {
                FrameTask::Parallax => self.parallax.update(doc, &mut self.store),
                FrameTask::Counter(node) => {
                    self.counters
                        .advance(node, now, &mut self.queue, &mut self.store, tracer);
                }
                FrameTask::CursorTrail => self.cursor.step(&mut self.store, &mut self.queue),
                FrameTask::LoaderFade => self.loader.step(now, &mut self.store, &mut self.queue),
            }
        }
        if self.queue.is_idle() {
            debug!(frames = self.frame_index, "frame queue drained");
        }
    }

    /// Drains every property written since the last flush.
    #[must_use]
    pub fn flush(&mut self) -> StyleChanges {
        self.store.flush()
    }

    /// Current property values, for presenters.
    #[must_use]
    pub fn store(&self) -> &StyleStore {
        &self.store
    }

    /// Frames that ran at least one task.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Frame queue statistics.
    #[must_use]
    pub fn queue(&self) -> &FrameQueue {
        &self.queue
    }

    /// The parallax driver.
    #[must_use]
    pub fn parallax(&self) -> &ParallaxDriver {
        &self.parallax
    }

    /// The reveal controller.
    #[must_use]
    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    /// Keyboard navigation, for wiring key listeners.
    #[must_use]
    pub fn keyboard(&self) -> &KeyboardNavigation {
        &self.keyboard
    }

    /// The counter animator.
    #[must_use]
    pub fn counters(&self) -> &CounterAnimator {
        &self.counters
    }

    /// Lazy decorations.
    #[must_use]
    pub fn lazy_decorations(&self) -> &LazyDecorations {
        &self.lazy
    }

    /// Animation pausing.
    #[must_use]
    pub fn pausing(&self) -> &AnimationPausing {
        &self.pausing
    }

    /// The cursor trail.
    #[must_use]
    pub fn cursor(&self) -> &CursorTrail {
        &self.cursor
    }

    /// The loader.
    #[must_use]
    pub fn loader(&self) -> &Loader {
        &self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::CounterStatus;
    use crate::parallax::HERO_SELECTOR;
    use crate::testing::{FakeDocument, NotifierCall, RecordingFactory};
    use crate::visibility::NotifierConfig;

    fn page() -> FakeDocument {
        let mut doc = FakeDocument::new();
        doc.add(HERO_SELECTOR).with_height(800.0);
        doc.add(".glass-card");
        doc.add(".stat-number").with_attr("data-target", "95");
        doc.add(".shape");
        doc.add(".stats-decoration");
        doc.add(".footer-gradient");
        doc
    }

    #[test]
    fn notifiers_are_created_in_attach_order() {
        let mut doc = page();
        let mut factory = RecordingFactory::new();
        let _landing = Landing::attach(
            Capabilities::standard(),
            &mut doc,
            &mut factory,
            &mut Tracer::none(),
        );
        assert_eq!(
            factory.created(),
            [
                Watch::Reveal,
                Watch::RevealBlocks,
                Watch::Counters,
                Watch::LazyDecorations,
                Watch::Pausing,
            ]
        );
        assert!(factory.calls().contains(&NotifierCall::Create(
            Watch::Pausing,
            NotifierConfig::pausing()
        )));
    }

    #[test]
    fn scroll_coalesces_until_the_frame_runs() {
        let mut doc = page();
        let mut factory = RecordingFactory::new();
        let mut tracer = Tracer::none();
        let mut landing =
            Landing::attach(Capabilities::standard(), &mut doc, &mut factory, &mut tracer);
        assert!(landing.wants_scroll());

        assert!(landing.on_scroll());
        assert!(!landing.on_scroll());
        assert!(landing.has_pending_frame());

        doc.set_scroll_y(400.0);
        landing.on_frame(HostTime(16_000), &mut doc, &mut tracer);
        assert_eq!(landing.frames(), 1);
        let hero = landing.parallax().hero();
        assert!(hero.is_some(), "page has a hero");
        let opacity = hero.and_then(|hero| landing.store().opacity(hero));
        assert!(
            opacity.is_some_and(|o| (o - 0.6).abs() < 1e-9),
            "recomputed from the latest scroll offset: {opacity:?}"
        );
        assert!(!landing.has_pending_frame());
        assert!(landing.on_scroll(), "a new burst schedules a new frame");
    }

    #[test]
    fn counter_runs_across_frames() {
        let mut doc = page();
        let stat = doc.query(".stat-number").unwrap();
        let mut factory = RecordingFactory::new();
        let mut tracer = Tracer::none();
        let mut landing =
            Landing::attach(Capabilities::standard(), &mut doc, &mut factory, &mut tracer);

        landing.on_visibility(
            Watch::Counters,
            &[VisibilityEntry { node: stat, visible: true }],
            &mut doc,
            &mut tracer,
        );
        let mut now = 0;
        while landing.has_pending_frame() {
            now += 16_000;
            landing.on_frame(HostTime(now), &mut doc, &mut tracer);
        }
        assert_eq!(landing.counters().status(stat), Some(CounterStatus::Done));
        assert_eq!(landing.store().text(stat), Some("95%"));
    }

    #[test]
    fn reduced_motion_keeps_only_reveal_keyboard_and_counters() {
        let mut doc = page();
        let mut factory = RecordingFactory::new();
        let mut tracer = Tracer::none();
        let caps = Capabilities::reduced_motion().with_cursor_trail();
        let landing = Landing::attach(caps, &mut doc, &mut factory, &mut tracer);

        assert!(!landing.wants_scroll());
        assert!(!landing.has_pending_frame());
        assert!(landing.cursor().ball().is_none());
        assert_eq!(
            factory.created(),
            [Watch::Reveal, Watch::RevealBlocks, Watch::Counters]
        );
    }

    #[test]
    fn empty_frame_does_not_count() {
        let mut doc = FakeDocument::new();
        let mut factory = RecordingFactory::new();
        let mut tracer = Tracer::none();
        let mut landing =
            Landing::attach(Capabilities::standard(), &mut doc, &mut factory, &mut tracer);
        landing.on_frame(HostTime(1), &mut doc, &mut tracer);
        assert_eq!(landing.frames(), 0);
        assert!(landing.flush().is_empty());
    }
}
