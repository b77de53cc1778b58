// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host loop, simulated.

use kurbo::Point;

use vista_core::backend::Presenter as _;
use vista_core::config::Capabilities;
use vista_core::counter::CounterConfig;
use vista_core::document::Document as _;
use vista_core::keyboard::KeyAction;
use vista_core::landing::Landing;
use vista_core::node::NodeId;
use vista_core::time::{Duration, HostTime};
use vista_core::trace::{NoopSink, TraceSink, Tracer};

use crate::notifier::TrackerFactory;
use crate::page::HeadlessPage;
use crate::presenter::RecordingPresenter;

/// Simulated display refresh interval (60 Hz).
pub const FRAME_INTERVAL: Duration = Duration(16_667);

/// A [`Landing`] attached to a [`HeadlessPage`].
///
/// Plays the browser's part in the order a browser does it: a scroll
/// queues parallax work and then delivers intersection crossings; a frame
/// runs queued tasks; every step ends with a flush into the
/// [`RecordingPresenter`].
///
/// The clock starts at zero and only moves in [`frame`](Self::frame) and
/// [`advance`](Self::advance).
#[derive(Debug)]
pub struct Harness<S: TraceSink = NoopSink> {
    page: HeadlessPage,
    factory: TrackerFactory,
    presenter: RecordingPresenter,
    landing: Landing,
    sink: S,
    now: HostTime,
}

impl Harness {
    /// Attaches with the standard counter timing and no trace sink.
    #[must_use]
    pub fn boot(page: HeadlessPage, caps: Capabilities) -> Self {
        Self::boot_traced(page, caps, CounterConfig::standard(), NoopSink)
    }
}

impl<S: TraceSink> Harness<S> {
    /// Runs the start-up hook, presents its writes, then delivers the
    /// initial visibility of every observed element.
    #[must_use]
    pub fn boot_traced(
        mut page: HeadlessPage,
        caps: Capabilities,
        counter_config: CounterConfig,
        mut sink: S,
    ) -> Self {
        let mut factory = TrackerFactory::new();
        let landing = Landing::attach_with(
            caps,
            counter_config,
            &mut page,
            &mut factory,
            &mut Tracer::new(&mut sink),
        );
        let mut harness = Self {
            page,
            factory,
            presenter: RecordingPresenter::new(),
            landing,
            sink,
            now: HostTime::default(),
        };
        harness.present();
        harness.deliver_visibility();
        harness
    }

    fn present(&mut self) {
        let changes = self.landing.flush();
        self.presenter.apply(self.landing.store(), &changes);
    }

    /// Recomputes every notifier against the current viewport and delivers
    /// the crossings. Returns the number of batches delivered.
    pub fn deliver_visibility(&mut self) -> usize {
        let viewport = self.page.scroll().viewport_rect();
        let page = &self.page;
        let batches = self.factory.update(viewport, |node| page.bounds(node));
        for (watch, entries) in &batches {
            self.landing.on_visibility(
                *watch,
                entries,
                &mut self.page,
                &mut Tracer::new(&mut self.sink),
            );
        }
        self.present();
        batches.len()
    }

    /// Scrolls the page, notifies the landing and delivers crossings.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.page.scroll_to(scroll_y);
        self.landing.on_scroll();
        self.deliver_visibility();
    }

    /// Moves the clock without running a frame.
    pub fn advance(&mut self, by: Duration) {
        self.now = self.now + by;
    }

    /// Moves the clock by one [`FRAME_INTERVAL`] and runs a frame if one
    /// was requested. Returns whether it ran.
    pub fn frame(&mut self) -> bool {
        self.advance(FRAME_INTERVAL);
        if !self.landing.has_pending_frame() {
            return false;
        }
        self.landing
            .on_frame(self.now, &mut self.page, &mut Tracer::new(&mut self.sink));
        self.present();
        true
    }

    /// Runs frames until nothing is requested, at most `max_frames` of them.
    /// Returns the number that ran.
    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        let mut ran = 0;
        while ran < max_frames && self.frame() {
            ran += 1;
        }
        ran
    }

    /// Signals that the page has fully loaded.
    pub fn load(&mut self) {
        self.landing.on_load(self.now, &mut self.page);
        self.present();
    }

    /// Moves the pointer, in viewport coordinates.
    pub fn pointer_move(&mut self, pointer: Point) {
        self.landing.on_pointer_move(pointer);
    }

    /// Presses `key` on `node`.
    #[must_use]
    pub fn key(&self, node: NodeId, key: &str) -> KeyAction {
        self.landing.on_key(node, key)
    }

    /// Current simulated time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.now
    }

    /// The page.
    #[must_use]
    pub fn page(&self) -> &HeadlessPage {
        &self.page
    }

    /// The notifier factory.
    #[must_use]
    pub fn factory(&self) -> &TrackerFactory {
        &self.factory
    }

    /// Everything presented so far.
    #[must_use]
    pub fn presenter(&self) -> &RecordingPresenter {
        &self.presenter
    }

    /// The landing under test.
    #[must_use]
    pub fn landing(&self) -> &Landing {
        &self.landing
    }

    /// The trace sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the harness and returns its trace sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    #[test]
    fn idle_page_runs_no_frames() {
        let mut harness = Harness::boot(HeadlessPage::desktop(), Capabilities::standard());
        assert!(!harness.frame(), "nothing was requested");
        assert_eq!(harness.now(), HostTime(FRAME_INTERVAL.ticks()));
        assert_eq!(harness.landing().frames(), 0);
    }

    #[test]
    fn scroll_runs_one_coalesced_frame() {
        let mut page = HeadlessPage::desktop();
        page.add(".animated-gradient-bg", Rect::new(0.0, 0.0, 1280.0, 800.0));
        let mut harness = Harness::boot(page, Capabilities::standard());

        harness.scroll_to(100.0);
        harness.scroll_to(200.0);
        assert_eq!(harness.run_until_idle(10), 1, "scrolls coalesce");
    }
}
