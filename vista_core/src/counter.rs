// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased count-up of stat numbers.
//!
//! Each `.stat-number` element is animated from 0 to its `data-target` value
//! the first time it is at least half visible. The animation runs on
//! [`FrameTask::Counter`] frames:
//!
//! ```text
//!   progress = min((now - start) / duration, 1)
//!   eased    = progress * (2 - progress)
//!   text     = floor(eased * target) + suffix
//! ```
//!
//! `start` is the timestamp of the first frame, not of the trigger. On the
//! final frame the text is exactly `target + suffix`. Under reduced motion the
//! final text is written at trigger time and no frames are requested.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use core::fmt;

use tracing::debug;

use crate::backend::{Notifier, NotifierFactory};
use crate::config::Capabilities;
use crate::document::Document;
use crate::frame::{FrameQueue, FrameTask};
use crate::node::NodeId;
use crate::style::StyleStore;
use crate::time::{Duration, HostTime};
use crate::trace::{CounterEvent, Tracer};
use crate::visibility::{NotifierConfig, VisibilityEntry, Watch};

/// Stat elements to animate.
pub const SELECTOR: &str = ".stat-number";

/// Attribute holding the final value.
pub const TARGET_ATTRIBUTE: &str = "data-target";

/// The one target value rendered as a percentage.
pub const PERCENT_TARGET: i64 = 95;

/// Counter timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterConfig {
    /// Length of the count-up.
    pub duration: Duration,
}

impl CounterConfig {
    /// Two-second count-up.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            duration: Duration::from_millis(2000),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parses the leading integer of `s` the way HTML pages expect `data-*`
/// numbers to be read.
///
/// Leading whitespace and one sign are accepted, a `0x` prefix switches to
/// hexadecimal, and parsing stops at the first non-digit. Returns `None` if no
/// digit was read or the value does not fit in an `i64`.
#[must_use]
pub fn parse_target(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut any = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        value = value
            .checked_mul(i64::from(radix))?
            .checked_add(i64::from(d))?;
        any = true;
    }
    if !any {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Ease-out quadratic, `p * (2 - p)`: fast start, gentle landing.
#[inline]
#[must_use]
pub fn ease_out_quad(progress: f64) -> f64 {
    progress * (2.0 - progress)
}

/// Suffix shown after the number.
#[must_use]
pub const fn suffix(target: i64) -> &'static str {
    if target == PERCENT_TARGET { "%" } else { "+" }
}

/// Text shown for `value` on a counter heading for `target`.
#[must_use]
pub fn render(value: i64, target: i64) -> String {
    format!("{value}{}", suffix(target))
}

/// Fraction of `duration` covered by `elapsed`, clamped to 1.
///
/// A zero duration is complete immediately.
#[must_use]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration == Duration::ZERO {
        return 1.0;
    }
    let p = elapsed.ticks() as f64 / duration.ticks() as f64;
    p.min(1.0)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "inputs are bounded by an i64 target"
)]
fn floor_to_i64(v: f64) -> i64 {
    let t = v as i64;
    if (t as f64) > v { t - 1 } else { t }
}

/// One rendered counter frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterFrame {
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// Displayed value.
    pub value: i64,
    /// Whether this was the last frame.
    pub finished: bool,
}

/// An in-flight count-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterState {
    start: Option<HostTime>,
    target: i64,
    duration: Duration,
}

impl CounterState {
    /// Creates a count-up that starts on its first [`step`](Self::step).
    #[must_use]
    pub const fn new(target: i64, duration: Duration) -> Self {
        Self {
            start: None,
            target,
            duration,
        }
    }

    /// Final value.
    #[must_use]
    pub const fn target(&self) -> i64 {
        self.target
    }

    /// Timestamp of the first frame, once one has run.
    #[must_use]
    pub const fn start(&self) -> Option<HostTime> {
        self.start
    }

    /// Advances to `now`.
    pub fn step(&mut self, now: HostTime) -> CounterFrame {
        let start = *self.start.get_or_insert(now);
        let progress = progress(now.saturating_duration_since(start), self.duration);
        if progress >= 1.0 {
            return CounterFrame {
                progress: 1.0,
                value: self.target,
                finished: true,
            };
        }
        CounterFrame {
            progress,
            value: floor_to_i64(ease_out_quad(progress) * self.target as f64),
            finished: false,
        }
    }
}

/// Where a stat element is in its once-only lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterStatus {
    /// Observed, never half visible yet.
    Waiting,
    /// Counting up.
    Running(CounterState),
    /// Finished, or skipped because its target did not parse.
    Done,
}

/// Owns the counter notifier and the per-element status side-table.
pub struct CounterAnimator {
    config: CounterConfig,
    reduced_motion: bool,
    notifier: Option<Box<dyn Notifier>>,
    status: BTreeMap<NodeId, CounterStatus>,
}

impl fmt::Debug for CounterAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterAnimator")
            .field("config", &self.config)
            .field("reduced_motion", &self.reduced_motion)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl CounterAnimator {
    /// Starts observing every stat element. Creates no notifier when there
    /// are none.
    pub fn attach(
        caps: Capabilities,
        config: CounterConfig,
        doc: &mut dyn Document,
        factory: &mut dyn NotifierFactory,
    ) -> Self {
        let nodes = doc.query_all(SELECTOR);
        let mut status = BTreeMap::new();
        let notifier = if nodes.is_empty() {
            debug!("counters skipped: no stat numbers");
            None
        } else {
            let mut notifier = factory.create(Watch::Counters, NotifierConfig::counters());
            for node in nodes {
                notifier.observe(node);
                status.insert(node, CounterStatus::Waiting);
            }
            debug!(counters = status.len(), "counters attached");
            Some(notifier)
        };
        Self {
            config,
            reduced_motion: caps.reduced_motion,
            notifier,
            status,
        }
    }

    /// Returns the status of `node`, or `None` if it is not a stat element.
    #[must_use]
    pub fn status(&self, node: NodeId) -> Option<CounterStatus> {
        self.status.get(&node).copied()
    }

    /// Number of stat elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.status.len()
    }

    /// Returns `true` if the page has no stat elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Returns `true` if a notifier was created.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.notifier.is_some()
    }

    /// Handles a batch of [`Watch::Counters`] crossings.
    ///
    /// A `Waiting` element that is now visible reads its target and either
    /// starts counting or, under reduced motion, shows the final text. Every
    /// other entry is ignored.
    pub fn on_visibility(
        &mut self,
        entries: &[VisibilityEntry],
        doc: &dyn Document,
        queue: &mut FrameQueue,
        store: &mut StyleStore,
        tracer: &mut Tracer<'_>,
        now: HostTime,
    ) {
        for entry in entries.iter().filter(|e| e.visible) {
            let Some(status) = self.status.get_mut(&entry.node) else {
                continue;
            };
            if *status != CounterStatus::Waiting {
                continue;
            }
            let parsed = doc
                .attribute(entry.node, TARGET_ATTRIBUTE)
                .as_deref()
                .and_then(parse_target);
            let Some(target) = parsed else {
                debug!(node = entry.node.0, "counter skipped: unparsable target");
                *status = CounterStatus::Done;
                continue;
            };
            if self.reduced_motion {
                *status = CounterStatus::Done;
                store.set_text(entry.node, render(target, target));
                tracer.counter(&CounterEvent {
                    node: entry.node,
                    now,
                    value: target,
                    target,
                    finished: true,
                });
            } else {
                *status = CounterStatus::Running(CounterState::new(target, self.config.duration));
                queue.request(FrameTask::Counter(entry.node));
            }
        }
    }

    /// Runs one [`FrameTask::Counter`] frame for `node`.
    pub fn advance(
        &mut self,
        node: NodeId,
        now: HostTime,
        queue: &mut FrameQueue,
        store: &mut StyleStore,
        tracer: &mut Tracer<'_>,
    ) {
        let Some(CounterStatus::Running(state)) = self.status.get_mut(&node) else {
            return;
        };
        let frame = state.step(now);
        let target = state.target();
        store.set_text(node, render(frame.value, target));
        tracer.counter(&CounterEvent {
            node,
            now,
            value: frame.value,
            target,
            finished: frame.finished,
        });
        if frame.finished {
            self.status.insert(node, CounterStatus::Done);
        } else {
            queue.request(FrameTask::Counter(node));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::*;
    use crate::testing::{FakeDocument, RecordingFactory};

    const MS: u64 = 1_000;

    #[test]
    fn parse_target_reads_integer_prefix() {
        assert_eq!(parse_target("95"), Some(95));
        assert_eq!(parse_target("  1200"), Some(1200));
        assert_eq!(parse_target("500k"), Some(500));
        assert_eq!(parse_target("-7"), Some(-7));
        assert_eq!(parse_target("+3"), Some(3));
        assert_eq!(parse_target("0x1A"), Some(26));
        assert_eq!(parse_target("12.9"), Some(12));
    }

    #[test]
    fn parse_target_rejects_non_numbers() {
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target("-"), None);
        assert_eq!(parse_target("0x"), None);
        assert_eq!(parse_target("99999999999999999999999"), None);
    }

    #[test]
    fn suffix_marks_the_percentage() {
        assert_eq!(render(95, 95), "95%");
        assert_eq!(render(1200, 1200), "1200+");
        assert_eq!(render(40, 95), "40%");
    }

    #[test]
    fn first_frame_records_start_and_renders_zero() {
        let mut state = CounterState::new(1200, Duration::from_millis(2000));
        let f = state.step(HostTime(5_000 * MS));
        assert_eq!(state.start(), Some(HostTime(5_000 * MS)));
        assert_eq!(f.value, 0);
        assert!(!f.finished);
    }

    #[test]
    fn midpoint_is_eased() {
        let mut state = CounterState::new(1000, Duration::from_millis(2000));
        state.step(HostTime(0));
        let f = state.step(HostTime(1_000 * MS));
        // eased(0.5) = 0.75
        assert_eq!(f.value, 750);
    }

    #[test]
    fn final_frame_renders_exact_target() {
        let mut state = CounterState::new(95, Duration::from_millis(2000));
        state.step(HostTime(0));
        let f = state.step(HostTime(2_500 * MS));
        assert_eq!(f, CounterFrame { progress: 1.0, value: 95, finished: true });
    }

    #[test]
    fn easing_matches_quadratic_form() {
        // 0.0005 rounds differently as `1 - (1 - p)^2`.
        for p in [0.0, 0.0005, 0.1, 0.25, 0.5, 0.9, 1.0] {
            assert_eq!(
                ease_out_quad(p).to_bits(),
                (p * (2.0 - p)).to_bits(),
                "p = {p}"
            );
        }
        assert_eq!(ease_out_quad(0.0005).to_bits(), 0.000_999_75_f64.to_bits());
    }

    #[test]
    fn zero_duration_completes_on_first_frame() {
        let mut state = CounterState::new(42, Duration::ZERO);
        assert!(state.step(HostTime(123)).finished);
    }

    fn attach_one(caps: Capabilities, target: &str) -> (FakeDocument, NodeId, CounterAnimator) {
        let mut doc = FakeDocument::new();
        let stat = doc.add(SELECTOR).with_attr(TARGET_ATTRIBUTE, target).id();
        let mut factory = RecordingFactory::new();
        let counters = CounterAnimator::attach(caps, CounterConfig::standard(), &mut doc, &mut factory);
        assert_eq!(factory.observed(Watch::Counters), [stat]);
        (doc, stat, counters)
    }

    #[test]
    fn trigger_then_frames_until_done() {
        let (doc, stat, mut counters) = attach_one(Capabilities::standard(), "1200");
        let mut queue = FrameQueue::new();
        let mut store = StyleStore::new();
        let mut tracer = Tracer::none();
        let visible = [VisibilityEntry { node: stat, visible: true }];

        counters.on_visibility(&visible, &doc, &mut queue, &mut store, &mut tracer, HostTime(0));
        assert!(matches!(counters.status(stat), Some(CounterStatus::Running(_))));
        assert_eq!(queue.take(), [FrameTask::Counter(stat)]);

        let mut now = HostTime(0);
        let mut frames = 0;
        while counters.status(stat) != Some(CounterStatus::Done) {
            now = HostTime(now.ticks() + 16 * MS);
            counters.advance(stat, now, &mut queue, &mut store, &mut tracer);
            let _ = queue.take();
            frames += 1;
            assert!(frames < 1_000, "counter never finished");
        }
        assert_eq!(store.text(stat), Some("1200+"));

        // Visible again: the guard keeps it from restarting.
        counters.on_visibility(&visible, &doc, &mut queue, &mut store, &mut tracer, now);
        assert!(queue.is_idle());
    }

    #[test]
    fn reduced_motion_renders_final_value_immediately() {
        let (doc, stat, mut counters) = attach_one(Capabilities::reduced_motion(), "95");
        let mut queue = FrameQueue::new();
        let mut store = StyleStore::new();
        let mut tracer = Tracer::none();
        counters.on_visibility(
            &[VisibilityEntry { node: stat, visible: true }],
            &doc,
            &mut queue,
            &mut store,
            &mut tracer,
            HostTime(0),
        );
        assert_eq!(store.text(stat), Some("95%"));
        assert_eq!(counters.status(stat), Some(CounterStatus::Done));
        assert!(queue.is_idle());
    }

    #[test]
    fn unparsable_target_is_skipped() {
        let (doc, stat, mut counters) = attach_one(Capabilities::standard(), "lots");
        let mut queue = FrameQueue::new();
        let mut store = StyleStore::new();
        let mut tracer = Tracer::none();
        counters.on_visibility(
            &[VisibilityEntry { node: stat, visible: true }],
            &doc,
            &mut queue,
            &mut store,
            &mut tracer,
            HostTime(0),
        );
        assert_eq!(counters.status(stat), Some(CounterStatus::Done));
        assert_eq!(store.text(stat), None);
        assert!(queue.is_idle());
    }

    #[test]
    fn hidden_entries_do_not_trigger() {
        let (doc, stat, mut counters) = attach_one(Capabilities::standard(), "10");
        let mut queue = FrameQueue::new();
        let mut store = StyleStore::new();
        let mut tracer = Tracer::none();
        counters.on_visibility(
            &[VisibilityEntry { node: stat, visible: false }],
            &doc,
            &mut queue,
            &mut store,
            &mut tracer,
            HostTime(0),
        );
        assert_eq!(counters.status(stat), Some(CounterStatus::Waiting));
    }

    #[test]
    fn no_stats_means_no_notifier() {
        let mut doc = FakeDocument::new();
        let mut factory = RecordingFactory::new();
        let counters = CounterAnimator::attach(
            Capabilities::standard(),
            CounterConfig::standard(),
            &mut doc,
            &mut factory,
        );
        assert!(!counters.is_observing());
        assert!(factory.created().is_empty());
    }

    proptest! {
        #[test]
        fn progress_is_monotonic_and_terminates(
            target in 0_i64..100_000,
            duration_ms in 1_u64..10_000,
            steps in proptest::collection::vec(1_u64..100_000, 1..200),
        ) {
            let duration = Duration::from_millis(duration_ms);
            let mut state = CounterState::new(target, duration);
            let mut now = HostTime(0);
            let mut frames: Vec<CounterFrame> = Vec::new();
            frames.push(state.step(now));
            for dt in steps {
                now = HostTime(now.ticks() + dt);
                frames.push(state.step(now));
            }
            for pair in frames.windows(2) {
                prop_assert!(pair[1].progress >= pair[0].progress);
                prop_assert!(pair[1].value >= pair[0].value);
            }
            // Once past the duration the next frame is final.
            let f = state.step(HostTime(now.ticks() + duration.ticks()));
            prop_assert!(f.finished);
            prop_assert_eq!(f.value, target);
            prop_assert_eq!(render(f.value, target), render(target, target));
        }

        #[test]
        fn final_text_is_target_plus_suffix(target in 0_i64..1_000_000) {
            let mut state = CounterState::new(target, Duration::from_millis(2000));
            state.step(HostTime(0));
            let f = state.step(HostTime(2_000 * MS));
            let expected = if target == 95 { format!("{target}%") } else { format!("{target}+") };
            prop_assert_eq!(render(f.value, target), expected);
        }
    }
}
