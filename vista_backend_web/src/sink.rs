// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forwards lifecycle trace events to `tracing`.

use tracing::{debug, trace};

use vista_core::trace::{
    AttachEvent, CounterEvent, FrameEvent, PlayStateEvent, RevealEvent, TraceSink, VisibilityEvent,
};

/// A [`TraceSink`] that logs each event at `debug` or `trace` level.
///
/// Per-frame events go to `trace`; everything else to `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn on_attach(&mut self, e: &AttachEvent) {
        debug!(
            behavior = e.behavior.as_str(),
            active = e.active,
            nodes = e.nodes,
            "attach"
        );
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        debug!(watch = ?e.watch, entries = e.entries, visible = e.visible, "visibility");
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        debug!(node = e.node.0, behavior = e.behavior.as_str(), "reveal");
    }

    fn on_counter(&mut self, e: &CounterEvent) {
        trace!(
            node = e.node.0,
            value = e.value,
            target = e.target,
            finished = e.finished,
            "counter"
        );
    }

    fn on_play_state(&mut self, e: &PlayStateEvent) {
        debug!(
            container = e.container.0,
            state = e.state.as_str(),
            descendants = e.descendants,
            "play state"
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        trace!(frame = e.frame_index, now = e.now.ticks(), tasks = e.tasks, "frame");
    }
}
