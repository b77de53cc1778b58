// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line-per-event logging for local debugging.
//!
//! Each line starts with the event kind in brackets. Times are in
//! milliseconds.

use std::io::Write;

use vista_core::time::HostTime;
use vista_core::trace::{
    AttachEvent, CounterEvent, FrameEvent, PlayStateEvent, RevealEvent, TraceSink, VisibilityEvent,
};

/// A [`TraceSink`] printing one line per event.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Prints to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Prints to `writer`.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.ticks() as f64 / 1000.0
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_attach(&mut self, e: &AttachEvent) {
        let state = if e.active { "on" } else { "skipped" };
        let _ = writeln!(
            self.writer,
            "[attach] {} {state} nodes={}",
            e.behavior.as_str(),
            e.nodes,
        );
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        let _ = writeln!(
            self.writer,
            "[visibility] {:?} entries={} visible={}",
            e.watch, e.entries, e.visible,
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal] node={} via {}",
            e.node.0,
            e.behavior.as_str(),
        );
    }

    fn on_counter(&mut self, e: &CounterEvent) {
        let done = if e.finished { " done" } else { "" };
        let _ = writeln!(
            self.writer,
            "[counter] node={} {}/{} at {:.1}ms{done}",
            e.node.0,
            e.value,
            e.target,
            ms(e.now),
        );
    }

    fn on_play_state(&mut self, e: &PlayStateEvent) {
        let _ = writeln!(
            self.writer,
            "[play] container={} {} descendants={}",
            e.container.0,
            e.state.as_str(),
            e.descendants,
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] {} at {:.1}ms tasks={}",
            e.frame_index,
            ms(e.now),
            e.tasks,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::node::NodeId;
    use vista_core::style::PlayState;
    use vista_core::trace::Behavior;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_counter() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_counter(&CounterEvent {
            node: NodeId(2),
            now: HostTime(2_016_500),
            value: 95,
            target: 95,
            finished: true,
        });
        let output = output(sink);
        assert!(output.contains("[counter]"), "got: {output}");
        assert!(output.contains("95/95"), "got: {output}");
        assert!(output.contains("2016.5ms"), "got: {output}");
        assert!(output.trim_end().ends_with("done"), "got: {output}");
    }

    #[test]
    fn one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_attach(&AttachEvent {
            behavior: Behavior::CursorTrail,
            active: false,
            nodes: 0,
        });
        sink.on_play_state(&PlayStateEvent {
            container: NodeId(5),
            state: PlayState::Paused,
            descendants: 3,
        });
        let output = output(sink);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2, "got: {output}");
        assert_eq!(lines[0], "[attach] cursor-trail skipped nodes=0");
        assert_eq!(lines[1], "[play] container=5 paused descendants=3");
    }
}
