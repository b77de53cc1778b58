// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline export.
//!
//! Turns a [`RecorderSink`](super::recorder::RecorderSink) log into
//! [trace event][format] JSON, so a session can be opened in a profiler UI.
//!
//! Only frame and counter events carry a time. Every other event is stamped
//! with the latest time seen before it in the recording, so attach events
//! land at zero and visibility work lands on the frame it preceded.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Writes `bytes` to `writer` as a JSON array of trace events.
///
/// Counters become counter tracks named `stat {node}`; frames become instant
/// events. Opens in [Perfetto](https://ui.perfetto.dev/).
/// Host ticks are already microseconds, the unit the format expects.
///
/// Counter renders become `"C"` events named after their element, so each
/// stat shows up as its own counter track.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut clock: u64 = 0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Attach(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Attach",
                    "cat": "Lifecycle",
                    "ts": clock,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "behavior": e.behavior.as_str(),
                        "active": e.active,
                        "nodes": e.nodes,
                    }
                }));
            }
            RecordedEvent::Visibility(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.watch),
                    "cat": "Visibility",
                    "ts": clock,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "entries": e.entries,
                        "visible": e.visible,
                    }
                }));
            }
            RecordedEvent::Reveal(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Reveal",
                    "cat": "Visibility",
                    "ts": clock,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "node": e.node.0,
                        "behavior": e.behavior.as_str(),
                    }
                }));
            }
            RecordedEvent::Counter(e) => {
                clock = clock.max(e.now.ticks());
                events.push(json!({
                    "ph": "C",
                    "name": format!("stat {}", e.node.0),
                    "cat": "Counter",
                    "ts": e.now.ticks(),
                    "pid": 0,
                    "args": {
                        "value": e.value,
                    }
                }));
            }
            RecordedEvent::PlayState(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "PlayState",
                    "cat": "Visibility",
                    "ts": clock,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "container": e.container.0,
                        "state": e.state.as_str(),
                        "descendants": e.descendants,
                    }
                }));
            }
            RecordedEvent::Frame(e) => {
                clock = clock.max(e.now.ticks());
                events.push(json!({
                    "ph": "i",
                    "name": "Frame",
                    "cat": "Frame",
                    "ts": e.now.ticks(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                        "tasks": e.tasks,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use vista_core::node::NodeId;
    use vista_core::time::HostTime;
    use vista_core::trace::{
        AttachEvent, Behavior, CounterEvent, FrameEvent, RevealEvent, TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_attach(&AttachEvent {
            behavior: Behavior::Counter,
            active: true,
            nodes: 4,
        });
        rec.on_frame(&FrameEvent {
            frame_index: 0,
            now: HostTime(16_000),
            tasks: 1,
        });
        rec.on_counter(&CounterEvent {
            node: NodeId(7),
            now: HostTime(16_000),
            value: 12,
            target: 95,
            finished: false,
        });
        rec.on_reveal(&RevealEvent {
            node: NodeId(2),
            behavior: Behavior::Reveal,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 4);

        assert_eq!(parsed[0]["name"], "Attach");
        assert_eq!(parsed[0]["ts"], 0);
        assert_eq!(parsed[0]["args"]["behavior"], "counter");

        assert_eq!(parsed[1]["name"], "Frame");
        assert_eq!(parsed[1]["ts"], 16_000);

        assert_eq!(parsed[2]["ph"], "C");
        assert_eq!(parsed[2]["name"], "stat 7");
        assert_eq!(parsed[2]["args"]["value"], 12);

        // Untimed events inherit the latest time seen.
        assert_eq!(parsed[3]["name"], "Reveal");
        assert_eq!(parsed[3]["ts"], 16_000);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
