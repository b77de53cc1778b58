// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle capture in memory.
//!
//! Each event becomes a one-byte tag followed by its fields in little-endian
//! order, so a session can be kept cheaply and inspected afterwards with
//! [`decode`], [`pretty`](crate::pretty) or [`chrome`](crate::chrome).

use vista_core::node::NodeId;
use vista_core::style::PlayState;
use vista_core::time::HostTime;
use vista_core::trace::{
    AttachEvent, Behavior, CounterEvent, FrameEvent, PlayStateEvent, RevealEvent, TraceSink,
    VisibilityEvent,
};
use vista_core::visibility::Watch;

// Record tags

const TAG_ATTACH: u8 = 1;
const TAG_VISIBILITY: u8 = 2;
const TAG_REVEAL: u8 = 3;
const TAG_COUNTER: u8 = 4;
const TAG_PLAY_STATE: u8 = 5;
const TAG_FRAME: u8 = 6;

// Decode tables, indexed by the codes written below.
const BEHAVIORS: [Behavior; 9] = [
    Behavior::Parallax,
    Behavior::Reveal,
    Behavior::Keyboard,
    Behavior::Counter,
    Behavior::DeepParallax,
    Behavior::LazyDecoration,
    Behavior::AnimationPausing,
    Behavior::CursorTrail,
    Behavior::Loader,
];

const WATCHES: [Watch; 5] = [
    Watch::Reveal,
    Watch::RevealBlocks,
    Watch::Counters,
    Watch::LazyDecorations,
    Watch::Pausing,
];

fn behavior_code(b: Behavior) -> u8 {
    match b {
        Behavior::Parallax => 0,
        Behavior::Reveal => 1,
        Behavior::Keyboard => 2,
        Behavior::Counter => 3,
        Behavior::DeepParallax => 4,
        Behavior::LazyDecoration => 5,
        Behavior::AnimationPausing => 6,
        Behavior::CursorTrail => 7,
        Behavior::Loader => 8,
    }
}

fn watch_code(w: Watch) -> u8 {
    match w {
        Watch::Reveal => 0,
        Watch::RevealBlocks => 1,
        Watch::Counters => 2,
        Watch::LazyDecorations => 3,
        Watch::Pausing => 4,
    }
}


/// Appends every trace event to an in-memory byte log.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The log so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Gives up the log.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }


    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }
}

impl TraceSink for RecorderSink {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.write_u8(TAG_ATTACH);
        self.write_u8(behavior_code(e.behavior));
        self.write_bool(e.active);
        self.write_u32(e.nodes);
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        self.write_u8(TAG_VISIBILITY);
        self.write_u8(watch_code(e.watch));
        self.write_u32(e.entries);
        self.write_u32(e.visible);
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.write_u8(TAG_REVEAL);
        self.write_u32(e.node.0);
        self.write_u8(behavior_code(e.behavior));
    }

    fn on_counter(&mut self, e: &CounterEvent) {
        self.write_u8(TAG_COUNTER);
        self.write_u32(e.node.0);
        self.write_u64(e.now.ticks());
        self.write_i64(e.value);
        self.write_i64(e.target);
        self.write_bool(e.finished);
    }

    fn on_play_state(&mut self, e: &PlayStateEvent) {
        self.write_u8(TAG_PLAY_STATE);
        self.write_u32(e.container.0);
        self.write_bool(e.state == PlayState::Running);
        self.write_u32(e.descendants);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.ticks());
        self.write_u32(e.tasks);
    }
}


/// One entry read back from a log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// An [`AttachEvent`].
    Attach(AttachEvent),
    /// A [`VisibilityEvent`].
    Visibility(VisibilityEvent),
    /// A [`RevealEvent`].
    Reveal(RevealEvent),
    /// A [`CounterEvent`].
    Counter(CounterEvent),
    /// A [`PlayStateEvent`].
    PlayState(PlayStateEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
}

/// Reads a [`RecorderSink`] log back, oldest entry first.
///
/// Iteration stops at the first truncated record or unknown code.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Returned by [`decode`].
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|v| v != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_i64(&mut self) -> Option<i64> {
        self.take().map(i64::from_le_bytes)
    }

    fn read_behavior(&mut self) -> Option<Behavior> {
        BEHAVIORS.get(usize::from(self.read_u8()?)).copied()
    }

    fn read_watch(&mut self) -> Option<Watch> {
        WATCHES.get(usize::from(self.read_u8()?)).copied()
    }

    fn decode_attach(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Attach(AttachEvent {
            behavior: self.read_behavior()?,
            active: self.read_bool()?,
            nodes: self.read_u32()?,
        }))
    }

    fn decode_visibility(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Visibility(VisibilityEvent {
            watch: self.read_watch()?,
            entries: self.read_u32()?,
            visible: self.read_u32()?,
        }))
    }

    fn decode_reveal(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Reveal(RevealEvent {
            node: NodeId(self.read_u32()?),
            behavior: self.read_behavior()?,
        }))
    }

    fn decode_counter(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Counter(CounterEvent {
            node: NodeId(self.read_u32()?),
            now: HostTime(self.read_u64()?),
            value: self.read_i64()?,
            target: self.read_i64()?,
            finished: self.read_bool()?,
        }))
    }

    fn decode_play_state(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PlayState(PlayStateEvent {
            container: NodeId(self.read_u32()?),
            state: PlayState::for_visibility(self.read_bool()?),
            descendants: self.read_u32()?,
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            tasks: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_ATTACH => self.decode_attach(),
            TAG_VISIBILITY => self.decode_visibility(),
            TAG_REVEAL => self.decode_reveal(),
            TAG_COUNTER => self.decode_counter(),
            TAG_PLAY_STATE => self.decode_play_state(),
            TAG_FRAME => self.decode_frame(),
            _ => None,
        }
    }
}
