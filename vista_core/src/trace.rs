// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the motion lifecycle.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Landing`](crate::landing::Landing) and its behaviours call as they run.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! Behaviours never see a sink directly; they hold a [`Tracer`]. Without the
//! `trace` feature its methods are empty and inline away. With it, a call
//! forwards to the sink if one was supplied.
//!
//! Human-readable logging is separate and goes through `tracing`.

use crate::node::NodeId;
use crate::style::PlayState;
use crate::time::HostTime;
use crate::visibility::Watch;

// Enums

/// Which behaviour an event concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Hero fade on scroll.
    Parallax,
    /// One-shot fade-in of cards and blocks.
    Reveal,
    /// Focus attributes and key activation for cards.
    Keyboard,
    /// Animated stat counters.
    Counter,
    /// Scroll-linked offsets of the decorative layers.
    DeepParallax,
    /// One-shot activation of decoration containers.
    LazyDecoration,
    /// Play/pause of decorative animations.
    AnimationPausing,
    /// Mouse-following trail.
    CursorTrail,
    /// Loading overlay fade-out.
    Loader,
}

impl Behavior {
    /// Returns a short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parallax => "parallax",
            Self::Reveal => "reveal",
            Self::Keyboard => "keyboard",
            Self::Counter => "counter",
            Self::DeepParallax => "deep-parallax",
            Self::LazyDecoration => "lazy-decoration",
            Self::AnimationPausing => "animation-pausing",
            Self::CursorTrail => "cursor-trail",
            Self::Loader => "loader",
        }
    }
}

// Event structs

/// Emitted once per behaviour by the start-up hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttachEvent {
    /// The behaviour being attached.
    pub behavior: Behavior,
    /// Whether it attached at all (false when skipped).
    pub active: bool,
    /// Number of elements it took ownership of.
    pub nodes: u32,
}

/// Emitted for each batch of visibility crossings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityEvent {
    /// The notifier the batch came from.
    pub watch: Watch,
    /// Number of entries in the batch.
    pub entries: u32,
    /// How many of them report visible.
    pub visible: u32,
}

/// Emitted when an element flips from hidden to visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    /// The revealed element.
    pub node: NodeId,
    /// [`Behavior::Reveal`] or [`Behavior::LazyDecoration`].
    pub behavior: Behavior,
}

/// Emitted each time a counter renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterEvent {
    /// The stat element.
    pub node: NodeId,
    /// Frame time of the render.
    pub now: HostTime,
    /// Rendered value (without suffix).
    pub value: i64,
    /// Final value.
    pub target: i64,
    /// Whether this was the last render.
    pub finished: bool,
}

/// Emitted when a container's descendants are toggled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayStateEvent {
    /// The observed container.
    pub container: NodeId,
    /// State applied to every descendant.
    pub state: PlayState,
    /// Number of descendants written.
    pub descendants: u32,
}

/// Emitted at the start of each frame with pending work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameEvent {
    /// Frames run since attach, starting at 0.
    pub frame_index: u64,
    /// Frame time.
    pub now: HostTime,
    /// Tasks in this frame's batch.
    pub tasks: u32,
}

// TraceSink trait

/// Receives trace events from the lifecycle.
///
/// Every method has an empty default body.
pub trait TraceSink {
    /// Called when a behaviour is attached or skipped.
    fn on_attach(&mut self, e: &AttachEvent) {
        _ = e;
    }

    /// Called for each batch of visibility crossings.
    fn on_visibility(&mut self, e: &VisibilityEvent) {
        _ = e;
    }

    /// Called when an element is revealed.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called each time a counter renders.
    fn on_counter(&mut self, e: &CounterEvent) {
        _ = e;
    }

    /// Called when a container's animations are toggled.
    fn on_play_state(&mut self, e: &PlayStateEvent) {
        _ = e;
    }

    /// Called at the start of a frame.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }
}

// NoopSink

/// A [`TraceSink`] that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// Tracer wrapper

/// The handle behaviours emit trace events through.
///
/// Holds the sink only when the `trace` feature is enabled; otherwise it is
/// zero-sized and every call is a no-op.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $e:ident) => {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    };
}

impl<'a> Tracer<'a> {
    /// Forwards events to `sink`.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Drops every event.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`AttachEvent`].
    #[inline]
    pub fn attach(&mut self, e: &AttachEvent) {
        dispatch!(self, on_attach, e);
    }

    /// Emits a [`VisibilityEvent`].
    #[inline]
    pub fn visibility(&mut self, e: &VisibilityEvent) {
        dispatch!(self, on_visibility, e);
    }

    /// Emits a [`RevealEvent`].
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        dispatch!(self, on_reveal, e);
    }

    /// Emits a [`CounterEvent`].
    #[inline]
    pub fn counter(&mut self, e: &CounterEvent) {
        dispatch!(self, on_counter, e);
    }

    /// Emits a [`PlayStateEvent`].
    #[inline]
    pub fn play_state(&mut self, e: &PlayStateEvent) {
        dispatch!(self, on_play_state, e);
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        dispatch!(self, on_frame, e);
    }
}

// Tests
