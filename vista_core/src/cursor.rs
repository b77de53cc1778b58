// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse-following cursor trail.
//!
//! A blurred 20px ball is appended to the page and eased towards the last
//! pointer position on every frame. Opt-in through
//! [`Capabilities::cursor_trail`]; never attached under reduced motion or on
//! narrow viewports.

use kurbo::Point;
use tracing::debug;

use crate::config::Capabilities;
use crate::document::Document;
use crate::frame::{FrameQueue, FrameTask};
use crate::node::NodeId;
use crate::style::StyleStore;

/// Fraction of the remaining distance covered per frame.
pub const FOLLOW_SPEED: f64 = 0.15;

/// Narrowest viewport, in CSS pixels, that gets a trail.
pub const MIN_VIEWPORT_WIDTH: f64 = 768.0;

/// Inline style of the follower element.
pub const BALL_CSS: &str = "position: fixed; width: 20px; height: 20px; \
    border-radius: 50%; \
    background: radial-gradient(circle, rgba(236, 72, 153, 0.4), transparent); \
    pointer-events: none; z-index: 9999; mix-blend-mode: screen; \
    filter: blur(10px); transition: transform 0.1s ease;";

/// One easing step from `ball` towards `pointer`.
#[must_use]
pub fn follow(ball: Point, pointer: Point) -> Point {
    ball + (pointer - ball) * FOLLOW_SPEED
}

/// The follower element and its easing state.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorTrail {
    ball: Option<NodeId>,
    pointer: Point,
    position: Point,
}

impl CursorTrail {
    /// Appends the follower and schedules its first frame.
    ///
    /// Inert unless the trail is enabled, motion is allowed and the viewport
    /// is at least [`MIN_VIEWPORT_WIDTH`] wide.
    pub fn attach(caps: Capabilities, doc: &mut dyn Document, queue: &mut FrameQueue) -> Self {
        if !caps.cursor_trail {
            return Self::default();
        }
        if !caps.allows_motion() {
            debug!("cursor trail skipped: reduced motion");
            return Self::default();
        }
        if doc.scroll().viewport_width < MIN_VIEWPORT_WIDTH {
            debug!("cursor trail skipped: narrow viewport");
            return Self::default();
        }
        let ball = doc.append_overlay(BALL_CSS);
        if ball.is_some() {
            queue.request(FrameTask::CursorTrail);
            debug!("cursor trail attached");
        }
        Self {
            ball,
            ..Self::default()
        }
    }

    /// The follower element, if attached.
    #[must_use]
    pub fn ball(&self) -> Option<NodeId> {
        self.ball
    }

    /// Current follower position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Records the latest pointer position, in viewport coordinates.
    pub fn on_pointer_move(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Moves the follower one step and schedules the next frame.
    pub fn step(&mut self, store: &mut StyleStore, queue: &mut FrameQueue) {
        let Some(ball) = self.ball else {
            return;
        };
        self.position = follow(self.position, self.pointer);
        store.set_position(ball, self.position);
        queue.request(FrameTask::CursorTrail);
    }
}
