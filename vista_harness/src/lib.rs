// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless page model for driving the vista lifecycle outside a browser.
//!
//! - [`HeadlessPage`]: a [`Document`](vista_core::document::Document) of
//!   class-tagged boxes with a settable scroll offset.
//! - [`TrackerFactory`]: notifiers backed by geometric
//!   [`IntersectionTracker`](vista_core::visibility::IntersectionTracker)s.
//! - [`RecordingPresenter`]: keeps what a DOM would show, plus a log of
//!   every write.
//! - [`Harness`]: owns all of the above and a [`Landing`], and plays the
//!   host's part: delivering crossings after every scroll and running frames
//!   on a simulated clock.

#![no_std]

extern crate alloc;

mod harness;
mod notifier;
mod page;
mod presenter;

pub use harness::{FRAME_INTERVAL, Harness};
pub use notifier::{TrackerFactory, TrackerNotifier};
pub use page::HeadlessPage;
pub use presenter::{Property, Rendered, RecordingPresenter};

#[doc(no_inline)]
pub use vista_core::landing::Landing;
