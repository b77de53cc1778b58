// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-driven motion lifecycle for static landing pages.
//!
//! `vista_core` holds the platform-free half of a landing page's cosmetic
//! behaviours: parallax, scroll reveals, animated stat counters, lazy
//! decorations, and pausing of off-screen decorative animations. It is
//! `no_std` compatible (with `alloc`); host integrations live in backend
//! crates.
//!
//! # Architecture
//!
//! Host events flow into a single [`Landing`](landing::Landing) root, which
//! routes them to the behaviours. Behaviours write visual properties into a
//! [`StyleStore`](style::StyleStore); the host drains the store once per
//! frame and hands the changes to its presenter:
//!
//! ```text
//!   scroll / visibility / load / pointer
//!       │
//!       ▼
//!   Landing ──► behaviours ──► FrameQueue::request()
//!       │                            │
//!       │            frame ◄─────────┘
//!       ▼
//!   StyleStore::flush() ──► StyleChanges ──► Presenter::apply()
//! ```
//!
//! **[`visibility`]**: Threshold/margin visibility notifications, the shared
//! primitive every viewport-driven behaviour is built on.
//!
//! **[`frame`]**: Coalescing frame task queue: a task that is already
//! pending is never queued twice.
//!
//! **[`style`]**: Struct-of-arrays store of the visual properties the
//! behaviours own, with dirty tracking per property channel.
//!
//! **[`parallax`]**, **[`reveal`]**, **[`counter`]**, **[`decoration`]**:
//! The viewport-driven behaviours.
//!
//! **[`keyboard`]**, **[`cursor`]**, **[`loader`]**: Small companions wired by
//! the same start-up hook.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter),
//! [`Notifier`](backend::Notifier), and [`NotifierFactory`](backend::NotifierFactory)
//! traits that host crates implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! lifecycle instrumentation, with a zero-overhead [`Tracer`](trace::Tracer).
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod backend;
pub mod config;
pub mod counter;
pub mod cursor;
pub mod decoration;
pub mod dirty;
pub mod document;
pub mod frame;
pub mod keyboard;
pub mod landing;
pub mod loader;
pub mod node;
pub mod parallax;
pub mod reveal;
pub mod style;
pub mod time;
pub mod trace;
pub mod transform;
pub mod visibility;

#[cfg(test)]
pub(crate) mod testing;
