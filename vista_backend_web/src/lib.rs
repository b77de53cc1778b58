// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for vista.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`FrameRequester`]: one-shot `requestAnimationFrame` source that re-arms
//!   only while the core has pending frame work
//! - [`DomDocument`]: [`Document`](vista_core::document::Document) over the
//!   live DOM, with a shared element registry mapping elements to node ids
//! - [`DomNotifierFactory`]: `IntersectionObserver`-backed notifiers
//! - [`DomPresenter`]: writes flushed style changes to elements
//! - [`start`]: the start-up hook, exported as the wasm entry point
//!
//! Logging goes through `tracing` with a `tracing-wasm` subscriber; panics
//! are routed to the console by `console_error_panic_hook`.

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod boot;
mod dom;
mod error;
mod observer;
mod presenter;
mod raf;
mod sink;

pub use boot::{Options, start, start_with};
pub use dom::{DomDocument, ElementRegistry};
pub use error::SetupError;
pub use observer::{DomNotifier, DomNotifierFactory, VisibilityHandler};
pub use presenter::DomPresenter;
pub use raf::FrameRequester;
pub use sink::TracingSink;
pub use vista_core::backend::Presenter;

use vista_core::time::HostTime;

/// Returns the current host time from `performance.now()`, in microsecond
/// ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}
