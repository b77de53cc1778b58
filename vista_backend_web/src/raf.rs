// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `requestAnimationFrame` source.
//!
//! Unlike a free-running loop, [`FrameRequester`] registers a callback only
//! when asked to, and at most one at a time. The callback reports whether it
//! wants another frame; the requester re-arms only then. An idle page
//! therefore costs no frames at all.
//!
//! Each callback receives a [`DOMHighResTimeStamp`][mdn] (milliseconds from
//! `performance.now()`), converted to microsecond [`HostTime`] ticks.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use vista_core::time::HostTime;

// Direct global bindings instead of `web_sys::Window` methods, so no Window
// or Performance object has to be fetched on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// Kept alive while a frame is armed.
    ///
    /// Created once in [`FrameRequester::new`] and re-registered by
    /// reference, so requesting a frame allocates nothing.
    closure: RefCell<Option<RafClosure>>,

    /// Frame handler. Returns `true` to be called again next frame.
    callback: RefCell<Box<dyn FnMut(HostTime) -> bool>>,

    /// Whether a callback is currently registered.
    armed: Cell<bool>,

    /// The ID returned by the most recent `requestAnimationFrame` call.
    raf_id: Cell<i32>,
}

impl RafInner {
    fn arm(&self) {
        if self.armed.get() {
            return;
        }
        if let Some(ref closure) = *self.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.raf_id.set(id);
            self.armed.set(true);
        }
    }
}

/// Arms at most one `requestAnimationFrame` callback at a time.
pub struct FrameRequester {
    inner: Rc<RafInner>,
}

impl FrameRequester {
    /// Creates a requester that is **not yet armed**.
    ///
    /// `callback` runs on each delivered frame; returning `true` arms the
    /// next one.
    pub fn new(callback: impl FnMut(HostTime) -> bool + 'static) -> Self {
        let inner = Rc::new(RafInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            armed: Cell::new(false),
            raf_id: Cell::new(0),
        });

        // The closure only holds a weak handle; the requester owns the cycle.
        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.armed.set(false);

            let again = inner.callback.borrow_mut()(HostTime::from_millis_f64(timestamp_ms));
            if again {
                inner.arm();
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Arms a frame callback unless one is already pending.
    pub fn request(&self) {
        self.inner.arm();
    }

    /// Cancels the pending callback, if any.
    pub fn cancel(&self) {
        if self.inner.armed.replace(false) {
            cancel_animation_frame(self.inner.raf_id.get());
        }
    }
}

impl Drop for FrameRequester {
    fn drop(&mut self) {
        self.cancel();
        // Release the callback; nothing can fire after cancel.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for FrameRequester {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameRequester")
            .field("armed", &self.inner.armed.get())
            .finish_non_exhaustive()
    }
}
