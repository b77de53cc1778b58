// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver`-backed notifiers.
//!
//! Each [`DomNotifier`] owns one observer configured from a
//! [`NotifierConfig`]. The observer's callback converts its entries into
//! [`VisibilityEntry`] values and hands the whole batch to a
//! [`VisibilityHandler`] tagged with the notifier's [`Watch`].

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use js_sys::Array;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use vista_core::backend::{Notifier, NotifierFactory};
use vista_core::node::NodeId;
use vista_core::visibility::{NotifierConfig, VisibilityEntry, Watch};

use crate::dom::ElementRegistry;

/// Receives every batch of crossings.
pub type VisibilityHandler = Rc<dyn Fn(Watch, &[VisibilityEntry])>;

type ObserverClosure = Closure<dyn FnMut(Array)>;

/// One `IntersectionObserver` and the closure it calls.
pub struct DomNotifier {
    observer: Option<IntersectionObserver>,
    registry: ElementRegistry,
    // Kept alive for as long as the observer may call it.
    _closure: ObserverClosure,
}

impl core::fmt::Debug for DomNotifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomNotifier")
            .field("connected", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

fn observer_init(config: NotifierConfig) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin.to_css());
    init
}

impl DomNotifier {
    /// Creates a notifier for `watch`.
    ///
    /// If the browser refuses to construct the observer the notifier is
    /// disconnected: `observe` does nothing and no crossing is ever
    /// delivered.
    pub fn new(
        watch: Watch,
        config: NotifierConfig,
        registry: ElementRegistry,
        handler: VisibilityHandler,
    ) -> Self {
        let lookup = registry.clone();
        let closure = Closure::wrap(Box::new(move |entries: Array| {
            let batch: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let node = lookup.lookup(&entry.target())?;
                    let visible =
                        config.is_visible(entry.is_intersecting(), entry.intersection_ratio());
                    Some(VisibilityEntry { node, visible })
                })
                .collect();
            if !batch.is_empty() {
                handler(watch, &batch);
            }
        }) as Box<dyn FnMut(Array)>);

        let observer = IntersectionObserver::new_with_options(
            closure.as_ref().unchecked_ref(),
            &observer_init(config),
        );
        if let Err(err) = &observer {
            tracing::error!(?watch, ?err, "IntersectionObserver unavailable");
        }
        Self {
            observer: observer.ok(),
            registry,
            _closure: closure,
        }
    }
}

impl Notifier for DomNotifier {
    fn observe(&mut self, node: NodeId) {
        if let (Some(observer), Some(el)) = (&self.observer, self.registry.element(node)) {
            observer.observe(&el);
        }
    }

    fn unobserve(&mut self, node: NodeId) {
        if let (Some(observer), Some(el)) = (&self.observer, self.registry.element(node)) {
            observer.unobserve(&el);
        }
    }
}

impl Drop for DomNotifier {
    fn drop(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

/// Creates a [`DomNotifier`] per watch, all reporting to one handler.
pub struct DomNotifierFactory {
    registry: ElementRegistry,
    handler: VisibilityHandler,
}

impl core::fmt::Debug for DomNotifierFactory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomNotifierFactory").finish_non_exhaustive()
    }
}

impl DomNotifierFactory {
    /// Creates a factory whose notifiers share `registry` and `handler`.
    #[must_use]
    pub fn new(registry: ElementRegistry, handler: VisibilityHandler) -> Self {
        Self { registry, handler }
    }
}

impl NotifierFactory for DomNotifierFactory {
    fn create(&mut self, watch: Watch, config: NotifierConfig) -> Box<dyn Notifier> {
        Box::new(DomNotifier::new(
            watch,
            config,
            self.registry.clone(),
            Rc::clone(&self.handler),
        ))
    }
}
