// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The start-up hook.
//!
//! Runs once the document is ready (immediately if it already is), reads the
//! host preferences once, attaches the [`Landing`] and wires the browser
//! events to it:
//!
//! | event | target | handler |
//! |---|---|---|
//! | `scroll` (passive) | window | [`Landing::on_scroll`] |
//! | observer callback | per watch | [`Landing::on_visibility`] |
//! | `keydown` | each card | [`Landing::on_key`] |
//! | `mousemove` | document | [`Landing::on_pointer_move`] |
//! | `load` | window | [`Landing::on_load`] |
//! | `error` | window | logged |
//!
//! After each event the store is flushed to the presenter and a frame is
//! requested if the landing has queued work.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::Point;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, ErrorEvent, EventTarget, KeyboardEvent, MouseEvent, Window};

use vista_core::backend::Presenter as _;
use vista_core::config::Capabilities;
use vista_core::keyboard::KeyAction;
use vista_core::landing::Landing;
use vista_core::time::HostTime;
use vista_core::trace::Tracer;
use vista_core::visibility::{VisibilityEntry, Watch};

use crate::dom::{DomDocument, ElementRegistry};
use crate::error::SetupError;
use crate::observer::{DomNotifierFactory, VisibilityHandler};
use crate::presenter::DomPresenter;
use crate::raf::FrameRequester;
use crate::sink::TracingSink;

/// Media query for the reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// `<body>` attribute that opts the page into the cursor trail.
pub const CURSOR_TRAIL_ATTRIBUTE: &str = "data-cursor-trail";

/// Start-up options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Force the cursor trail on or off. `None` enables it when `<body>`
    /// carries [`CURSOR_TRAIL_ATTRIBUTE`].
    pub cursor_trail: Option<bool>,
}

struct App {
    landing: Landing,
    document: DomDocument,
    presenter: DomPresenter,
    sink: TracingSink,
}

impl App {
    fn present(&mut self) {
        let changes = self.landing.flush();
        if !changes.is_empty() {
            self.presenter.apply(self.landing.store(), &changes);
        }
    }

    fn frame(&mut self, now: HostTime) -> bool {
        let mut tracer = Tracer::new(&mut self.sink);
        self.landing.on_frame(now, &mut self.document, &mut tracer);
        self.present();
        self.landing.has_pending_frame()
    }

    fn visibility(&mut self, watch: Watch, entries: &[VisibilityEntry]) -> bool {
        let mut tracer = Tracer::new(&mut self.sink);
        self.landing
            .on_visibility(watch, entries, &mut self.document, &mut tracer);
        self.present();
        self.landing.has_pending_frame()
    }

    fn load(&mut self, now: HostTime) -> bool {
        self.landing.on_load(now, &mut self.document);
        self.present();
        self.landing.has_pending_frame()
    }
}

type Shared = Rc<RefCell<Option<App>>>;

/// Runs `f` on the app unless it is not built yet or already borrowed.
fn with_app<R>(shared: &Shared, f: impl FnOnce(&mut App) -> R) -> Option<R> {
    let Ok(mut slot) = shared.try_borrow_mut() else {
        tracing::warn!("event dropped: app busy");
        return None;
    };
    slot.as_mut().map(f)
}

fn listen<E: JsCast + 'static>(
    target: &EventTarget,
    kind: &'static str,
    passive: bool,
    mut handler: impl FnMut(E) + 'static,
) -> Result<(), SetupError> {
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(SetupError::js("add an event listener"))?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn capabilities(window: &Window, document: &web_sys::Document, options: Options) -> Capabilities {
    let reduced_motion = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    let cursor_trail = options.cursor_trail.unwrap_or_else(|| {
        document
            .body()
            .is_some_and(|body| body.has_attribute(CURSOR_TRAIL_ATTRIBUTE))
    });
    Capabilities {
        reduced_motion,
        cursor_trail,
    }
}

/// The wasm entry point: installs the panic hook and the `tracing`
/// subscriber, then runs [`start_with`] with default [`Options`].
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    start_with(Options::default())?;
    Ok(())
}

/// Logs uncaught errors and schedules [`Landing::attach`] for when the
/// document is ready.
///
/// Does not install a panic hook or a subscriber; embedders that call this
/// directly set up their own.
pub fn start_with(options: Options) -> Result<(), SetupError> {
    let window = web_sys::window().ok_or(SetupError::NoWindow)?;
    let document = window.document().ok_or(SetupError::NoDocument)?;

    listen::<ErrorEvent>(&window, "error", false, |event| {
        tracing::error!(message = %event.message(), "uncaught error");
    })?;

    if document.ready_state() == "loading" {
        let ready_window = window.clone();
        listen::<web_sys::Event>(&document, "DOMContentLoaded", false, move |_| {
            if let Err(err) = init(ready_window.clone(), options) {
                tracing::error!(%err, "start-up failed");
            }
        })
    } else {
        init(window, options)
    }
}

fn init(window: Window, options: Options) -> Result<(), SetupError> {
    let document = window.document().ok_or(SetupError::NoDocument)?;
    let caps = capabilities(&window, &document, options);
    let registry = ElementRegistry::new();
    let shared: Shared = Rc::new(RefCell::new(None));

    let frames = Rc::new(FrameRequester::new({
        let shared = Rc::clone(&shared);
        move |now| with_app(&shared, |app| app.frame(now)).unwrap_or(false)
    }));

    let handler: VisibilityHandler = {
        let shared = Rc::clone(&shared);
        let frames = Rc::clone(&frames);
        Rc::new(move |watch: Watch, entries: &[VisibilityEntry]| {
            if with_app(&shared, |app| app.visibility(watch, entries)).unwrap_or(false) {
                frames.request();
            }
        })
    };

    let mut dom = DomDocument::new(window.clone(), document.clone(), registry.clone());
    let mut factory = DomNotifierFactory::new(registry.clone(), handler);
    let mut sink = TracingSink;
    let landing = Landing::attach(caps, &mut dom, &mut factory, &mut Tracer::new(&mut sink));

    let cards = landing.keyboard().cards().to_vec();
    let wants_scroll = landing.wants_scroll();
    let wants_pointer = landing.cursor().ball().is_some();

    let mut app = App {
        landing,
        document: dom,
        presenter: DomPresenter::new(registry.clone()),
        sink,
    };
    app.present();
    let pending = app.landing.has_pending_frame();
    *shared.borrow_mut() = Some(app);
    if pending {
        frames.request();
    }

    if wants_scroll {
        let shared = Rc::clone(&shared);
        let frames = Rc::clone(&frames);
        listen::<web_sys::Event>(&window, "scroll", true, move |_| {
            if with_app(&shared, |app| app.landing.on_scroll()).unwrap_or(false) {
                frames.request();
            }
        })?;
    }

    for card in cards {
        let (Some(target), Some(html)) = (registry.element(card), registry.html_element(card))
        else {
            continue;
        };
        let shared = Rc::clone(&shared);
        listen::<KeyboardEvent>(&target, "keydown", false, move |event| {
            let action = with_app(&shared, |app| app.landing.on_key(card, &event.key()));
            if action == Some(KeyAction::Activate) {
                event.prevent_default();
                html.click();
            }
        })?;
    }

    if wants_pointer {
        let shared = Rc::clone(&shared);
        listen::<MouseEvent>(&document, "mousemove", true, move |event| {
            let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            with_app(&shared, |app| app.landing.on_pointer_move(pointer));
        })?;
    }

    if document.ready_state() == "complete" {
        if with_app(&shared, |app| app.load(crate::now())).unwrap_or(false) {
            frames.request();
        }
    } else {
        let shared = Rc::clone(&shared);
        let frames = Rc::clone(&frames);
        listen::<web_sys::Event>(&window, "load", false, move |_| {
            if with_app(&shared, |app| app.load(crate::now())).unwrap_or(false) {
                frames.request();
            }
        })?;
    }

    // The requester, observers and listeners now keep each other alive for
    // the page's lifetime.
    core::mem::forget(frames);
    Ok(())
}
