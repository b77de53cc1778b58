// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Document`] over the live DOM.
//!
//! Behaviours only ever see [`NodeId`]s. The [`ElementRegistry`] hands out an
//! id the first time an element is returned from a query and maps it back when
//! the presenter or a notifier needs the real element. The registry is shared
//! (`Rc`) between the document, the notifiers and the presenter.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use web_sys::{Element, HtmlElement, NodeList, Window};

use vista_core::document::{Document, ScrollState};
use vista_core::node::NodeId;

/// Shared element ↔ [`NodeId`] table.
#[derive(Clone, Debug, Default)]
pub struct ElementRegistry {
    elements: Rc<RefCell<Vec<Element>>>,
}

impl ElementRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `element`, registering it on first sight.
    pub fn id_of(&self, element: &Element) -> NodeId {
        if let Some(id) = self.lookup(element) {
            return id;
        }
        let mut elements = self.elements.borrow_mut();
        elements.push(element.clone());
        NodeId(u32::try_from(elements.len() - 1).unwrap_or(u32::MAX))
    }

    /// Returns the id of `element` if it has been registered.
    #[must_use]
    pub fn lookup(&self, element: &Element) -> Option<NodeId> {
        self.elements
            .borrow()
            .iter()
            .position(|e| e == element)
            .and_then(|i| u32::try_from(i).ok())
            .map(NodeId)
    }

    /// Returns the element registered under `node`.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.elements.borrow().get(node.index()).cloned()
    }

    /// Returns the element registered under `node` as an [`HtmlElement`].
    #[must_use]
    pub fn html_element(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into().ok()
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }

    fn ids_of(&self, list: &NodeList) -> Vec<NodeId> {
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.id_of(&el))
            .collect()
    }
}

/// The page's `window` and `document`, seen through [`Document`].
pub struct DomDocument {
    window: Window,
    document: web_sys::Document,
    registry: ElementRegistry,
}

impl core::fmt::Debug for DomDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomDocument")
            .field("registry_len", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl DomDocument {
    /// Wraps `window` and its document.
    #[must_use]
    pub fn new(window: Window, document: web_sys::Document, registry: ElementRegistry) -> Self {
        Self {
            window,
            document,
            registry,
        }
    }
}

impl Document for DomDocument {
    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        match self.document.query_selector_all(selector) {
            Ok(list) => self.registry.ids_of(&list),
            Err(_) => Vec::new(),
        }
    }

    fn query(&mut self, selector: &str) -> Option<NodeId> {
        let el = self.document.query_selector(selector).ok()??;
        Some(self.registry.id_of(&el))
    }

    fn query_within(&mut self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(root) = self.registry.element(root) else {
            return Vec::new();
        };
        match root.query_selector_all(selector) {
            Ok(list) => self.registry.ids_of(&list),
            Err(_) => Vec::new(),
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.registry.element(node)?.get_attribute(name)
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.registry
            .html_element(node)
            .map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn scroll(&self) -> ScrollState {
        let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        ScrollState {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            viewport_height: dimension(self.window.inner_height()),
            viewport_width: dimension(self.window.inner_width()),
        }
    }

    fn append_overlay(&mut self, css_text: &str) -> Option<NodeId> {
        let body = self.document.body()?;
        let el: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
        el.style().set_css_text(css_text);
        body.append_child(&el).ok()?;
        Some(self.registry.id_of(&el))
    }
}
