// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A document of class-tagged boxes.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;

use vista_core::document::{Document, ScrollState};
use vista_core::node::NodeId;

#[derive(Clone, Debug, Default)]
struct Element {
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    bounds: Rect,
    parent: Option<NodeId>,
    css_text: Option<String>,
}

/// A flat, document-ordered element list.
///
/// Each element has a class list, attributes, a border box in document
/// coordinates and an optional parent. Selectors are comma-separated class
/// selectors (`".a, .b"`); anything else matches nothing.
#[derive(Clone, Debug)]
pub struct HeadlessPage {
    elements: Vec<Element>,
    scroll: ScrollState,
}

fn classes_of(selector: &str) -> impl Iterator<Item = &str> {
    selector
        .split(',')
        .map(str::trim)
        .filter_map(|s| s.strip_prefix('.'))
        .filter(|s| !s.is_empty())
}

impl HeadlessPage {
    /// Creates an empty page with the given viewport, scrolled to the top.
    #[must_use]
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            elements: Vec::new(),
            scroll: ScrollState {
                scroll_y: 0.0,
                viewport_height,
                viewport_width,
            },
        }
    }

    /// A 1280×800 desktop viewport.
    #[must_use]
    pub fn desktop() -> Self {
        Self::new(1280.0, 800.0)
    }

    fn push(&mut self, element: Element) -> NodeId {
        let id = u32::try_from(self.elements.len()).unwrap_or(u32::MAX);
        self.elements.push(element);
        NodeId(id)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.index())
    }

    /// Appends an element with every class in `classes` (`".a, .b"`).
    pub fn add(&mut self, classes: &str, bounds: Rect) -> NodeId {
        self.push(Element {
            classes: classes_of(classes).map(ToString::to_string).collect(),
            bounds,
            ..Element::default()
        })
    }

    /// Appends an element inside `parent`.
    pub fn add_child(&mut self, parent: NodeId, classes: &str, bounds: Rect) -> NodeId {
        let node = self.add(classes, bounds);
        if let Some(el) = self.get_mut(node) {
            el.parent = Some(parent);
        }
        node
    }

    /// Sets (or replaces) an attribute.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(el) = self.get_mut(node) else {
            return;
        };
        match el.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Sets the vertical scroll offset.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll.scroll_y = scroll_y;
    }

    /// Border box of `node` in document coordinates.
    ///
    /// Unknown nodes get an empty box far below any viewport.
    #[must_use]
    pub fn bounds(&self, node: NodeId) -> Rect {
        self.elements
            .get(node.index())
            .map_or(Rect::new(0.0, f64::MAX, 0.0, f64::MAX), |el| el.bounds)
    }

    /// Inline style of an overlay created through
    /// [`Document::append_overlay`].
    #[must_use]
    pub fn overlay_css(&self, node: NodeId) -> Option<&str> {
        self.elements.get(node.index())?.css_text.as_deref()
    }

    /// Number of elements, overlays included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the page has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn matches(&self, index: usize, selector: &str) -> bool {
        let classes = &self.elements[index].classes;
        classes_of(selector).any(|c| classes.iter().any(|k| k == c))
    }

    fn is_descendant(&self, index: usize, root: NodeId) -> bool {
        let mut cur = self.elements[index].parent;
        // Bounded by the element count, so a parent cycle cannot hang.
        for _ in 0..self.elements.len() {
            match cur {
                Some(p) if p == root => return true,
                Some(p) => cur = self.elements.get(p.index()).and_then(|el| el.parent),
                None => return false,
            }
        }
        false
    }

    fn select(&self, keep: impl Fn(usize) -> bool) -> Vec<NodeId> {
        (0..self.elements.len())
            .filter(|&i| keep(i))
            .filter_map(|i| u32::try_from(i).ok().map(NodeId))
            .collect()
    }
}

impl Document for HeadlessPage {
    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        self.select(|i| self.matches(i, selector))
    }

    fn query_within(&mut self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.select(|i| self.is_descendant(i, root) && self.matches(i, selector))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.elements
            .get(node.index())?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.elements
            .get(node.index())
            .map_or(0.0, |el| el.bounds.height())
    }

    fn scroll(&self) -> ScrollState {
        self.scroll
    }

    fn append_overlay(&mut self, css_text: &str) -> Option<NodeId> {
        Some(self.push(Element {
            css_text: Some(css_text.to_string()),
            ..Element::default()
        }))
    }
}
