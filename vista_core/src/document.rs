// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read access to the host document.
//!
//! Behaviours never hold platform element references. They query the host
//! through [`Document`] and keep only [`NodeId`] handles; writes go through the
//! [`StyleStore`](crate::style::StyleStore) instead.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::node::NodeId;

/// A snapshot of the page's scroll position and viewport size, in CSS pixels.
///
/// Read fresh from the host on every handled frame; never cached.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Vertical scroll offset of the page.
    pub scroll_y: f64,
    /// Height of the layout viewport.
    pub viewport_height: f64,
    /// Width of the layout viewport.
    pub viewport_width: f64,
}

impl ScrollState {
    /// Returns the viewport rectangle in document coordinates.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll_y,
            self.viewport_width,
            self.scroll_y + self.viewport_height,
        )
    }
}

/// Query interface onto the host document tree.
///
/// Selectors are CSS selector strings; hosts must support at least single
/// class selectors and comma-separated lists of them. Results are in document
/// order.
pub trait Document {
    /// Returns every element matching `selector`.
    fn query_all(&mut self, selector: &str) -> Vec<NodeId>;

    /// Returns the first element matching `selector`, if any.
    fn query(&mut self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// Returns every descendant of `root` matching `selector`.
    fn query_within(&mut self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// Returns the value of an attribute on `node`.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Returns the rendered height of `node` in CSS pixels.
    fn offset_height(&self, node: NodeId) -> f64;

    /// Returns the current scroll position and viewport size.
    fn scroll(&self) -> ScrollState;

    /// Appends a new overlay element to the document body with the given
    /// inline style, returning its handle.
    ///
    /// Returns `None` if the host cannot create elements.
    fn append_overlay(&mut self, css_text: &str) -> Option<NodeId>;
}
