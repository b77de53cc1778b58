// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM style writer.
//!
//! Translates [`StyleStore`] state into inline styles, text and attributes
//! of the page's own elements by applying incremental updates from
//! [`StyleChanges`].

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use vista_core::backend::Presenter;
use vista_core::node::NodeId;
use vista_core::style::{StyleChanges, StyleStore};

use crate::dom::ElementRegistry;

/// One DOM mutation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DomWrite {
    /// `element.style.setProperty(name, value)`.
    Style {
        node: NodeId,
        name: &'static str,
        value: String,
    },
    /// `element.style.removeProperty(name)`.
    RemoveStyle { node: NodeId, name: &'static str },
    /// `element.textContent = text`.
    Text { node: NodeId, text: Option<String> },
    /// `element.setAttribute(name, value)`.
    Attribute {
        node: NodeId,
        name: &'static str,
        value: String,
    },
}

fn style(node: NodeId, name: &'static str, value: String) -> DomWrite {
    DomWrite::Style { node, name, value }
}

/// The writes for `changes`, in application order.
///
/// Transitions go first so a same-frame opacity or transform change animates
/// with the new timing. Nodes whose value was cleared from the store are
/// skipped, except for text and display which have a meaningful empty state.
pub(crate) fn writes(store: &StyleStore, changes: &StyleChanges) -> Vec<DomWrite> {
    let mut out = Vec::new();
    for &node in &changes.transitions {
        if let Some(t) = store.transition(node) {
            out.push(style(node, "transition", t.to_string()));
        }
    }
    for &node in &changes.opacities {
        if let Some(o) = store.opacity(node) {
            out.push(style(node, "opacity", format!("{o}")));
        }
    }
    for &node in &changes.transforms {
        if let Some(t) = store.transform(node) {
            out.push(style(node, "transform", t.to_string()));
        }
    }
    for &node in &changes.visibilities {
        if let Some(v) = store.visibility(node) {
            out.push(style(node, "visibility", v.as_str().into()));
        }
    }
    for &node in &changes.play_states {
        if let Some(p) = store.play_state(node) {
            out.push(style(node, "animation-play-state", p.as_str().into()));
        }
    }
    for &node in &changes.texts {
        out.push(DomWrite::Text {
            node,
            text: store.text(node).map(Into::into),
        });
    }
    for &node in &changes.attributes {
        if let Some(a11y) = store.a11y(node) {
            out.push(DomWrite::Attribute {
                node,
                name: "tabindex",
                value: a11y.tab_index.to_string(),
            });
            out.push(DomWrite::Attribute {
                node,
                name: "role",
                value: a11y.role.into(),
            });
        }
    }
    for &node in &changes.positions {
        if let Some(p) = store.position(node) {
            out.push(style(node, "left", format!("{}px", p.x)));
            out.push(style(node, "top", format!("{}px", p.y)));
        }
    }
    for &node in &changes.displays {
        out.push(if store.display_none(node) {
            style(node, "display", "none".into())
        } else {
            DomWrite::RemoveStyle {
                node,
                name: "display",
            }
        });
    }
    out
}

/// Writes flushed changes to the elements in an [`ElementRegistry`].
///
/// Write failures (detached elements, rejected values) are ignored: a
/// cosmetic property that cannot be set is simply left as it was.
#[derive(Clone, Debug)]
pub struct DomPresenter {
    registry: ElementRegistry,
}

impl DomPresenter {
    /// Creates a presenter over `registry`.
    #[must_use]
    pub fn new(registry: ElementRegistry) -> Self {
        Self { registry }
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, store: &StyleStore, changes: &StyleChanges) {
        for write in writes(store, changes) {
            match write {
                DomWrite::Style { node, name, value } => {
                    if let Some(el) = self.registry.html_element(node) {
                        let _ = el.style().set_property(name, &value);
                    }
                }
                DomWrite::RemoveStyle { node, name } => {
                    if let Some(el) = self.registry.html_element(node) {
                        let _ = el.style().remove_property(name);
                    }
                }
                DomWrite::Text { node, text } => {
                    if let Some(el) = self.registry.element(node) {
                        el.set_text_content(text.as_deref());
                    }
                }
                DomWrite::Attribute { node, name, value } => {
                    if let Some(el) = self.registry.element(node) {
                        let _ = el.set_attribute(name, &value);
                    }
                }
            }
        }
    }
}
