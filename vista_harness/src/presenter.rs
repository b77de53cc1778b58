// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A presenter that remembers what it was told.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Point;

use vista_core::backend::Presenter;
use vista_core::node::NodeId;
use vista_core::style::{StyleChanges, StyleStore};

/// One channel of [`StyleChanges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// `transition`.
    Transition,
    /// `opacity`.
    Opacity,
    /// `transform`.
    Transform,
    /// `visibility`.
    Visibility,
    /// `animation-play-state`.
    PlayState,
    /// Text content.
    Text,
    /// `tabindex` and `role`.
    Attributes,
    /// `left` and `top`.
    Position,
    /// `display`.
    Display,
}

/// What an element currently shows, as a DOM would hold it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rendered {
    /// Inline `opacity`.
    pub opacity: Option<f64>,
    /// Inline `transform`, as CSS.
    pub transform: Option<String>,
    /// Inline `transition`, as CSS.
    pub transition: Option<String>,
    /// Inline `visibility`.
    pub visibility: Option<&'static str>,
    /// Inline `animation-play-state`.
    pub play_state: Option<&'static str>,
    /// Text content.
    pub text: Option<String>,
    /// `tabindex` attribute.
    pub tab_index: Option<i32>,
    /// `role` attribute.
    pub role: Option<&'static str>,
    /// Inline `left`/`top`.
    pub position: Option<Point>,
    /// Inline `display: none`.
    pub display_none: bool,
}

/// Applies changes to an in-memory element map and logs every write.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    rendered: BTreeMap<NodeId, Rendered>,
    texts: BTreeMap<NodeId, Vec<String>>,
    log: Vec<(NodeId, Property)>,
    applies: u64,
}

impl RecordingPresenter {
    /// Creates a presenter with nothing rendered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `node`, if anything was ever written to it.
    #[must_use]
    pub fn rendered(&self, node: NodeId) -> Option<&Rendered> {
        self.rendered.get(&node)
    }

    /// Every write, in application order.
    #[must_use]
    pub fn log(&self) -> &[(NodeId, Property)] {
        &self.log
    }

    /// Number of writes of `property` to `node`.
    #[must_use]
    pub fn writes(&self, node: NodeId, property: Property) -> usize {
        self.log
            .iter()
            .filter(|&&(n, p)| n == node && p == property)
            .count()
    }

    /// Every text written to `node`, oldest first.
    #[must_use]
    pub fn text_history(&self, node: NodeId) -> &[String] {
        self.texts.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Number of non-empty change sets applied.
    #[must_use]
    pub fn applies(&self) -> u64 {
        self.applies
    }

    fn write(&mut self, node: NodeId, property: Property) -> &mut Rendered {
        self.log.push((node, property));
        self.rendered.entry(node).or_default()
    }
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, store: &StyleStore, changes: &StyleChanges) {
        if changes.is_empty() {
            return;
        }
        self.applies += 1;

        for &node in &changes.transitions {
            let value = store.transition(node).map(|t| t.to_string());
            self.write(node, Property::Transition).transition = value;
        }
        for &node in &changes.opacities {
            let value = store.opacity(node);
            self.write(node, Property::Opacity).opacity = value;
        }
        for &node in &changes.transforms {
            let value = store.transform(node).map(|t| t.to_string());
            self.write(node, Property::Transform).transform = value;
        }
        for &node in &changes.visibilities {
            let value = store.visibility(node).map(|v| v.as_str());
            self.write(node, Property::Visibility).visibility = value;
        }
        for &node in &changes.play_states {
            let value = store.play_state(node).map(|p| p.as_str());
            self.write(node, Property::PlayState).play_state = value;
        }
        for &node in &changes.texts {
            let value = store.text(node).map(ToString::to_string);
            if let Some(text) = &value {
                self.texts.entry(node).or_default().push(text.clone());
            }
            self.write(node, Property::Text).text = value;
        }
        for &node in &changes.attributes {
            let a11y = store.a11y(node);
            let rendered = self.write(node, Property::Attributes);
            rendered.tab_index = a11y.map(|a| a.tab_index);
            rendered.role = a11y.map(|a| a.role);
        }
        for &node in &changes.positions {
            let value = store.position(node);
            self.write(node, Property::Position).position = value;
        }
        for &node in &changes.displays {
            let value = store.display_none(node);
            self.write(node, Property::Display).display_none = value;
        }
    }
}
