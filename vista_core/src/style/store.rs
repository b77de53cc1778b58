// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays style storage indexed by node slot.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::value::{A11y, PlayState, Transition, Visibility};
use crate::dirty;
use crate::node::NodeId;
use crate::transform::StyleTransform;

/// Struct-of-arrays storage for every property the behaviours write.
///
/// Slots grow on demand as nodes are first written. A `None` entry means the
/// behaviours have never set that property and the host's stylesheet value
/// stands.
#[derive(Debug)]
pub struct StyleStore {
    pub(crate) opacity: Vec<Option<f64>>,
    pub(crate) transform: Vec<Option<StyleTransform>>,
    pub(crate) transition: Vec<Option<Transition>>,
    pub(crate) visibility: Vec<Option<Visibility>>,
    pub(crate) play_state: Vec<Option<PlayState>>,
    pub(crate) text: Vec<Option<String>>,
    pub(crate) a11y: Vec<Option<A11y>>,
    pub(crate) position: Vec<Option<Point>>,
    pub(crate) display_none: Vec<bool>,

    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for StyleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            opacity: Vec::new(),
            transform: Vec::new(),
            transition: Vec::new(),
            visibility: Vec::new(),
            play_state: Vec::new(),
            text: Vec::new(),
            a11y: Vec::new(),
            position: Vec::new(),
            display_none: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// Number of allocated slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.opacity.len()
    }

    /// Whether no slot has been allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.opacity.is_empty()
    }

    /// Grows every array so that `node` has a slot.
    fn ensure(&mut self, node: NodeId) -> usize {
        let idx = node.index();
        if self.opacity.len() <= idx {
            let len = idx + 1;
            self.opacity.resize(len, None);
            self.transform.resize(len, None);
            self.transition.resize(len, None);
            self.visibility.resize(len, None);
            self.play_state.resize(len, None);
            self.text.resize(len, None);
            self.a11y.resize(len, None);
            self.position.resize(len, None);
            self.display_none.resize(len, false);
        }
        idx
    }

    // -- Setters --

    /// Sets `opacity`.
    pub fn set_opacity(&mut self, node: NodeId, opacity: f64) {
        let idx = self.ensure(node);
        self.opacity[idx] = Some(opacity);
        self.dirty.mark(node.0, dirty::OPACITY);
    }

    /// Sets `transform`.
    pub fn set_transform(&mut self, node: NodeId, transform: StyleTransform) {
        let idx = self.ensure(node);
        self.transform[idx] = Some(transform);
        self.dirty.mark(node.0, dirty::TRANSFORM);
    }

    /// Sets `transition`.
    pub fn set_transition(&mut self, node: NodeId, transition: Transition) {
        let idx = self.ensure(node);
        self.transition[idx] = Some(transition);
        self.dirty.mark(node.0, dirty::TRANSITION);
    }

    /// Sets `visibility`.
    pub fn set_visibility(&mut self, node: NodeId, visibility: Visibility) {
        let idx = self.ensure(node);
        self.visibility[idx] = Some(visibility);
        self.dirty.mark(node.0, dirty::VISIBILITY);
    }

    /// Sets `animation-play-state`.
    ///
    /// Always marks the channel, even when the value is unchanged: hosts
    /// re-apply every toggle they are told about.
    pub fn set_play_state(&mut self, node: NodeId, state: PlayState) {
        let idx = self.ensure(node);
        self.play_state[idx] = Some(state);
        self.dirty.mark(node.0, dirty::PLAY_STATE);
    }

    /// Replaces the text content.
    pub fn set_text(&mut self, node: NodeId, text: String) {
        let idx = self.ensure(node);
        self.text[idx] = Some(text);
        self.dirty.mark(node.0, dirty::TEXT);
    }

    /// Sets the focus attributes.
    pub fn set_a11y(&mut self, node: NodeId, a11y: A11y) {
        let idx = self.ensure(node);
        self.a11y[idx] = Some(a11y);
        self.dirty.mark(node.0, dirty::ATTRIBUTES);
    }

    /// Sets `left` / `top` in CSS pixels.
    pub fn set_position(&mut self, node: NodeId, position: Point) {
        let idx = self.ensure(node);
        self.position[idx] = Some(position);
        self.dirty.mark(node.0, dirty::POSITION);
    }

    /// Sets or clears `display: none`.
    pub fn set_display_none(&mut self, node: NodeId, none: bool) {
        let idx = self.ensure(node);
        self.display_none[idx] = none;
        self.dirty.mark(node.0, dirty::DISPLAY);
    }

    // -- Getters --

    /// Returns the stored `opacity`.
    #[must_use]
    pub fn opacity(&self, node: NodeId) -> Option<f64> {
        self.opacity.get(node.index()).copied().flatten()
    }

    /// Returns the stored `transform`.
    #[must_use]
    pub fn transform(&self, node: NodeId) -> Option<StyleTransform> {
        self.transform.get(node.index()).copied().flatten()
    }

    /// Returns the stored `transition`.
    #[must_use]
    pub fn transition(&self, node: NodeId) -> Option<Transition> {
        self.transition.get(node.index()).copied().flatten()
    }

    /// Returns the stored `visibility`.
    #[must_use]
    pub fn visibility(&self, node: NodeId) -> Option<Visibility> {
        self.visibility.get(node.index()).copied().flatten()
    }

    /// Returns the stored `animation-play-state`.
    #[must_use]
    pub fn play_state(&self, node: NodeId) -> Option<PlayState> {
        self.play_state.get(node.index()).copied().flatten()
    }

    /// Returns the stored text content.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.text.get(node.index()).and_then(|t| t.as_deref())
    }

    /// Returns the stored focus attributes.
    #[must_use]
    pub fn a11y(&self, node: NodeId) -> Option<A11y> {
        self.a11y.get(node.index()).copied().flatten()
    }

    /// Returns the stored `left` / `top`.
    #[must_use]
    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.position.get(node.index()).copied().flatten()
    }

    /// Returns whether `display: none` is set.
    #[must_use]
    pub fn display_none(&self, node: NodeId) -> bool {
        self.display_none.get(node.index()).copied().unwrap_or(false)
    }
}
