// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draining dirty channels into per-frame change lists.
//!
//! No value is recomputed here; every channel is local-only, so a flush just
//! collects the marked nodes. Backends read current values back from the
//! store through its getters.

use alloc::vec::Vec;

use understory_dirty::Channel;

use super::store::StyleStore;
use crate::dirty;
use crate::node::NodeId;

/// The set of changes produced by a single [`StyleStore::flush`] call.
///
/// Each field lists the nodes whose property in that category was written
/// since the previous flush.
#[derive(Clone, Debug, Default)]
pub struct StyleChanges {
    /// Nodes whose `opacity` was written.
    pub opacities: Vec<NodeId>,
    /// Nodes whose `transform` was written.
    pub transforms: Vec<NodeId>,
    /// Nodes whose `transition` was written.
    pub transitions: Vec<NodeId>,
    /// Nodes whose `visibility` was written.
    pub visibilities: Vec<NodeId>,
    /// Nodes whose `animation-play-state` was written.
    pub play_states: Vec<NodeId>,
    /// Nodes whose text content was written.
    pub texts: Vec<NodeId>,
    /// Nodes whose focus attributes were written.
    pub attributes: Vec<NodeId>,
    /// Nodes whose `left` / `top` were written.
    pub positions: Vec<NodeId>,
    /// Nodes whose `display` was written.
    pub displays: Vec<NodeId>,
}

impl StyleChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.opacities.clear();
        self.transforms.clear();
        self.transitions.clear();
        self.visibilities.clear();
        self.play_states.clear();
        self.texts.clear();
        self.attributes.clear();
        self.positions.clear();
        self.displays.clear();
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.opacities.is_empty()
            && self.transforms.is_empty()
            && self.transitions.is_empty()
            && self.visibilities.is_empty()
            && self.play_states.is_empty()
            && self.texts.is_empty()
            && self.attributes.is_empty()
            && self.positions.is_empty()
            && self.displays.is_empty()
    }
}

impl StyleStore {
    /// Drains every dirty channel and returns the nodes that changed.
    pub fn flush(&mut self) -> StyleChanges {
        let mut changes = StyleChanges::default();
        self.flush_into(&mut changes);
        changes
    }

    /// Like [`flush`](Self::flush), but reuses a caller-provided buffer to
    /// avoid allocation.
    pub fn flush_into(&mut self, changes: &mut StyleChanges) {
        changes.clear();
        self.drain_channel(dirty::OPACITY, &mut changes.opacities);
        self.drain_channel(dirty::TRANSFORM, &mut changes.transforms);
        self.drain_channel(dirty::TRANSITION, &mut changes.transitions);
        self.drain_channel(dirty::VISIBILITY, &mut changes.visibilities);
        self.drain_channel(dirty::PLAY_STATE, &mut changes.play_states);
        self.drain_channel(dirty::TEXT, &mut changes.texts);
        self.drain_channel(dirty::ATTRIBUTES, &mut changes.attributes);
        self.drain_channel(dirty::POSITION, &mut changes.positions);
        self.drain_channel(dirty::DISPLAY, &mut changes.displays);
    }

    fn drain_channel(&mut self, channel: Channel, out: &mut Vec<NodeId>) {
        out.extend(
            self.dirty
                .drain(channel)
                .deterministic()
                .run()
                .map(NodeId),
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;
    use crate::style::PlayState;
    use crate::transform::StyleTransform;

    #[test]
    fn flush_reports_written_nodes_per_channel() {
        let mut store = StyleStore::new();
        store.set_opacity(NodeId(0), 1.0);
        store.set_transform(NodeId(2), StyleTransform::translate_y(4.0));
        store.set_text(NodeId(1), String::from("12+"));

        let changes = store.flush();
        assert_eq!(changes.opacities, [NodeId(0)]);
        assert_eq!(changes.transforms, [NodeId(2)]);
        assert_eq!(changes.texts, [NodeId(1)]);
        assert!(changes.play_states.is_empty());
    }

    #[test]
    fn second_flush_without_writes_is_empty() {
        let mut store = StyleStore::new();
        store.set_play_state(NodeId(0), PlayState::Running);
        assert!(!store.flush().is_empty());
        assert!(store.flush().is_empty());
    }

    #[test]
    fn repeated_writes_between_flushes_report_once() {
        let mut store = StyleStore::new();
        store.set_opacity(NodeId(1), 0.9);
        store.set_opacity(NodeId(1), 0.8);
        let changes = store.flush();
        assert_eq!(changes.opacities, [NodeId(1)]);
        assert_eq!(store.opacity(NodeId(1)), Some(0.8));
    }
}
