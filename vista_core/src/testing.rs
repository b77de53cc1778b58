// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-crate test doubles for [`Document`] and [`NotifierFactory`].

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::backend::{Notifier, NotifierFactory};
use crate::document::{Document, ScrollState};
use crate::node::NodeId;
use crate::visibility::{NotifierConfig, Watch};

#[derive(Clone, Debug, Default)]
struct FakeNode {
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    height: f64,
    parent: Option<NodeId>,
    css_text: Option<String>,
}

/// A flat element list with class selectors and a settable scroll state.
#[derive(Debug)]
pub(crate) struct FakeDocument {
    nodes: Vec<FakeNode>,
    scroll: ScrollState,
}

/// Builder returned by [`FakeDocument::add`].
pub(crate) struct FakeNodeMut<'a> {
    doc: &'a mut FakeDocument,
    id: NodeId,
}

impl FakeNodeMut<'_> {
    pub(crate) fn with_height(self, height: f64) -> Self {
        self.doc.nodes[self.id.index()].height = height;
        self
    }

    pub(crate) fn with_attr(self, name: &str, value: &str) -> Self {
        self.doc.nodes[self.id.index()]
            .attributes
            .push((name.to_string(), value.to_string()));
        self
    }

    pub(crate) fn child_of(self, parent: NodeId) -> Self {
        self.doc.nodes[self.id.index()].parent = Some(parent);
        self
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }
}

fn class_list(selector: &str) -> impl Iterator<Item = &str> {
    selector
        .split(',')
        .map(|s| s.trim().trim_start_matches('.'))
        .filter(|s| !s.is_empty())
}

impl FakeDocument {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            scroll: ScrollState {
                scroll_y: 0.0,
                viewport_height: 800.0,
                viewport_width: 1280.0,
            },
        }
    }

    /// Appends an element carrying every class in `classes` (`".a, .b"`).
    pub(crate) fn add(&mut self, classes: &str) -> FakeNodeMut<'_> {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap());
        self.nodes.push(FakeNode {
            classes: class_list(classes).map(ToString::to_string).collect(),
            ..FakeNode::default()
        });
        FakeNodeMut { doc: self, id }
    }

    pub(crate) fn set_scroll_y(&mut self, y: f64) {
        self.scroll.scroll_y = y;
    }

    pub(crate) fn set_viewport_width(&mut self, width: f64) {
        self.scroll.viewport_width = width;
    }

    pub(crate) fn css_text(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.index()].css_text.as_deref()
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    fn matches(&self, node: usize, selector: &str) -> bool {
        let classes = &self.nodes[node].classes;
        class_list(selector).any(|c| classes.iter().any(|k| k == c))
    }

    fn is_descendant(&self, node: usize, root: NodeId) -> bool {
        let mut cur = self.nodes[node].parent;
        while let Some(p) = cur {
            if p == root {
                return true;
            }
            cur = self.nodes[p.index()].parent;
        }
        false
    }

    fn ids(&self) -> impl Iterator<Item = (usize, NodeId)> {
        (0..self.nodes.len()).map(|i| (i, NodeId(u32::try_from(i).unwrap())))
    }
}

impl Document for FakeDocument {
    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        self.ids()
            .filter(|&(i, _)| self.matches(i, selector))
            .map(|(_, id)| id)
            .collect()
    }

    fn query_within(&mut self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.ids()
            .filter(|&(i, _)| self.is_descendant(i, root) && self.matches(i, selector))
            .map(|(_, id)| id)
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes
            .get(node.index())?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.nodes.get(node.index()).map_or(0.0, |n| n.height)
    }

    fn scroll(&self) -> ScrollState {
        self.scroll
    }

    fn append_overlay(&mut self, css_text: &str) -> Option<NodeId> {
        let id = NodeId(u32::try_from(self.nodes.len()).ok()?);
        self.nodes.push(FakeNode {
            css_text: Some(css_text.to_string()),
            ..FakeNode::default()
        });
        Some(id)
    }
}

/// One call made against a [`RecordingFactory`] or its notifiers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum NotifierCall {
    Create(Watch, NotifierConfig),
    Observe(Watch, NodeId),
    Unobserve(Watch, NodeId),
}

/// Factory whose notifiers log every call into a shared list.
#[derive(Debug, Default)]
pub(crate) struct RecordingFactory {
    log: Rc<RefCell<Vec<NotifierCall>>>,
}

struct RecordingNotifier {
    watch: Watch,
    log: Rc<RefCell<Vec<NotifierCall>>>,
}

impl Notifier for RecordingNotifier {
    fn observe(&mut self, node: NodeId) {
        self.log
            .borrow_mut()
            .push(NotifierCall::Observe(self.watch, node));
    }

    fn unobserve(&mut self, node: NodeId) {
        self.log
            .borrow_mut()
            .push(NotifierCall::Unobserve(self.watch, node));
    }
}

impl NotifierFactory for RecordingFactory {
    fn create(&mut self, watch: Watch, config: NotifierConfig) -> Box<dyn Notifier> {
        self.log
            .borrow_mut()
            .push(NotifierCall::Create(watch, config));
        Box::new(RecordingNotifier {
            watch,
            log: Rc::clone(&self.log),
        })
    }
}

impl RecordingFactory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<NotifierCall> {
        self.log.borrow().clone()
    }

    /// Watches a notifier was created for, in creation order.
    pub(crate) fn created(&self) -> Vec<Watch> {
        self.log
            .borrow()
            .iter()
            .filter_map(|c| match c {
                NotifierCall::Create(w, _) => Some(*w),
                _ => None,
            })
            .collect()
    }

    /// Nodes currently observed under `watch`.
    pub(crate) fn observed(&self, watch: Watch) -> Vec<NodeId> {
        let mut live = Vec::new();
        for call in self.log.borrow().iter() {
            match *call {
                NotifierCall::Observe(w, n) if w == watch => live.push(n),
                NotifierCall::Unobserve(w, n) if w == watch => live.retain(|&m| m != n),
                _ => {}
            }
        }
        live
    }
}
