// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard access to the feature cards.

use alloc::vec::Vec;

use tracing::debug;

use crate::document::Document;
use crate::node::NodeId;
use crate::style::{A11y, StyleStore};

/// Cards made focusable.
pub const CARD_SELECTOR: &str = ".glass-card";

/// Attributes written on every card.
pub const CARD_A11Y: A11y = A11y {
    tab_index: 0,
    role: "article",
};

/// What the host should do with a key press on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Prevent the default action and dispatch a click on the card.
    Activate,
    /// Let the event through untouched.
    Ignore,
}

/// Maps a `KeyboardEvent.key` value to its action on a focused card.
#[must_use]
pub fn classify_key(key: &str) -> KeyAction {
    match key {
        "Enter" | " " => KeyAction::Activate,
        _ => KeyAction::Ignore,
    }
}

/// Focus attributes and key activation for cards.
#[derive(Clone, Debug, Default)]
pub struct KeyboardNavigation {
    cards: Vec<NodeId>,
}

impl KeyboardNavigation {
    /// Makes every card focusable.
    pub fn attach(doc: &mut dyn Document, store: &mut StyleStore) -> Self {
        let cards = doc.query_all(CARD_SELECTOR);
        for &card in &cards {
            store.set_a11y(card, CARD_A11Y);
        }
        debug!(cards = cards.len(), "keyboard navigation attached");
        Self { cards }
    }

    /// Cards the host should listen for key presses on.
    #[must_use]
    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }

    /// Handles a key press on `node`.
    #[must_use]
    pub fn on_key(&self, node: NodeId, key: &str) -> KeyAction {
        if self.cards.contains(&node) {
            classify_key(key)
        } else {
            KeyAction::Ignore
        }
    }
}
