// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual property storage.
//!
//! Behaviours never touch host elements directly. They write the properties
//! they own into a [`StyleStore`], keyed by [`NodeId`](crate::node::NodeId):
//!
//! - [`opacity`](StyleStore::set_opacity), [`transform`](StyleStore::set_transform),
//!   [`transition`](StyleStore::set_transition),
//!   [`visibility`](StyleStore::set_visibility),
//!   [`animation-play-state`](StyleStore::set_play_state), and
//!   [`display`](StyleStore::set_display_none) map to inline CSS.
//! - [`text`](StyleStore::set_text) replaces the element's text content.
//! - [`a11y`](StyleStore::set_a11y) sets `tabindex` and `role`.
//! - [`position`](StyleStore::set_position) maps to `left` / `top`.
//!
//! Every write marks the matching [`dirty`](crate::dirty) channel;
//! [`flush`](StyleStore::flush) drains them into [`StyleChanges`] for the
//! host's [`Presenter`](crate::backend::Presenter).
//!
//! Ownership of properties is partitioned across behaviours: no two
//! behaviours write the same property of the same node.

mod flush;
mod store;
mod value;

pub use flush::StyleChanges;
pub use store::StyleStore;
pub use value::{A11y, PlayState, Transition, TransitionProperties, Visibility};
