// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The [`StyleStore`](crate::style::StyleStore) marks one channel (via
//! [`understory_dirty`]) per visual property it owns. All channels are
//! local-only: styles here are written per element and never inherited, so no
//! dependency edges are ever added.
//!
//! Each [`StyleStore::flush`](crate::style::StyleStore::flush) call drains all
//! channels and surfaces the results as
//! [`StyleChanges`](crate::style::StyleChanges), which backends
//! [consume](crate::backend::Presenter::apply).

use understory_dirty::Channel;

/// `opacity` changed.
pub const OPACITY: Channel = Channel::new(0);

/// `transform` changed.
pub const TRANSFORM: Channel = Channel::new(1);

/// `transition` changed.
pub const TRANSITION: Channel = Channel::new(2);

/// `visibility` changed.
pub const VISIBILITY: Channel = Channel::new(3);

/// `animation-play-state` changed.
pub const PLAY_STATE: Channel = Channel::new(4);

/// Text content changed.
pub const TEXT: Channel = Channel::new(5);

/// Accessibility attributes (`tabindex`, `role`) changed.
pub const ATTRIBUTES: Channel = Channel::new(6);

/// `left` / `top` changed.
pub const POSITION: Channel = Channel::new(7);

/// `display` changed.
pub const DISPLAY: Channel = Channel::new(8);
