// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document node identity.

use core::fmt;

/// A handle to an element in the host [`Document`](crate::document::Document).
///
/// Hosts hand out dense indices starting at zero and return the same handle
/// every time the same element is queried, so behaviours can key side-tables
/// on it and the [`StyleStore`](crate::style::StyleStore) can index its
/// arrays with it directly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
