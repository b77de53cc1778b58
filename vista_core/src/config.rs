// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities injected at composition time.
//!
//! Preferences are read once, when the page boots, and handed to
//! [`Landing::attach`](crate::landing::Landing::attach). Behaviours never
//! re-query the host, so a session behaves deterministically even if the
//! user flips a preference mid-visit.

/// What the host allows and what the page opts into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// The user asked for minimised animation
    /// (`prefers-reduced-motion: reduce`).
    pub reduced_motion: bool,
    /// Enable the mouse-following cursor trail.
    pub cursor_trail: bool,
}

impl Capabilities {
    /// Full motion, cursor trail off.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            reduced_motion: false,
            cursor_trail: false,
        }
    }

    /// Reduced motion, cursor trail off.
    #[must_use]
    pub const fn reduced_motion() -> Self {
        Self {
            reduced_motion: true,
            cursor_trail: false,
        }
    }

    /// Returns `self` with the cursor trail enabled.
    #[must_use]
    pub const fn with_cursor_trail(self) -> Self {
        Self {
            reduced_motion: self.reduced_motion,
            cursor_trail: true,
        }
    }

    /// Whether motion-only behaviours may run.
    #[must_use]
    pub const fn allows_motion(&self) -> bool {
        !self.reduced_motion
    }
}
