// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The CSS transforms the behaviours write.
//!
//! Every transform in this crate is a vertical translation, optionally
//! followed by a rotation. [`StyleTransform`] renders to the CSS text the
//! host applies verbatim, e.g. `translateY(-12px) rotate(3deg)`.

use core::fmt;

/// A vertical translation with an optional rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleTransform {
    /// Vertical offset in CSS pixels.
    pub translate_y: f64,
    /// Rotation in degrees, if any.
    pub rotate_deg: Option<f64>,
}

impl StyleTransform {
    /// No offset, no rotation.
    pub const IDENTITY: Self = Self {
        translate_y: 0.0,
        rotate_deg: None,
    };

    /// Creates a pure vertical translation.
    #[inline]
    #[must_use]
    pub const fn translate_y(px: f64) -> Self {
        Self {
            translate_y: px,
            rotate_deg: None,
        }
    }

    /// Returns `self` followed by a rotation of `deg` degrees.
    #[inline]
    #[must_use]
    pub const fn then_rotate(self, deg: f64) -> Self {
        Self {
            translate_y: self.translate_y,
            rotate_deg: Some(deg),
        }
    }
}

/// Formats a CSS number, folding `-0` into `0`.
pub(crate) fn css_number(v: f64) -> f64 {
    v + 0.0
}

impl fmt::Display for StyleTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translateY({}px)", css_number(self.translate_y))?;
        if let Some(deg) = self.rotate_deg {
            write!(f, " rotate({}deg)", css_number(deg))?;
        }
        Ok(())
    }
}
