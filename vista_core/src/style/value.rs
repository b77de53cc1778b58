// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property value types and their CSS renderings.

use core::fmt;

use crate::transform::css_number;

/// Which properties a [`Transition`] animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionProperties {
    /// `opacity` only.
    Opacity,
    /// `opacity` and `transform`, with identical timing.
    OpacityAndTransform,
}

impl TransitionProperties {
    const fn names(self) -> &'static [&'static str] {
        match self {
            Self::Opacity => &["opacity"],
            Self::OpacityAndTransform => &["opacity", "transform"],
        }
    }
}

/// An `ease` CSS transition.
///
/// Renders as e.g. `opacity 0.6s ease 0.1s, transform 0.6s ease 0.1s`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Animated properties.
    pub properties: TransitionProperties,
    /// Duration in seconds.
    pub duration_s: f64,
    /// Delay in seconds. `None` omits the delay term entirely.
    pub delay_s: Option<f64>,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.properties.names().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} {}s ease", css_number(self.duration_s))?;
            if let Some(delay) = self.delay_s {
                write!(f, " {}s", css_number(delay))?;
            }
        }
        Ok(())
    }
}

/// CSS `visibility`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `visible`.
    Visible,
    /// `hidden`.
    Hidden,
}

impl Visibility {
    /// Returns the CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

/// CSS `animation-play-state`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayState {
    /// `running`.
    Running,
    /// `paused`.
    Paused,
}

impl PlayState {
    /// `Running` if `visible`, else `Paused`.
    #[must_use]
    pub const fn for_visibility(visible: bool) -> Self {
        if visible { Self::Running } else { Self::Paused }
    }

    /// Returns the CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

/// Accessibility attributes that make an element keyboard-focusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct A11y {
    /// `tabindex` value.
    pub tab_index: i32,
    /// ARIA `role`.
    pub role: &'static str,
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn staggered_transition_lists_both_properties() {
        let t = Transition {
            properties: TransitionProperties::OpacityAndTransform,
            duration_s: 0.6,
            delay_s: Some(0.1),
        };
        assert_eq!(
            t.to_string(),
            "opacity 0.6s ease 0.1s, transform 0.6s ease 0.1s"
        );
    }

    #[test]
    fn zero_delay_is_still_written() {
        let t = Transition {
            properties: TransitionProperties::OpacityAndTransform,
            duration_s: 0.6,
            delay_s: Some(0.0),
        };
        assert_eq!(t.to_string(), "opacity 0.6s ease 0s, transform 0.6s ease 0s");
    }

    #[test]
    fn undelayed_opacity_transition() {
        let t = Transition {
            properties: TransitionProperties::Opacity,
            duration_s: 0.6,
            delay_s: None,
        };
        assert_eq!(t.to_string(), "opacity 0.6s ease");
    }
}
