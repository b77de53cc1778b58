// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Start-up failures.

use alloc::format;
use alloc::string::{String, ToString};

use wasm_bindgen::JsValue;

/// Why the start-up hook could not wire the page.
///
/// Behaviours themselves never fail; only acquiring the browser globals and
/// registering listeners can.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// No global `window` (not running in a browser main thread).
    #[error("no global window")]
    NoWindow,
    /// The window has no `document`.
    #[error("window has no document")]
    NoDocument,
    /// A browser call was rejected.
    #[error("failed to {action}: {message}")]
    Js {
        /// What was being attempted.
        action: &'static str,
        /// The browser's error, as text.
        message: String,
    },
}

impl SetupError {
    /// Returns a mapper from a rejected browser call to [`SetupError::Js`].
    pub(crate) fn js(action: &'static str) -> impl FnOnce(JsValue) -> Self {
        move |err| Self::Js {
            action,
            message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
        }
    }
}

impl From<SetupError> for JsValue {
    fn from(err: SetupError) -> Self {
        Self::from_str(&err.to_string())
    }
}
