// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! Vista splits host-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Document**: Implements [`Document`](crate::document::Document) so
//!   behaviours can query elements, attributes, geometry and scroll state.
//!
//! - **Notifiers**: Implements [`NotifierFactory`] to hand each behaviour a
//!   [`Notifier`] for its [`Watch`]. Crossings are fed back through
//!   [`Landing::on_visibility`](crate::landing::Landing::on_visibility).
//!
//! - **Frame source**: Arms one display-frame callback while
//!   [`Landing::has_pending_frame`](crate::landing::Landing::has_pending_frame)
//!   is true and calls [`Landing::on_frame`](crate::landing::Landing::on_frame)
//!   from it. Not abstracted by a trait; the setup differs per host.
//!
//! - **Presenter**: Implements [`Presenter`] to write flushed
//!   [`StyleChanges`] to the real elements.
//!
//! # Crate boundaries
//!
//! `vista_core` owns the behaviours, the style data model and this contract
//! module. Backend crates depend on `vista_core` and provide host glue.

use alloc::boxed::Box;

use crate::node::NodeId;
use crate::style::{StyleChanges, StyleStore};
use crate::visibility::{NotifierConfig, Watch};

/// Applies flushed style changes to a host-native element tree.
///
/// Implemented by the DOM presenter and by test doubles.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(now: HostTime) {
///     landing.on_frame(now, &mut document, &mut tracer);
///     let changes = landing.flush();
///     presenter.apply(landing.store(), &changes);
///     if landing.has_pending_frame() {
///         request_frame();
///     }
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`StyleChanges`], reading current property values
    /// from `store` as needed.
    fn apply(&mut self, store: &StyleStore, changes: &StyleChanges);
}

/// Visibility registration for one [`Watch`].
///
/// Crossings are not returned from these calls; the host delivers them later
/// through [`Landing::on_visibility`](crate::landing::Landing::on_visibility).
pub trait Notifier {
    /// Starts tracking `node`.
    fn observe(&mut self, node: NodeId);

    /// Permanently stops delivery for `node`.
    fn unobserve(&mut self, node: NodeId);
}

/// Creates the [`Notifier`] each behaviour registers its elements with.
pub trait NotifierFactory {
    /// Creates a notifier delivering crossings tagged with `watch`.
    fn create(&mut self, watch: Watch, config: NotifierConfig) -> Box<dyn Notifier>;
}
