/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Typed navigation parameters for routed views.
//!
//! A host application routes locations like `inventory/2?page=3&tag=a&tag=b`
//! to view types. This crate owns everything between the query string and
//! the view's typed fields:
//!
//! - [`scalar::ScalarCodec`] maps value types to wire strings and back,
//!   extensible per type
//! - [`binding::NavigationTarget`] lets a view declare its parameters as
//!   typed bindings (plain, optional, list, set), with required flags and
//!   wire-form defaults
//! - [`definitions::DefinitionCache`] validates declarations once per
//!   target type and caches them
//! - [`inject::Injector`] decodes a parameter map and writes it into a view
//!   atomically, failing fast without partial writes
//! - [`location::LocationCodec`] parses and composes query strings, with
//!   percent-encoding on by default
//! - [`navigator::Navigator`] is the host-facing seam: typed parameter
//!   building and outbound dispatch on one side, view entry on the other
//!
//! Routing itself, resolving a path to a view, stays with the host. See
//! `demos/minimal_router.rs` for a minimal host wiring.

pub mod binding;
pub mod definitions;
pub mod error;
pub mod inject;
pub mod location;
pub mod navigator;
pub mod scalar;

pub use binding::{NavigationTarget, ParamBinding, ParamShape};
pub use definitions::{DefinitionCache, DefinitionLookup, ParamDefinitions};
pub use error::{ParamError, ScalarError};
pub use inject::{InjectionSummary, Injector};
pub use location::{LocationCodec, RawParams};
pub use navigator::{LocationSink, Navigator, ParamsBuilder};
pub use scalar::ScalarCodec;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
