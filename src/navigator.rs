/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Navigator: composing locations and entering views.
//!
//! The navigator sits between the host router and the parameter machinery.
//! Outbound, it encodes typed parameters into a location string and hands it
//! to the host's [`LocationSink`]. Inbound, [`enter`](Navigator::enter)
//! parses the query of the routed location and injects it into the view the
//! host resolved. Routing itself, path to view, stays with the host.

use std::any::Any;

use crate::binding::NavigationTarget;
use crate::error::{ParamError, ScalarError};
use crate::inject::{InjectionSummary, Injector};
use crate::location::{LocationCodec, RawParams};
use crate::scalar::ScalarCodec;

/// Host side of outbound navigation: receives the composed location.
pub trait LocationSink {
    fn open_location(&mut self, location: &str);
}

/// Any `FnMut(&str)` works as a sink.
impl<F> LocationSink for F
where
    F: FnMut(&str),
{
    fn open_location(&mut self, location: &str) {
        self(location)
    }
}

/// Typed builder for the parameters of one outbound navigation.
///
/// Values are encoded through the scalar codec as they are set, so the
/// first unencodable value surfaces immediately:
///
/// ```ignore
/// let params = navigator.params().set("id", 42)?.set("exact", true)?.finish();
/// ```
pub struct ParamsBuilder<'c> {
    codec: &'c ScalarCodec,
    params: RawParams,
}

impl std::fmt::Debug for ParamsBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamsBuilder")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl<'c> ParamsBuilder<'c> {
    pub fn new(codec: &'c ScalarCodec) -> Self {
        Self {
            codec,
            params: RawParams::new(),
        }
    }

    /// Encode one value under `name`. Call repeatedly with the same name to
    /// build up a list or set parameter.
    pub fn set<T: Any>(mut self, name: impl Into<String>, value: T) -> Result<Self, ScalarError> {
        let raw = self.codec.encode(&value)?;
        self.params.push(name, raw);
        Ok(self)
    }

    /// Encode `Some` value under `name`; `None` emits no parameter at all,
    /// leaving the receiving side to its absent handling.
    pub fn set_opt<T: Any>(
        self,
        name: impl Into<String>,
        value: Option<T>,
    ) -> Result<Self, ScalarError> {
        match value {
            Some(value) => self.set(name, value),
            None => Ok(self),
        }
    }

    /// Encode a sequence of values under one name.
    pub fn set_all<T: Any>(
        mut self,
        name: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Result<Self, ScalarError> {
        for value in values {
            self = self.set(name, value)?;
        }
        Ok(self)
    }

    /// Append an already-encoded wire value, bypassing the codec.
    pub fn raw(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(name, value);
        self
    }

    pub fn finish(self) -> RawParams {
        self.params
    }
}

/// Composes outbound locations and injects inbound ones.
pub struct Navigator<S: LocationSink> {
    injector: Injector,
    location: LocationCodec,
    sink: S,
}

impl<S: LocationSink> Navigator<S> {
    /// A navigator with the built-in scalar set and percent-encoding on.
    pub fn new(sink: S) -> Self {
        Self::with_codecs(ScalarCodec::core_seed(), LocationCodec::default(), sink)
    }

    pub fn with_codecs(scalars: ScalarCodec, location: LocationCodec, sink: S) -> Self {
        Self {
            injector: Injector::new(scalars),
            location,
            sink,
        }
    }

    pub fn injector(&self) -> &Injector {
        &self.injector
    }

    pub fn location_codec(&self) -> &LocationCodec {
        &self.location
    }

    /// Start building typed parameters against this navigator's codec.
    pub fn params(&self) -> ParamsBuilder<'_> {
        ParamsBuilder::new(self.injector.codec())
    }

    /// The location `navigate_to` would open, without dispatching it.
    pub fn location_for(&self, path: &str, params: &RawParams) -> String {
        self.location.compose(path, params)
    }

    /// Like [`location_for`](Self::location_for), with the path taken from
    /// the target's declared route.
    pub fn location_for_target<V: NavigationTarget>(&self, params: &RawParams) -> String {
        self.location_for(V::route(), params)
    }

    /// Compose a location from `path` and `params` and hand it to the host.
    pub fn navigate_to(&mut self, path: &str, params: &RawParams) {
        let location = self.location.compose(path, params);
        log::info!("navigating to {location}");
        self.sink.open_location(&location);
    }

    /// Navigate to `V`'s declared route.
    pub fn navigate_to_target<V: NavigationTarget>(&mut self, params: &RawParams) {
        self.navigate_to(V::route(), params);
    }

    /// Parse the query of a routed location and inject it into `view`.
    ///
    /// The host has already resolved `location` to this view; only the query
    /// section is consumed here. The path and any fragment are ignored.
    pub fn enter<V: NavigationTarget>(
        &self,
        view: &mut V,
        location: &str,
    ) -> Result<InjectionSummary, ParamError> {
        let (path, query) = LocationCodec::split_location(location);
        let params = self.location.parse_query(query);
        let summary = self.injector.inject(view, &params)?;
        log::debug!(
            "entered {path:?}: {} parameter(s) injected into {}",
            summary.injected,
            summary.target
        );
        Ok(summary)
    }
}
