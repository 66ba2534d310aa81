/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Extraction and caching of per-target parameter definitions.
//!
//! Extraction walks the bindings a [`NavigationTarget`] declares and
//! validates them against the scalar codec, failing fast on the first
//! configuration mistake. Valid definitions are immutable and cached per
//! target type; extraction failures are never cached, so a host can fix its
//! codec and retry.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::binding::{NavigationTarget, ParamBinding};
use crate::error::ParamError;
use crate::scalar::ScalarCodec;

/// Validated parameter definitions for one target type.
pub struct ParamDefinitions<V> {
    target: &'static str,
    route: &'static str,
    bindings: Vec<ParamBinding<V>>,
}

impl<V> std::fmt::Debug for ParamDefinitions<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamDefinitions")
            .field("target", &self.target)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

impl<V: NavigationTarget> ParamDefinitions<V> {
    /// Extract and validate the definitions for `V`.
    ///
    /// Fails with a [`ParamError::TargetConfiguration`] on the first of:
    /// a blank parameter name, a duplicate parameter name, or an element
    /// type the codec has no mapper for.
    pub fn extract(codec: &ScalarCodec) -> Result<Self, ParamError> {
        let target = std::any::type_name::<V>();
        let bindings = V::bindings();

        let mut seen = HashSet::with_capacity(bindings.len());
        for binding in &bindings {
            let name = binding.name();
            if name.is_empty() {
                return Err(configuration(target, "parameter with blank name".to_string()));
            }
            if !seen.insert(name) {
                return Err(configuration(
                    target,
                    format!("duplicate parameter {name:?}"),
                ));
            }
            if !codec.supports(binding.element_type()) {
                return Err(configuration(
                    target,
                    format!(
                        "parameter {name:?} uses type {} which has no scalar mapper",
                        binding.element_label()
                    ),
                ));
            }
        }

        log::debug!(
            "extracted {} parameter definition(s) for {target}",
            bindings.len()
        );
        Ok(Self {
            target,
            route: V::route(),
            bindings,
        })
    }
}

impl<V> ParamDefinitions<V> {
    /// Type name of the target, used in diagnostics.
    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn route(&self) -> &'static str {
        self.route
    }

    pub fn bindings(&self) -> &[ParamBinding<V>] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Outcome of a cache lookup.
pub struct DefinitionLookup<V> {
    pub definitions: Arc<ParamDefinitions<V>>,
    pub cache_hit: bool,
}

/// Cache of extracted definitions, keyed by target type.
///
/// Concurrent lookups for the same uncached target may race; the extra
/// extraction is discarded in favor of the copy that landed first.
pub struct DefinitionCache {
    entries: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Default for DefinitionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Definitions for `V`, extracting on first use. Extraction errors
    /// propagate and leave the cache untouched.
    pub fn lookup<V: NavigationTarget>(
        &self,
        codec: &ScalarCodec,
    ) -> Result<DefinitionLookup<V>, ParamError> {
        let key = TypeId::of::<V>();

        if let Some(entry) = self.entries.read().get(&key) {
            return Ok(DefinitionLookup {
                definitions: downcast_entry::<V>(entry)?,
                cache_hit: true,
            });
        }

        let extracted = Arc::new(ParamDefinitions::<V>::extract(codec)?);

        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(&key) {
            return Ok(DefinitionLookup {
                definitions: downcast_entry::<V>(entry)?,
                cache_hit: true,
            });
        }
        entries.insert(key, extracted.clone());
        Ok(DefinitionLookup {
            definitions: extracted,
            cache_hit: false,
        })
    }

    /// Drop every cached definition. Targets are re-extracted on next use.
    pub fn reset(&self) {
        let mut entries = self.entries.write();
        let dropped = entries.len();
        entries.clear();
        log::debug!("definition cache reset, dropped {dropped} entries");
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn downcast_entry<V: NavigationTarget>(
    entry: &Arc<dyn Any + Send + Sync>,
) -> Result<Arc<ParamDefinitions<V>>, ParamError> {
    Arc::clone(entry).downcast::<ParamDefinitions<V>>().map_err(|_| {
        configuration(
            std::any::type_name::<V>(),
            "definition cache entry has the wrong type".to_string(),
        )
    })
}

fn configuration(target: &str, detail: String) -> ParamError {
    ParamError::TargetConfiguration {
        target: target.to_string(),
        detail,
    }
}
