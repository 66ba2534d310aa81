/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Parameter injection: raw query values into a typed view, atomically.
//!
//! Injection runs in two phases. Phase one walks every binding, selecting
//! and decoding values into staged form, and fails fast on the first error;
//! nothing has touched the view yet. Phase two commits the staged values in
//! binding order. A failed injection therefore never leaves a view with a
//! partial parameter set.
//!
//! Per-binding policy, in order:
//! - blank values (empty or whitespace-only) are treated as absent
//! - plain and optional parameters take the first value; extras are logged
//!   and ignored
//! - an absent parameter takes its default if one is declared
//! - otherwise optional, list, and set parameters write their empty form
//! - otherwise a required parameter fails the injection
//! - otherwise the field is left untouched

use crate::binding::{NavigationTarget, ParamBinding, StagedValue};
use crate::definitions::{DefinitionCache, DefinitionLookup};
use crate::error::{ParamError, ScalarError};
use crate::location::RawParams;
use crate::scalar::ScalarCodec;

/// Decodes navigation parameters into views. Owns the scalar codec and the
/// per-target definition cache; cheap to share behind a reference.
pub struct Injector {
    codec: ScalarCodec,
    cache: DefinitionCache,
}

impl Default for Injector {
    fn default() -> Self {
        Self::new(ScalarCodec::core_seed())
    }
}

impl Injector {
    pub fn new(codec: ScalarCodec) -> Self {
        Self {
            codec,
            cache: DefinitionCache::new(),
        }
    }

    pub fn codec(&self) -> &ScalarCodec {
        &self.codec
    }

    pub fn cache(&self) -> &DefinitionCache {
        &self.cache
    }

    /// Cached definitions for `V`, extracting and validating on first use.
    pub fn definitions<V: NavigationTarget>(&self) -> Result<DefinitionLookup<V>, ParamError> {
        self.cache.lookup::<V>(&self.codec)
    }

    /// Decode `params` and write them into `view`.
    ///
    /// Fails on the first undecodable value, missing required parameter, or
    /// configuration mistake; the view is untouched when an error returns.
    pub fn inject<V: NavigationTarget>(
        &self,
        view: &mut V,
        params: &RawParams,
    ) -> Result<InjectionSummary, ParamError> {
        let lookup = self.definitions::<V>()?;
        let defs = lookup.definitions;
        let target = defs.target();

        let mut summary = InjectionSummary {
            target,
            injected: 0,
            defaults_applied: 0,
            absent_skipped: 0,
            extra_values_ignored: 0,
            cache_hit: lookup.cache_hit,
        };

        let mut staged: Vec<(&ParamBinding<V>, StagedValue)> = Vec::with_capacity(defs.len());
        for binding in defs.bindings() {
            let name = binding.name();
            let present: Vec<&str> = params
                .values(name)
                .iter()
                .map(String::as_str)
                .filter(|value| !value.trim().is_empty())
                .collect();

            let selected: &[&str] = if binding.shape().single_valued() && present.len() > 1 {
                log::warn!(
                    "parameter {name:?} on {target} carries {} values, using the first",
                    present.len()
                );
                summary.extra_values_ignored += present.len() - 1;
                &present[..1]
            } else {
                &present
            };

            if selected.is_empty() {
                let default = binding.default_raw().filter(|raw| !raw.trim().is_empty());
                if let Some(raw) = default {
                    let value = binding
                        .stage(&self.codec, &[raw])
                        .map_err(|e| default_failure(target, name, raw, e))?;
                    staged.push((binding, value));
                    summary.defaults_applied += 1;
                } else if let Some(value) = binding.stage_absent() {
                    staged.push((binding, value));
                } else if binding.is_required() {
                    return Err(ParamError::RequiredMissing {
                        parameter: name.to_string(),
                    });
                } else {
                    summary.absent_skipped += 1;
                }
                continue;
            }

            let value = binding
                .stage(&self.codec, selected)
                .map_err(|e| ParamError::from_scalar(name, target, e))?;
            staged.push((binding, value));
        }

        summary.injected = staged.len();
        for (binding, value) in staged {
            binding.commit(view, value).map_err(|detail| {
                ParamError::TargetConfiguration {
                    target: target.to_string(),
                    detail: format!("failed to write parameter {:?}: {detail}", binding.name()),
                }
            })?;
        }

        log::debug!(
            "injected {} parameter(s) into {target} ({} default(s), {} absent)",
            summary.injected,
            summary.defaults_applied,
            summary.absent_skipped
        );
        Ok(summary)
    }
}

/// What one injection did, for hosts that log or assert on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionSummary {
    /// Type name of the target view.
    pub target: &'static str,
    /// Fields written, defaults and empty container forms included.
    pub injected: usize,
    /// Absent parameters that took their declared default.
    pub defaults_applied: usize,
    /// Absent plain parameters left untouched.
    pub absent_skipped: usize,
    /// Surplus values dropped from single-valued parameters.
    pub extra_values_ignored: usize,
    /// Whether the definitions came from the cache.
    pub cache_hit: bool,
}

fn default_failure(target: &str, parameter: &str, raw: &str, err: ScalarError) -> ParamError {
    ParamError::TargetConfiguration {
        target: target.to_string(),
        detail: format!("default {raw:?} for parameter {parameter:?} does not decode: {err}"),
    }
}
