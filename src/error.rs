/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Error taxonomy for scalar codecs and navigation-parameter injection.
//!
//! Two levels, matching the two API layers:
//! - `ScalarError`: a single value could not be encoded or decoded (registry
//!   level, no parameter context).
//! - `ParamError`: a navigation event failed (decoding, required-missing, or
//!   a misconfigured target type).
//!
//! Nothing in this crate catches or downgrades these; they propagate
//! synchronously to the host, which decides how to present the failure
//! (typically an error view). Retrying without changed input would reproduce
//! the same error, so no retry machinery exists anywhere.

/// Failure to convert one scalar value to or from its wire string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarError {
    /// No mapper is registered for the requested type.
    UnsupportedType { scalar: &'static str },
    /// The wire string could not be parsed as the requested scalar.
    Parse {
        scalar: &'static str,
        value: String,
        detail: String,
    },
    /// The value could not be rendered in its wire form (out-of-range
    /// temporal components and similar).
    Format {
        scalar: &'static str,
        detail: String,
    },
    /// A mapper produced a value of a different concrete type than the one
    /// it was registered under. Only reachable through a malformed custom
    /// registration.
    WrongValueType { scalar: &'static str },
}

impl std::fmt::Display for ScalarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedType { scalar } => {
                write!(f, "no scalar mapper registered for {scalar}")
            }
            Self::Parse {
                scalar,
                value,
                detail,
            } => {
                write!(f, "cannot parse {value:?} as {scalar}: {detail}")
            }
            Self::Format { scalar, detail } => {
                write!(f, "cannot format {scalar} value: {detail}")
            }
            Self::WrongValueType { scalar } => {
                write!(f, "mapper for {scalar} produced a mismatched value type")
            }
        }
    }
}

impl std::error::Error for ScalarError {}

/// Failure of one navigation event's parameter resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// A raw value could not be decoded into the declared scalar type.
    /// Carries the offending value so hosts can log or display it.
    Decoding {
        parameter: String,
        value: String,
        scalar: &'static str,
        detail: String,
    },
    /// A required single-shaped parameter had no usable value and no default.
    RequiredMissing { parameter: String },
    /// The navigation-target type itself is misconfigured: blank or duplicate
    /// parameter names, a scalar with no registered mapper, or a write-side
    /// type mismatch. A programming error in the hosting application, not a
    /// user-input problem.
    TargetConfiguration { target: String, detail: String },
}

impl ParamError {
    pub(crate) fn from_scalar(parameter: &str, target: &str, err: ScalarError) -> Self {
        match err {
            ScalarError::Parse {
                scalar,
                value,
                detail,
            } => Self::Decoding {
                parameter: parameter.to_string(),
                value,
                scalar,
                detail,
            },
            ScalarError::UnsupportedType { scalar } => Self::TargetConfiguration {
                target: target.to_string(),
                detail: format!("parameter '{parameter}' uses unmapped scalar {scalar}"),
            },
            ScalarError::WrongValueType { scalar } => Self::TargetConfiguration {
                target: target.to_string(),
                detail: format!("mapper for {scalar} returned a mismatched value type"),
            },
            ScalarError::Format { scalar, detail } => Self::TargetConfiguration {
                target: target.to_string(),
                detail: format!("cannot format {scalar} for parameter '{parameter}': {detail}"),
            },
        }
    }
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decoding {
                parameter,
                value,
                scalar,
                detail,
            } => {
                write!(
                    f,
                    "cannot decode {value:?} as {scalar} for parameter '{parameter}': {detail}"
                )
            }
            Self::RequiredMissing { parameter } => {
                write!(f, "required parameter '{parameter}' is missing")
            }
            Self::TargetConfiguration { target, detail } => {
                write!(f, "navigation target {target} is misconfigured: {detail}")
            }
        }
    }
}

impl std::error::Error for ParamError {}
