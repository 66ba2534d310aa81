/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Parameter bindings: how a view declares which query parameters it takes.
//!
//! A view type implements [`NavigationTarget`] and returns one
//! [`ParamBinding`] per parameter. Each binding names the parameter, fixes
//! its shape (plain, optional, list, set), and captures a typed setter
//! closure that writes the decoded value into the view. Closures replace
//! field reflection: the element type is pinned at construction and carried
//! as a `TypeId` for codec validation.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::error::ScalarError;
use crate::scalar::ScalarCodec;

/// A decoded, fully shaped parameter value awaiting commit into the view.
pub(crate) type StagedValue = Box<dyn Any + Send>;

type StageFn = Box<dyn Fn(&ScalarCodec, &[&str]) -> Result<StagedValue, ScalarError> + Send + Sync>;
type AbsentFn = Box<dyn Fn() -> Option<StagedValue> + Send + Sync>;
type CommitFn<V> = Box<dyn Fn(&mut V, StagedValue) -> Result<(), String> + Send + Sync>;

/// A view that can be entered through a navigation location.
///
/// `route` is the stable path the host router mounts the view under;
/// `bindings` declares its query parameters. Both are inherent to the type,
/// so the injector can cache the extracted definition per `TypeId`.
pub trait NavigationTarget: Sized + 'static {
    fn route() -> &'static str;
    fn bindings() -> Vec<ParamBinding<Self>>;
}

/// Container shape of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// Exactly one value writes a bare `T`.
    Plain,
    /// Zero or one value writes an `Option<T>`; absence writes `None`.
    Optional,
    /// Every value in arrival order writes a `Vec<T>`; absence writes an
    /// empty vector.
    List,
    /// Every value, deduplicated in first-appearance order, writes an
    /// `IndexSet<T>`; absence writes an empty set.
    Set,
}

impl ParamShape {
    /// Plain and optional parameters take the first value and ignore the
    /// rest; list and set parameters take them all.
    pub fn single_valued(self) -> bool {
        matches!(self, ParamShape::Plain | ParamShape::Optional)
    }
}

/// One declared parameter of a navigation target.
///
/// Constructed through the shape-specific constructors, then refined with
/// [`required`](Self::required) and [`with_default`](Self::with_default):
///
/// ```ignore
/// ParamBinding::scalar("id", |view: &mut Inventory, id: i32| view.id = id).required()
/// ```
pub struct ParamBinding<V> {
    name: String,
    shape: ParamShape,
    required: bool,
    default_raw: Option<String>,
    element_type: TypeId,
    element_label: &'static str,
    stage: StageFn,
    absent: AbsentFn,
    commit: CommitFn<V>,
}

impl<V: 'static> ParamBinding<V> {
    /// A plain scalar parameter writing a bare `T`.
    pub fn scalar<T, F>(name: impl Into<String>, write: F) -> Self
    where
        T: Any + Send,
        F: Fn(&mut V, T) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            shape: ParamShape::Plain,
            required: false,
            default_raw: None,
            element_type: TypeId::of::<T>(),
            element_label: std::any::type_name::<T>(),
            stage: Box::new(|codec, values| {
                let raw = values.first().ok_or_else(|| ScalarError::Parse {
                    scalar: std::any::type_name::<T>(),
                    value: String::new(),
                    detail: "no value to decode".to_string(),
                })?;
                codec.decode::<T>(raw).map(stage_box)
            }),
            absent: Box::new(|| None),
            commit: commit_as::<V, T, F>(write),
        }
    }

    /// An optional parameter writing `Option<T>`.
    pub fn optional<T, F>(name: impl Into<String>, write: F) -> Self
    where
        T: Any + Send,
        F: Fn(&mut V, Option<T>) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            shape: ParamShape::Optional,
            required: false,
            default_raw: None,
            element_type: TypeId::of::<T>(),
            element_label: std::any::type_name::<T>(),
            stage: Box::new(|codec, values| match values.first() {
                None => Ok(stage_box(None::<T>)),
                Some(raw) => codec.decode::<T>(raw).map(|value| stage_box(Some(value))),
            }),
            absent: Box::new(|| Some(stage_box(None::<T>))),
            commit: commit_as::<V, Option<T>, F>(write),
        }
    }

    /// A repeatable parameter writing `Vec<T>` in arrival order.
    pub fn list<T, F>(name: impl Into<String>, write: F) -> Self
    where
        T: Any + Send,
        F: Fn(&mut V, Vec<T>) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            shape: ParamShape::List,
            required: false,
            default_raw: None,
            element_type: TypeId::of::<T>(),
            element_label: std::any::type_name::<T>(),
            stage: Box::new(|codec, values| {
                let mut items = Vec::with_capacity(values.len());
                for raw in values {
                    items.push(codec.decode::<T>(raw)?);
                }
                Ok(stage_box(items))
            }),
            absent: Box::new(|| Some(stage_box(Vec::<T>::new()))),
            commit: commit_as::<V, Vec<T>, F>(write),
        }
    }

    /// A repeatable parameter writing `IndexSet<T>`, duplicates dropped,
    /// first-appearance order kept.
    pub fn set<T, F>(name: impl Into<String>, write: F) -> Self
    where
        T: Any + Send + Eq + Hash,
        F: Fn(&mut V, IndexSet<T>) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            shape: ParamShape::Set,
            required: false,
            default_raw: None,
            element_type: TypeId::of::<T>(),
            element_label: std::any::type_name::<T>(),
            stage: Box::new(|codec, values| {
                let mut items = IndexSet::with_capacity(values.len());
                for raw in values {
                    items.insert(codec.decode::<T>(raw)?);
                }
                Ok(stage_box(items))
            }),
            absent: Box::new(|| Some(stage_box(IndexSet::<T>::new()))),
            commit: commit_as::<V, IndexSet<T>, F>(write),
        }
    }

    /// Mark the parameter required: absence (with no default) fails the
    /// whole injection. Only meaningful on plain parameters; the other
    /// shapes already have a defined absent value.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Wire-form fallback decoded when the parameter is absent. A blank
    /// default is ignored, matching blank-means-absent on the wire.
    pub fn with_default(mut self, raw: impl Into<String>) -> Self {
        self.default_raw = Some(raw.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> ParamShape {
        self.shape
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_raw(&self) -> Option<&str> {
        self.default_raw.as_deref()
    }

    /// `TypeId` of the element type `T`, for codec validation.
    pub fn element_type(&self) -> TypeId {
        self.element_type
    }

    /// Human-readable element type, for diagnostics.
    pub fn element_label(&self) -> &'static str {
        self.element_label
    }

    /// Decode already-selected values into the shaped staged value.
    pub(crate) fn stage(
        &self,
        codec: &ScalarCodec,
        values: &[&str],
    ) -> Result<StagedValue, ScalarError> {
        (self.stage)(codec, values)
    }

    /// Staged value for a wholly absent parameter, or `None` when absence
    /// means leaving the view field untouched.
    pub(crate) fn stage_absent(&self) -> Option<StagedValue> {
        (self.absent)()
    }

    /// Write a staged value into the view.
    pub(crate) fn commit(&self, view: &mut V, staged: StagedValue) -> Result<(), String> {
        (self.commit)(view, staged)
    }
}

impl<V> fmt::Debug for ParamBinding<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamBinding")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("required", &self.required)
            .field("default_raw", &self.default_raw)
            .field("element", &self.element_label)
            .finish()
    }
}

fn stage_box<T: Any + Send>(value: T) -> StagedValue {
    Box::new(value)
}

fn commit_as<V, T, F>(write: F) -> CommitFn<V>
where
    V: 'static,
    T: Any + Send,
    F: Fn(&mut V, T) + Send + Sync + 'static,
{
    Box::new(move |view, staged| {
        let value = staged
            .downcast::<T>()
            .map_err(|_| format!("staged value is not {}", std::any::type_name::<T>()))?;
        write(view, *value);
        Ok(())
    })
}
