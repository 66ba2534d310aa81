/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Scalar codec: typed values to wire strings and back.
//!
//! A `ScalarCodec` maps Rust value types onto their query-string wire form.
//! Each mapper is keyed by `TypeId` and carries a short scalar name used in
//! diagnostics. `core_seed` installs the built-in set:
//!
//! | scalar             | type                      | wire form                |
//! |--------------------|---------------------------|--------------------------|
//! | text               | `String`                  | as-is                    |
//! | boolean            | `bool`                    | `true` / `false` (decode accepts any case) |
//! | i8..i128, u8..u128 | fixed integer widths      | decimal                  |
//! | isize, usize       | pointer-width integers    | decimal                  |
//! | f32, f64           | floats                    | decimal / `inf` / `NaN`  |
//! | date               | `time::Date`              | `YYYY-MM-DD`             |
//! | time               | `time::Time`              | `HH:MM[:SS[.f]]`         |
//! | date-time          | `time::PrimitiveDateTime` | `<date>T<time>`          |
//! | offset-date-time   | `time::OffsetDateTime`    | `<date>T<time><offset>`  |
//! | timestamp          | `std::time::SystemTime`   | `<date>T<time>` in UTC   |
//! | uuid               | `uuid::Uuid`              | hyphenated lowercase     |
//!
//! Hosts extend the set with `register` (explicit closures) or
//! `register_from_str` (any `FromStr + Display` type). Registering a mapper
//! for an already-mapped type replaces it and logs a warning.

mod temporal;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::error::ScalarError;

type EncodeFn = Box<dyn Fn(&dyn Any) -> Result<String, ScalarError> + Send + Sync>;
type DecodeFn = Box<dyn Fn(&str) -> Result<Box<dyn Any + Send>, ScalarError> + Send + Sync>;

struct MapperEntry {
    scalar: &'static str,
    encode: EncodeFn,
    decode: DecodeFn,
}

/// Registry of scalar mappers, keyed by the Rust type they serve.
///
/// Built once at host startup and shared immutably afterwards; every method
/// that decodes or encodes takes `&self`.
pub struct ScalarCodec {
    mappers: HashMap<TypeId, MapperEntry>,
}

impl Default for ScalarCodec {
    fn default() -> Self {
        Self::core_seed()
    }
}

impl ScalarCodec {
    /// A codec with no mappers at all. Hosts that want full control seed
    /// from here; everyone else starts from `core_seed`.
    pub fn empty() -> Self {
        Self {
            mappers: HashMap::new(),
        }
    }

    /// The built-in mapper set listed in the module docs.
    pub fn core_seed() -> Self {
        let mut codec = Self::empty();

        codec.register_from_str::<String>("text");
        codec.register(
            "boolean",
            |value: &bool| Ok(value.to_string()),
            |raw| match raw.to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(parse_failure("boolean", raw, "expected true or false".to_string())),
            },
        );

        codec.register_from_str::<i8>("i8");
        codec.register_from_str::<i16>("i16");
        codec.register_from_str::<i32>("i32");
        codec.register_from_str::<i64>("i64");
        codec.register_from_str::<i128>("i128");
        codec.register_from_str::<isize>("isize");
        codec.register_from_str::<u8>("u8");
        codec.register_from_str::<u16>("u16");
        codec.register_from_str::<u32>("u32");
        codec.register_from_str::<u64>("u64");
        codec.register_from_str::<u128>("u128");
        codec.register_from_str::<usize>("usize");
        codec.register_from_str::<f32>("f32");
        codec.register_from_str::<f64>("f64");
        codec.register_from_str::<uuid::Uuid>("uuid");

        codec.register(
            "date",
            |value: &Date| temporal::format_date(*value).map_err(|d| format_failure("date", d)),
            |raw| temporal::parse_date(raw).map_err(|d| parse_failure("date", raw, d)),
        );
        codec.register(
            "time",
            |value: &Time| Ok(temporal::format_time(*value)),
            |raw| temporal::parse_time(raw).map_err(|d| parse_failure("time", raw, d)),
        );
        codec.register(
            "date-time",
            |value: &PrimitiveDateTime| {
                temporal::format_date_time(*value).map_err(|d| format_failure("date-time", d))
            },
            |raw| temporal::parse_date_time(raw).map_err(|d| parse_failure("date-time", raw, d)),
        );
        codec.register(
            "offset-date-time",
            |value: &OffsetDateTime| {
                temporal::format_offset_date_time(*value)
                    .map_err(|d| format_failure("offset-date-time", d))
            },
            |raw| {
                temporal::parse_offset_date_time(raw)
                    .map_err(|d| parse_failure("offset-date-time", raw, d))
            },
        );
        codec.register(
            "timestamp",
            |value: &std::time::SystemTime| {
                temporal::format_timestamp(*value).map_err(|d| format_failure("timestamp", d))
            },
            |raw| temporal::parse_timestamp(raw).map_err(|d| parse_failure("timestamp", raw, d)),
        );

        log::debug!("scalar codec seeded with {} built-in mappers", codec.mapper_count());
        codec
    }

    /// Install a mapper for `T` with explicit encode and decode closures.
    /// Replaces any mapper already registered for `T`.
    pub fn register<T, E, D>(&mut self, scalar: &'static str, encode: E, decode: D)
    where
        T: Any + Send,
        E: Fn(&T) -> Result<String, ScalarError> + Send + Sync + 'static,
        D: Fn(&str) -> Result<T, ScalarError> + Send + Sync + 'static,
    {
        let entry = MapperEntry {
            scalar,
            encode: Box::new(move |value: &dyn Any| {
                let typed = value
                    .downcast_ref::<T>()
                    .ok_or(ScalarError::WrongValueType { scalar })?;
                encode(typed)
            }),
            decode: Box::new(move |raw: &str| {
                decode(raw).map(|value| Box::new(value) as Box<dyn Any + Send>)
            }),
        };
        if let Some(previous) = self.mappers.insert(TypeId::of::<T>(), entry) {
            log::warn!(
                "scalar mapper {scalar} replaces {} for the same value type",
                previous.scalar
            );
        }
    }

    /// Install a mapper for any `FromStr + Display` type. The `Display`
    /// output is the wire form and must parse back via `FromStr`.
    pub fn register_from_str<T>(&mut self, scalar: &'static str)
    where
        T: Any + Send + FromStr + Display,
        T::Err: Display,
    {
        self.register(
            scalar,
            |value: &T| Ok(value.to_string()),
            move |raw| {
                raw.parse::<T>()
                    .map_err(|e| parse_failure(scalar, raw, e.to_string()))
            },
        );
    }

    pub fn supports(&self, type_id: TypeId) -> bool {
        self.mappers.contains_key(&type_id)
    }

    pub fn supports_type<T: Any>(&self) -> bool {
        self.supports(TypeId::of::<T>())
    }

    /// Scalar name registered for a value type, for diagnostics.
    pub fn scalar_name(&self, type_id: TypeId) -> Option<&'static str> {
        self.mappers.get(&type_id).map(|entry| entry.scalar)
    }

    pub fn mapper_count(&self) -> usize {
        self.mappers.len()
    }

    /// Registered scalar names, sorted for stable output.
    pub fn scalar_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.mappers.values().map(|entry| entry.scalar).collect();
        names.sort_unstable();
        names
    }

    /// Encode a typed value into its wire string.
    pub fn encode<T: Any>(&self, value: &T) -> Result<String, ScalarError> {
        let entry = self.entry::<T>()?;
        (entry.encode)(value)
    }

    /// Decode a wire string into a typed value.
    pub fn decode<T: Any>(&self, raw: &str) -> Result<T, ScalarError> {
        let entry = self.entry::<T>()?;
        let boxed = (entry.decode)(raw)?;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ScalarError::WrongValueType { scalar: entry.scalar })
    }

    fn entry<T: Any>(&self) -> Result<&MapperEntry, ScalarError> {
        self.mappers
            .get(&TypeId::of::<T>())
            .ok_or(ScalarError::UnsupportedType {
                scalar: std::any::type_name::<T>(),
            })
    }
}

fn parse_failure(scalar: &'static str, raw: &str, detail: String) -> ScalarError {
    ScalarError::Parse {
        scalar,
        value: raw.to_string(),
        detail,
    }
}

fn format_failure(scalar: &'static str, detail: String) -> ScalarError {
    ScalarError::Format { scalar, detail }
}
