// Shardbench - benchmark metrics aggregation toolkit
//
// Copyright (c) 2026 Shardbench contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Raw measurement records.
//!
//! One [`Record`] is one row of a backend's raw output: a mapping of named
//! fields whose values are either scalars or nested mappings. A record may
//! carry an integer `shard` field identifying which shard the contained
//! samples belong to; the field is metadata, never part of a metric path.

use crate::error::{BenchError, BenchResult};
use crate::value::Value;
use std::collections::BTreeMap;

/// The reserved field name carrying the shard discriminator.
pub const SHARD_FIELD: &str = "shard";

/// A field value inside a measurement record: a scalar leaf or a nested
/// mapping to keep walking.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A scalar leaf value.
    Scalar(Value),
    /// A nested mapping of named sub-fields.
    Map(BTreeMap<String, Field>),
}

impl Field {
    /// Try to get the field as a scalar.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Map(_) => None,
        }
    }

    /// Try to get the field as a nested mapping.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Field>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Scalar(_) => None,
        }
    }
}

/// One measurement record emitted by a tester backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from named fields.
    pub fn from_fields(fields: BTreeMap<String, Field>) -> Self {
        Self { fields }
    }

    /// The record's fields, including `shard` if present.
    pub fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }

    /// Insert a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, field: Field) {
        self.fields.insert(name.into(), field);
    }

    /// The shard discriminator, if this is a per-shard record.
    ///
    /// A missing `shard` field means the record is shardless. A `shard`
    /// field that is not a non-negative integer is a contract violation
    /// and surfaces immediately.
    pub fn shard(&self) -> BenchResult<Option<u32>> {
        match self.fields.get(SHARD_FIELD) {
            None => Ok(None),
            Some(Field::Scalar(Value::Int(n))) if *n >= 0 && *n <= i64::from(u32::MAX) => {
                Ok(Some(*n as u32))
            }
            Some(other) => Err(BenchError::malformed(format!(
                "shard field must be a non-negative integer, found {:?}",
                other
            ))),
        }
    }
}
