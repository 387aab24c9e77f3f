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

//! Benchmark metadata with wildcard lookup.
//!
//! Metadata is authored per metric path, but an author may use a `*`
//! segment to cover a family of metrics (e.g. every block size of a read
//! workload). Lookup therefore uses the wildcard comparator; a probe
//! matching more than one stored entry at a level is an authoring error
//! and surfaces as [`BenchError::AmbiguousMatch`].
//!
//! [`BenchError::AmbiguousMatch`]: crate::error::BenchError::AmbiguousMatch

use crate::error::BenchResult;
use crate::path::MetricPath;
use crate::tree::{wildcard_eq, MetricTree};
use crate::value::Value;
use std::collections::BTreeMap;

/// Backend names the testers are known to report.
pub const BACKEND_NAMES: [&str; 4] = ["epoll", "linux-aio", "io_uring", "asymmetric_io_uring"];

/// Metadata for one benchmark type, keyed by metric path with optional
/// `*` segments.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkMetadata {
    entries: MetricTree<Value>,
}

impl BenchmarkMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata under a path; `*` segments match any probe
    /// segment on lookup.
    pub fn set(&mut self, path: &MetricPath, value: Value) -> BenchResult<()> {
        self.entries.set(path, value)
    }

    /// Look up metadata for a concrete metric path.
    ///
    /// Returns `Ok(None)` when nothing matches; more than one stored
    /// entry matching at any level is an error.
    pub fn lookup(&self, path: &MetricPath) -> BenchResult<Option<&Value>> {
        self.entries.get_with(path, wildcard_eq)
    }

    /// Whether no metadata is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-benchmark-type metadata registry.
///
/// Unknown benchmark types get empty metadata rather than an error, so a
/// new tester can run before anyone has authored metadata for it.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkMetadataHolder {
    by_type: BTreeMap<String, BenchmarkMetadata>,
}

impl BenchmarkMetadataHolder {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for a benchmark type, e.g. `io` or `rpc`.
    pub fn insert(&mut self, benchmark_type: impl Into<String>, metadata: BenchmarkMetadata) {
        self.by_type.insert(benchmark_type.into(), metadata);
    }

    /// The metadata for a benchmark type; empty for unknown types.
    pub fn get(&self, benchmark_type: &str) -> BenchmarkMetadata {
        self.by_type.get(benchmark_type).cloned().unwrap_or_default()
    }
}
