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

//! Metric paths.
//!
//! A metric is identified by an ordered, non-empty sequence of string
//! segments, e.g. `["latency", "p99"]`. Segments are opaque: no segment has
//! inherent meaning to the tree container.

use crate::error::{BenchError, BenchResult};
use std::fmt;

/// An ordered, non-empty sequence of segments identifying one metric.
///
/// Value equality and ordering are defined segment-by-segment, so a
/// `MetricPath` can be used directly as a composite map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetricPath(Vec<String>);

impl MetricPath {
    /// Create a path from owned segments. Empty paths are rejected.
    pub fn new(segments: Vec<String>) -> BenchResult<Self> {
        if segments.is_empty() {
            return Err(BenchError::EmptyPath);
        }
        Ok(Self(segments))
    }

    /// Create a path from string slices. Empty paths are rejected.
    pub fn from_segments(segments: &[&str]) -> BenchResult<Self> {
        Self::new(segments.iter().map(|s| (*s).to_string()).collect())
    }

    /// Internal constructor for segment vectors known to be non-empty.
    pub(crate) fn from_vec(segments: Vec<String>) -> Self {
        debug_assert!(!segments.is_empty());
        Self(segments)
    }

    /// The path segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; empty paths cannot be constructed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flatten the path into the metric name used by summary artifacts,
    /// joining segments with `_` (e.g. `["io","read"]` becomes `io_read`).
    pub fn metric_name(&self) -> String {
        self.0.join("_")
    }
}

impl fmt::Display for MetricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metric_name())
    }
}
