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

//! Cross-backend join.
//!
//! Pivots per-backend extractor output from backend-major to metric-major
//! indexing, so that competing backends can be compared at the same metric.
//! No numeric computation happens here.

use crate::error::BenchResult;
use crate::extract::DataPoints;
use crate::tree::MetricTree;
use crate::value::Value;
use std::collections::BTreeMap;

/// Joined shardless metrics: path -> {backend -> value}.
pub type ShardlessJoined = MetricTree<BTreeMap<String, Value>>;

/// Joined sharded metrics: path -> {backend -> {shard -> value}}.
pub type ShardedJoined = MetricTree<BTreeMap<String, BTreeMap<u32, Value>>>;

/// The joiner's output for one benchmark iteration.
#[derive(Debug, Clone, Default)]
pub struct JoinedMetrics {
    /// Shardless metrics across all backends.
    pub shardless: ShardlessJoined,
    /// Sharded metrics across all backends.
    pub sharded: ShardedJoined,
}

/// Merge per-backend extractor output into metric-indexed trees.
///
/// Multiple backends contributing to the same path is expected; that is
/// the point of the join. A backend missing a metric simply leaves no
/// entry under that path.
pub fn join_backends(backends: &BTreeMap<String, DataPoints>) -> BenchResult<JoinedMetrics> {
    let mut joined = JoinedMetrics::default();

    for (backend, points) in backends {
        for (path, value) in points.shardless.items() {
            joined
                .shardless
                .setdefault(&path, BTreeMap::new())?
                .insert(backend.clone(), value.clone());
        }
        for (path, shards) in points.sharded.items() {
            joined
                .sharded
                .setdefault(&path, BTreeMap::new())?
                .insert(backend.clone(), shards.clone());
        }
    }

    Ok(joined)
}
