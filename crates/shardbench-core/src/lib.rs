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

//! Core aggregation pipeline for sharded benchmark results.
//!
//! This crate turns the raw per-backend output of sharded benchmark
//! testers into a comparable summary, in four stages:
//!
//! 1. **Extraction** ([`extract_data_points`]) walks each backend's raw
//!    measurement records and yields every metric path in the data, split
//!    into per-shard and whole-backend points.
//! 2. **Join** ([`join_backends`]) pivots the extracted points from
//!    backend-major to metric-major, so competing backends line up at the
//!    same metric.
//! 3. **Accumulation** ([`accumulate_runs`]) appends the joined metrics of
//!    repeated iterations into per-combination sample lists tagged with
//!    their run id.
//! 4. **Summarization** ([`summarize`], [`compute_benchmark_summary`])
//!    reduces the samples to descriptive statistics and builds the summary
//!    artifact.
//!
//! Metric identity throughout is the [`MetricPath`], and the central
//! container is the [`MetricTree`], a path-keyed tree that keeps leaf
//! values structurally distinct from internal nodes. The crate performs no
//! I/O; parsing raw tester output and persisting the artifact live in the
//! YAML layer.

mod aggregate;
mod error;
mod extract;
mod join;
mod metadata;
mod path;
mod record;
mod stats;
mod summary;
mod tree;
mod value;

pub use aggregate::{
    accumulate_runs, AccumulatedMetrics, RunMetrics, ShardedAccum, ShardedSample, ShardlessAccum,
    ShardlessSample,
};
pub use error::{BenchError, BenchResult};
pub use extract::{extract_data_points, DataPoints, ShardedPoints, ShardlessPoints};
pub use join::{join_backends, JoinedMetrics, ShardedJoined, ShardlessJoined};
pub use metadata::{BenchmarkMetadata, BenchmarkMetadataHolder, BACKEND_NAMES};
pub use path::MetricPath;
pub use record::{Field, Record, SHARD_FIELD};
pub use stats::{describe, summarize, StatRecord, Stats};
pub use summary::{
    compute_benchmark_summary, BackendRunResult, Benchmark, BenchmarkInfo, MetricRunResults,
    RunResults, RunSummary, ShardValue,
};
pub use tree::{wildcard_eq, MetricTree, TreeEntry};
pub use value::Value;
