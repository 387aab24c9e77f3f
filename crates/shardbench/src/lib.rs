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

//! # shardbench - sharded benchmark metrics aggregation
//!
//! Turns the raw per-backend output of sharded benchmark testers into a
//! comparable per-benchmark summary: extraction of metric paths, a
//! cross-backend join, accumulation across repeated runs, and descriptive
//! statistics.
//!
//! ## Quick Start
//!
//! ```rust
//! use shardbench::{
//!     accumulate_runs, extract_data_points, join_backends, summarize,
//!     Field, Record, RunMetrics, Value, SHARD_FIELD,
//! };
//! use std::collections::BTreeMap;
//!
//! // One per-shard record, as parsed from a tester's output
//! let mut record = Record::new();
//! record.insert(SHARD_FIELD, Field::Scalar(Value::Int(0)));
//! record.insert("iops", Field::Scalar(Value::Int(1200)));
//!
//! let points = extract_data_points(&[record]).unwrap();
//!
//! let mut backends = BTreeMap::new();
//! backends.insert("io_uring".to_string(), points);
//! let joined = join_backends(&backends).unwrap();
//!
//! let runs = vec![RunMetrics { run_id: 0, metrics: joined }];
//! let stats = summarize(&accumulate_runs(&runs).unwrap());
//! assert_eq!(stats.sharded_metrics["iops"]["io_uring"][&0].mean, 1200.0);
//! ```
//!
//! ## Crates
//!
//! - `shardbench-core`: data model and pipeline (re-exported here)
//! - `shardbench-yaml`: raw-output parsing and artifact serialization
//!   (feature = "yaml")
//! - `shardbench-cli`: the `shardbench` binary

pub use shardbench_core::{
    accumulate_runs,
    compute_benchmark_summary,
    describe,
    extract_data_points,
    join_backends,
    summarize,
    wildcard_eq,
    AccumulatedMetrics,
    BackendRunResult,
    Benchmark,
    BenchmarkInfo,
    BenchmarkMetadata,
    BenchmarkMetadataHolder,
    BenchError,
    BenchResult,
    DataPoints,
    Field,
    JoinedMetrics,
    MetricPath,
    MetricRunResults,
    MetricTree,
    Record,
    RunMetrics,
    RunResults,
    RunSummary,
    ShardValue,
    StatRecord,
    Stats,
    TreeEntry,
    Value,
    BACKEND_NAMES,
    SHARD_FIELD,
};

/// YAML layer re-export (feature = "yaml").
#[cfg(feature = "yaml")]
pub mod yaml {
    pub use shardbench_yaml::*;
}
