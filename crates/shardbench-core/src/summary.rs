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

//! The benchmark summary artifact.
//!
//! In-memory shape of the per-benchmark summary document: the accumulated
//! samples regrouped into per-run result records, plus the descriptive
//! statistics over all runs. This is the structure the YAML layer writes
//! to `metrics_summary.yaml`.

use crate::aggregate::AccumulatedMetrics;
use crate::stats::{summarize, Stats};
use crate::value::Value;
use std::collections::BTreeMap;

/// Caller-supplied identification of the benchmark being summarized.
///
/// The properties mapping is opaque to the pipeline and carried through
/// to the artifact verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BenchmarkInfo {
    /// Benchmark identifier, e.g. `io_read_256kb`.
    pub id: String,
    /// Path of the benchmark inside the suite, e.g. `io/read/256kb`.
    pub path: String,
    /// Free-form benchmark properties.
    pub properties: BTreeMap<String, Value>,
}

/// One per-shard measurement inside a run result.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardValue {
    /// The shard that produced the value.
    pub shard: u32,
    /// The measured value.
    pub value: Value,
}

/// One backend's contribution to a metric within one run.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendRunResult {
    /// Per-shard measurements.
    Sharded {
        /// Free-form per-backend properties.
        properties: BTreeMap<String, Value>,
        /// Measurements in shard order of arrival.
        shards: Vec<ShardValue>,
    },
    /// A single whole-backend measurement.
    Shardless {
        /// Free-form per-backend properties.
        properties: BTreeMap<String, Value>,
        /// The measured value.
        value: Value,
    },
}

/// All backends' results for one metric within one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricRunResults {
    /// Free-form per-metric properties.
    pub properties: BTreeMap<String, Value>,
    /// Results keyed by backend name.
    pub backends: BTreeMap<String, BackendRunResult>,
}

/// The result trees of one run, keyed by flattened metric name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunResults {
    /// Metrics reported per shard.
    pub sharded_metrics: BTreeMap<String, MetricRunResults>,
    /// Metrics reported once per backend.
    pub shardless_metrics: BTreeMap<String, MetricRunResults>,
}

/// One benchmark iteration in the artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Iteration identifier.
    pub id: u32,
    /// Free-form per-run properties.
    pub properties: BTreeMap<String, Value>,
    /// The run's results.
    pub results: RunResults,
}

/// The complete summary artifact for one benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct Benchmark {
    /// Identification of the benchmark.
    pub benchmark: BenchmarkInfo,
    /// Number of runs contained in `runs`.
    pub run_count: usize,
    /// Per-run results, ordered by numeric run id.
    pub runs: Vec<RunSummary>,
    /// Descriptive statistics across all runs.
    pub summary: Stats,
}

/// Regroup accumulated samples into the per-run artifact shape and attach
/// the descriptive statistics.
///
/// Runs appear sorted by numeric id. The function is deterministic:
/// running it twice over the same input yields structurally identical
/// output.
pub fn compute_benchmark_summary(
    accumulated: &AccumulatedMetrics,
    info: BenchmarkInfo,
) -> Benchmark {
    let mut runs_map: BTreeMap<u32, RunSummary> = BTreeMap::new();

    for (path, by_backend) in accumulated.sharded.items() {
        let metric = path.metric_name();
        for (backend, samples) in by_backend {
            for sample in samples {
                let run = runs_map.entry(sample.run_id).or_insert_with(|| RunSummary {
                    id: sample.run_id,
                    properties: BTreeMap::new(),
                    results: RunResults::default(),
                });
                let result = run
                    .results
                    .sharded_metrics
                    .entry(metric.clone())
                    .or_default()
                    .backends
                    .entry(backend.clone())
                    .or_insert_with(|| BackendRunResult::Sharded {
                        properties: BTreeMap::new(),
                        shards: Vec::new(),
                    });
                if let BackendRunResult::Sharded { shards, .. } = result {
                    shards.push(ShardValue {
                        shard: sample.shard,
                        value: sample.value.clone(),
                    });
                }
            }
        }
    }

    for (path, by_backend) in accumulated.shardless.items() {
        let metric = path.metric_name();
        for (backend, samples) in by_backend {
            for sample in samples {
                let run = runs_map.entry(sample.run_id).or_insert_with(|| RunSummary {
                    id: sample.run_id,
                    properties: BTreeMap::new(),
                    results: RunResults::default(),
                });
                run.results
                    .shardless_metrics
                    .entry(metric.clone())
                    .or_default()
                    .backends
                    .insert(
                        backend.clone(),
                        BackendRunResult::Shardless {
                            properties: BTreeMap::new(),
                            value: sample.value.clone(),
                        },
                    );
            }
        }
    }

    let summary = summarize(accumulated);
    let runs: Vec<RunSummary> = runs_map.into_values().collect();

    Benchmark {
        benchmark: info,
        run_count: runs.len(),
        runs,
        summary,
    }
}
