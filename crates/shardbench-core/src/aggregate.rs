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

//! Cross-run accumulation.
//!
//! Collects the joined metrics of repeated benchmark iterations into
//! per-(metric, backend[, shard]) sample lists, tagging every sample with
//! the run it came from. Strictly appends: two runs contributing the same
//! combination are both preserved, since statistics are computed across
//! runs later.

use crate::error::BenchResult;
use crate::join::JoinedMetrics;
use crate::tree::MetricTree;
use crate::value::Value;
use std::collections::BTreeMap;

/// One accumulated sample from a per-shard record.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardedSample {
    /// Identifier of the iteration that produced the sample.
    pub run_id: u32,
    /// The shard the sample belongs to.
    pub shard: u32,
    /// The measured value.
    pub value: Value,
}

/// One accumulated sample from a shardless record.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardlessSample {
    /// Identifier of the iteration that produced the sample.
    pub run_id: u32,
    /// The measured value.
    pub value: Value,
}

/// Accumulated shardless samples: path -> {backend -> [sample]}.
pub type ShardlessAccum = MetricTree<BTreeMap<String, Vec<ShardlessSample>>>;

/// Accumulated sharded samples: path -> {backend -> [sample]}.
pub type ShardedAccum = MetricTree<BTreeMap<String, Vec<ShardedSample>>>;

/// The joined metrics of one benchmark iteration, tagged with its run id.
///
/// Run ids are caller-supplied; they need not be contiguous, but must be
/// stable across the sharded and shardless halves of the same run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    /// Iteration identifier.
    pub run_id: u32,
    /// The joiner's output for this iteration.
    pub metrics: JoinedMetrics,
}

/// Accumulated samples for a whole benchmark.
#[derive(Debug, Clone, Default)]
pub struct AccumulatedMetrics {
    /// Shardless samples across all runs.
    pub shardless: ShardlessAccum,
    /// Sharded samples across all runs.
    pub sharded: ShardedAccum,
}

/// Flatten every run's joined trees into per-combination sample lists.
///
/// Missing run/backend/shard combinations produce shorter lists, never
/// errors: a backend that failed on one iteration simply contributes
/// fewer samples.
pub fn accumulate_runs(runs: &[RunMetrics]) -> BenchResult<AccumulatedMetrics> {
    let mut accumulated = AccumulatedMetrics::default();

    for run in runs {
        for (path, by_backend) in run.metrics.shardless.items() {
            for (backend, value) in by_backend {
                accumulated
                    .shardless
                    .setdefault(&path, BTreeMap::new())?
                    .entry(backend.clone())
                    .or_default()
                    .push(ShardlessSample {
                        run_id: run.run_id,
                        value: value.clone(),
                    });
            }
        }

        for (path, by_backend) in run.metrics.sharded.items() {
            for (backend, by_shard) in by_backend {
                let samples = accumulated
                    .sharded
                    .setdefault(&path, BTreeMap::new())?
                    .entry(backend.clone())
                    .or_default();
                for (shard, value) in by_shard {
                    samples.push(ShardedSample {
                        run_id: run.run_id,
                        shard: *shard,
                        value: value.clone(),
                    });
                }
            }
        }
    }

    Ok(accumulated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::MetricPath;

    fn path(segments: &[&str]) -> MetricPath {
        MetricPath::from_segments(segments).unwrap()
    }

    fn shardless_run(run_id: u32, backend: &str, value: f64) -> RunMetrics {
        let mut metrics = JoinedMetrics::default();
        metrics
            .shardless
            .setdefault(&path(&["lat"]), BTreeMap::new())
            .unwrap()
            .insert(backend.to_string(), Value::Float(value));
        RunMetrics { run_id, metrics }
    }

    #[test]
    fn test_two_runs_both_preserved() {
        let runs = vec![shardless_run(0, "A", 3.0), shardless_run(1, "A", 3.0)];
        let accumulated = accumulate_runs(&runs).unwrap();

        let samples = &accumulated.shardless.get(&path(&["lat"])).unwrap()["A"];
        assert_eq!(
            samples,
            &vec![
                ShardlessSample {
                    run_id: 0,
                    value: Value::Float(3.0)
                },
                ShardlessSample {
                    run_id: 1,
                    value: Value::Float(3.0)
                },
            ]
        );
    }

    #[test]
    fn test_missing_backend_yields_shorter_list() {
        let mut run1 = shardless_run(0, "A", 1.0);
        run1.metrics
            .shardless
            .setdefault(&path(&["lat"]), BTreeMap::new())
            .unwrap()
            .insert("B".to_string(), Value::Float(2.0));
        let run2 = shardless_run(1, "A", 3.0);

        let accumulated = accumulate_runs(&[run1, run2]).unwrap();
        let by_backend = accumulated.shardless.get(&path(&["lat"])).unwrap();
        assert_eq!(by_backend["A"].len(), 2);
        assert_eq!(by_backend["B"].len(), 1);
    }

    #[test]
    fn test_sharded_samples_carry_shard_and_run() {
        let mut metrics = JoinedMetrics::default();
        let mut shards = BTreeMap::new();
        shards.insert(0u32, Value::Int(10));
        shards.insert(1u32, Value::Int(20));
        metrics
            .sharded
            .setdefault(&path(&["m", "x"]), BTreeMap::new())
            .unwrap()
            .insert("A".to_string(), shards);

        let accumulated = accumulate_runs(&[RunMetrics { run_id: 7, metrics }]).unwrap();
        let samples = &accumulated.sharded.get(&path(&["m", "x"])).unwrap()["A"];
        assert_eq!(samples.len(), 2);
        assert!(samples.iter().all(|s| s.run_id == 7));
        assert!(samples.iter().any(|s| s.shard == 0 && s.value == Value::Int(10)));
        assert!(samples.iter().any(|s| s.shard == 1 && s.value == Value::Int(20)));
    }

    #[test]
    fn test_non_contiguous_run_ids_accepted() {
        let runs = vec![shardless_run(5, "A", 1.0), shardless_run(2, "A", 2.0)];
        let accumulated = accumulate_runs(&runs).unwrap();
        let samples = &accumulated.shardless.get(&path(&["lat"])).unwrap()["A"];
        let ids: Vec<u32> = samples.iter().map(|s| s.run_id).collect();
        assert_eq!(ids, vec![5, 2]);
    }

    #[test]
    fn test_empty_runs() {
        let accumulated = accumulate_runs(&[]).unwrap();
        assert!(accumulated.shardless.is_empty());
        assert!(accumulated.sharded.is_empty());
    }
}
