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

//! Descriptive statistics over accumulated samples.
//!
//! Reduces the per-(metric, backend[, shard]) sample lists produced by the
//! cross-run accumulator to min/max/mean/median/range/stdev/variance
//! records. Non-numeric samples are dropped before computation; a
//! combination with zero numeric samples gets no record at all.

use crate::aggregate::AccumulatedMetrics;
use std::collections::BTreeMap;

/// Descriptive statistics for one sample list.
///
/// `stdev` and `variance` use the sample (n-1) formulas and are reported
/// as 0.0 when fewer than two numeric samples are present.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRecord {
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (mean of the two middle samples for even counts).
    pub median: f64,
    /// `max - min`.
    pub range: f64,
    /// Sample standard deviation.
    pub stdev: f64,
    /// Sample variance.
    pub variance: f64,
}

/// Summary statistics for one benchmark, keyed by flattened metric name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stats {
    /// metric -> backend -> shard -> record.
    pub sharded_metrics: BTreeMap<String, BTreeMap<String, BTreeMap<u32, StatRecord>>>,
    /// metric -> backend -> record.
    pub shardless_metrics: BTreeMap<String, BTreeMap<String, StatRecord>>,
}

impl Stats {
    /// Whether no statistic record was produced at all.
    pub fn is_empty(&self) -> bool {
        self.sharded_metrics.is_empty() && self.shardless_metrics.is_empty()
    }
}

/// Compute the descriptive-statistics record for a list of samples.
///
/// Returns `None` for an empty list; the caller emits no record in that
/// case rather than a zero-filled placeholder.
pub fn describe(samples: &[f64]) -> Option<StatRecord> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };

    let variance = if n < 2 {
        0.0
    } else {
        sorted.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1) as f64
    };

    Some(StatRecord {
        min,
        max,
        mean,
        median,
        range: max - min,
        stdev: variance.sqrt(),
        variance,
    })
}

/// Reduce accumulated samples to summary statistics.
///
/// Grouping is by (metric, backend) for shardless samples and by
/// (metric, backend, shard) for sharded samples. All statistics are
/// order-independent aggregates, so the result is insensitive to input
/// ordering.
pub fn summarize(accumulated: &AccumulatedMetrics) -> Stats {
    let mut stats = Stats::default();

    for (path, by_backend) in accumulated.shardless.items() {
        let metric = path.metric_name();
        for (backend, samples) in by_backend {
            let values: Vec<f64> = samples.iter().filter_map(|s| s.value.as_f64()).collect();
            if let Some(record) = describe(&values) {
                stats
                    .shardless_metrics
                    .entry(metric.clone())
                    .or_default()
                    .insert(backend.clone(), record);
            }
        }
    }

    for (path, by_backend) in accumulated.sharded.items() {
        let metric = path.metric_name();
        for (backend, samples) in by_backend {
            let mut by_shard: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
            for sample in samples {
                if let Some(value) = sample.value.as_f64() {
                    by_shard.entry(sample.shard).or_default().push(value);
                }
            }
            for (shard, values) in by_shard {
                if let Some(record) = describe(&values) {
                    stats
                        .sharded_metrics
                        .entry(metric.clone())
                        .or_default()
                        .entry(backend.clone())
                        .or_default()
                        .insert(shard, record);
                }
            }
        }
    }

    stats
}
