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

//! Model to YAML conversion.
//!
//! Serializes metric trees and summary artifacts to their external
//! representations, and writes the per-benchmark summary file.

use crate::error::{YamlError, YamlResult};
use crate::{LEAF_KEY, SUMMARY_FILE_NAME};
use serde_yaml::{Mapping, Value as YamlValue};
use shardbench_core::{
    BackendRunResult, Benchmark, MetricRunResults, MetricTree, RunSummary, StatRecord, Stats,
    TreeEntry, Value,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Serialize a metric tree to its external representation.
///
/// Every leaf becomes a `{__leaf__: <value>}` marker mapping, so that
/// reading the document back can never mistake a leaf for an internal
/// node.
pub fn tree_to_yaml(tree: &MetricTree<Value>) -> YamlResult<String> {
    let value = YamlValue::Mapping(entries_to_mapping(tree.entries()));
    serde_yaml::to_string(&value).map_err(YamlError::parse)
}

/// Serialize a summary artifact document.
pub fn summary_to_yaml(benchmark: &Benchmark) -> YamlResult<String> {
    serde_yaml::to_string(&benchmark_to_yaml(benchmark)).map_err(YamlError::parse)
}

/// Write the summary artifact into `dir` as `metrics_summary.yaml`.
///
/// The file is written once per benchmark output directory; attempting to
/// overwrite an existing summary is an error.
pub fn write_summary(dir: &Path, benchmark: &Benchmark) -> YamlResult<PathBuf> {
    let path = dir.join(SUMMARY_FILE_NAME);
    if path.exists() {
        return Err(YamlError::SummaryExists {
            path: path.display().to_string(),
        });
    }
    let text = summary_to_yaml(benchmark)?;
    fs::write(&path, text).map_err(|e| YamlError::io(&path, &e))?;
    Ok(path)
}

pub(crate) fn value_to_yaml(value: &Value) -> YamlValue {
    match value {
        Value::Null => YamlValue::Null,
        Value::Bool(b) => YamlValue::Bool(*b),
        Value::Int(i) => YamlValue::Number((*i).into()),
        Value::Float(f) => YamlValue::Number((*f).into()),
        Value::String(s) => YamlValue::String(s.clone()),
    }
}

fn entries_to_mapping(entries: &BTreeMap<String, TreeEntry<Value>>) -> Mapping {
    let mut map = Mapping::new();
    for (key, entry) in entries {
        let value = match entry {
            TreeEntry::Leaf(leaf) => {
                let mut marker = Mapping::new();
                marker.insert(
                    YamlValue::String(LEAF_KEY.to_string()),
                    value_to_yaml(leaf),
                );
                YamlValue::Mapping(marker)
            }
            TreeEntry::Node(children) => YamlValue::Mapping(entries_to_mapping(children)),
        };
        map.insert(YamlValue::String(key.clone()), value);
    }
    map
}

fn properties_to_yaml(properties: &BTreeMap<String, Value>) -> YamlValue {
    let mut map = Mapping::new();
    for (key, value) in properties {
        map.insert(YamlValue::String(key.clone()), value_to_yaml(value));
    }
    YamlValue::Mapping(map)
}

fn benchmark_to_yaml(benchmark: &Benchmark) -> YamlValue {
    let mut map = Mapping::new();

    let mut info = Mapping::new();
    info.insert(
        YamlValue::String("id".to_string()),
        YamlValue::String(benchmark.benchmark.id.clone()),
    );
    info.insert(
        YamlValue::String("path".to_string()),
        YamlValue::String(benchmark.benchmark.path.clone()),
    );
    info.insert(
        YamlValue::String("properties".to_string()),
        properties_to_yaml(&benchmark.benchmark.properties),
    );
    map.insert(
        YamlValue::String("benchmark".to_string()),
        YamlValue::Mapping(info),
    );

    map.insert(
        YamlValue::String("run_count".to_string()),
        YamlValue::Number(benchmark.run_count.into()),
    );

    let runs: Vec<YamlValue> = benchmark.runs.iter().map(run_to_yaml).collect();
    map.insert(
        YamlValue::String("runs".to_string()),
        YamlValue::Sequence(runs),
    );

    map.insert(
        YamlValue::String("summary".to_string()),
        stats_to_yaml(&benchmark.summary),
    );

    YamlValue::Mapping(map)
}

fn run_to_yaml(run: &RunSummary) -> YamlValue {
    let mut map = Mapping::new();
    map.insert(
        YamlValue::String("id".to_string()),
        YamlValue::Number(run.id.into()),
    );
    map.insert(
        YamlValue::String("properties".to_string()),
        properties_to_yaml(&run.properties),
    );

    let mut results = Mapping::new();
    results.insert(
        YamlValue::String("sharded_metrics".to_string()),
        metric_results_map(&run.results.sharded_metrics),
    );
    results.insert(
        YamlValue::String("shardless_metrics".to_string()),
        metric_results_map(&run.results.shardless_metrics),
    );
    map.insert(
        YamlValue::String("results".to_string()),
        YamlValue::Mapping(results),
    );

    YamlValue::Mapping(map)
}

fn metric_results_map(metrics: &BTreeMap<String, MetricRunResults>) -> YamlValue {
    let mut map = Mapping::new();
    for (metric, results) in metrics {
        let mut metric_map = Mapping::new();
        metric_map.insert(
            YamlValue::String("properties".to_string()),
            properties_to_yaml(&results.properties),
        );

        let mut backends = Mapping::new();
        for (backend, result) in &results.backends {
            backends.insert(
                YamlValue::String(backend.clone()),
                backend_result_to_yaml(result),
            );
        }
        metric_map.insert(
            YamlValue::String("backends".to_string()),
            YamlValue::Mapping(backends),
        );

        map.insert(
            YamlValue::String(metric.clone()),
            YamlValue::Mapping(metric_map),
        );
    }
    YamlValue::Mapping(map)
}

fn backend_result_to_yaml(result: &BackendRunResult) -> YamlValue {
    let mut map = Mapping::new();
    match result {
        BackendRunResult::Sharded { properties, shards } => {
            map.insert(
                YamlValue::String("properties".to_string()),
                properties_to_yaml(properties),
            );
            let entries: Vec<YamlValue> = shards
                .iter()
                .map(|sv| {
                    let mut entry = Mapping::new();
                    entry.insert(
                        YamlValue::String("shard".to_string()),
                        YamlValue::Number(sv.shard.into()),
                    );
                    entry.insert(
                        YamlValue::String("value".to_string()),
                        value_to_yaml(&sv.value),
                    );
                    YamlValue::Mapping(entry)
                })
                .collect();
            map.insert(
                YamlValue::String("shards".to_string()),
                YamlValue::Sequence(entries),
            );
        }
        BackendRunResult::Shardless { properties, value } => {
            map.insert(
                YamlValue::String("properties".to_string()),
                properties_to_yaml(properties),
            );
            map.insert(
                YamlValue::String("value".to_string()),
                value_to_yaml(value),
            );
        }
    }
    YamlValue::Mapping(map)
}

fn stat_record_to_yaml(record: &StatRecord) -> YamlValue {
    let mut map = Mapping::new();
    let fields = [
        ("min", record.min),
        ("max", record.max),
        ("mean", record.mean),
        ("median", record.median),
        ("range", record.range),
        ("stdev", record.stdev),
        ("variance", record.variance),
    ];
    for (name, value) in fields {
        map.insert(
            YamlValue::String(name.to_string()),
            YamlValue::Number(value.into()),
        );
    }
    YamlValue::Mapping(map)
}

fn stats_to_yaml(stats: &Stats) -> YamlValue {
    let mut map = Mapping::new();

    let mut sharded = Mapping::new();
    for (metric, backends) in &stats.sharded_metrics {
        let mut backends_map = Mapping::new();
        for (backend, shards) in backends {
            let mut shards_map = Mapping::new();
            for (shard, record) in shards {
                shards_map.insert(
                    YamlValue::Number((*shard).into()),
                    stat_record_to_yaml(record),
                );
            }
            backends_map.insert(
                YamlValue::String(backend.clone()),
                YamlValue::Mapping(shards_map),
            );
        }
        sharded.insert(
            YamlValue::String(metric.clone()),
            YamlValue::Mapping(backends_map),
        );
    }
    map.insert(
        YamlValue::String("sharded_metrics".to_string()),
        YamlValue::Mapping(sharded),
    );

    let mut shardless = Mapping::new();
    for (metric, backends) in &stats.shardless_metrics {
        let mut backends_map = Mapping::new();
        for (backend, record) in backends {
            backends_map.insert(
                YamlValue::String(backend.clone()),
                stat_record_to_yaml(record),
            );
        }
        shardless.insert(
            YamlValue::String(metric.clone()),
            YamlValue::Mapping(backends_map),
        );
    }
    map.insert(
        YamlValue::String("shardless_metrics".to_string()),
        YamlValue::Mapping(shardless),
    );

    YamlValue::Mapping(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardbench_core::MetricPath;

    fn path(segments: &[&str]) -> MetricPath {
        MetricPath::from_segments(segments).unwrap()
    }

    #[test]
    fn test_tree_to_yaml_uses_leaf_marker() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["io", "read"]), Value::Int(42)).unwrap();
        let yaml = tree_to_yaml(&tree).unwrap();
        assert!(yaml.contains("__leaf__: 42"));
        assert!(yaml.contains("io:"));
    }

    #[test]
    fn test_tree_to_yaml_empty() {
        let tree: MetricTree<Value> = MetricTree::new();
        let yaml = tree_to_yaml(&tree).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }

    #[test]
    fn test_value_to_yaml_scalars() {
        assert_eq!(value_to_yaml(&Value::Null), YamlValue::Null);
        assert_eq!(value_to_yaml(&Value::Bool(true)), YamlValue::Bool(true));
        assert_eq!(
            value_to_yaml(&Value::Int(-3)),
            YamlValue::Number((-3i64).into())
        );
        assert_eq!(
            value_to_yaml(&Value::String("x".to_string())),
            YamlValue::String("x".to_string())
        );
    }
}
