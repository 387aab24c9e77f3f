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

//! YAML to model conversion.
//!
//! Parses raw tester output into measurement records, and reads back the
//! external representations of metric trees and summary artifacts.

use crate::error::{YamlError, YamlResult};
use crate::LEAF_KEY;
use serde_yaml::{Mapping, Value as YamlValue};
use shardbench_core::{
    BackendRunResult, Benchmark, BenchmarkInfo, Field, MetricRunResults, MetricTree, Record,
    RunResults, RunSummary, ShardValue, StatRecord, Stats, TreeEntry, Value,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Extract the embedded YAML payload from raw tester output.
///
/// Testers print a `---` document-start line, the YAML payload, and a
/// `...` terminator, surrounded by arbitrary log noise. A missing start
/// marker is an error; a missing terminator is tolerated and the rest of
/// the text is used.
pub fn extract_embedded_document(raw: &str) -> YamlResult<&str> {
    let start = raw.find("---\n").ok_or(YamlError::MissingDocumentStart)?;
    let body = &raw[start + 4..];
    let body = match body.find("\n...") {
        Some(pos) => &body[..pos + 1],
        None => body.strip_suffix("...\n").unwrap_or(body),
    };
    Ok(body)
}

/// Parse a YAML sequence of mappings into measurement records.
///
/// An empty document yields no records. Non-mapping sequence entries and
/// non-string keys are rejected; duplicate keys within one mapping are
/// refused by the YAML parser itself.
pub fn parse_records(yaml: &str) -> YamlResult<Vec<Record>> {
    let value: YamlValue = serde_yaml::from_str(yaml).map_err(YamlError::parse)?;
    match value {
        YamlValue::Null => Ok(Vec::new()),
        YamlValue::Sequence(entries) => entries
            .iter()
            .map(|entry| match entry {
                YamlValue::Mapping(map) => Ok(Record::from_fields(mapping_to_fields(map)?)),
                other => Err(YamlError::InvalidShape(format!(
                    "record must be a mapping, found {}",
                    type_name(other)
                ))),
            })
            .collect(),
        other => Err(YamlError::InvalidRootType {
            expected: "sequence of records".to_string(),
            found: type_name(&other).to_string(),
        }),
    }
}

/// Reconstruct a metric tree from its external representation.
///
/// Leaves are mappings of the form `{__leaf__: <value>}`; any other
/// mapping is an internal node. A bare scalar is accepted as leaf
/// shorthand for hand-written files.
pub fn tree_from_yaml(yaml: &str) -> YamlResult<MetricTree<Value>> {
    let value: YamlValue = serde_yaml::from_str(yaml).map_err(YamlError::parse)?;
    match value {
        YamlValue::Null => Ok(MetricTree::new()),
        YamlValue::Mapping(map) => Ok(MetricTree::from_entries(mapping_to_entries(&map)?)),
        other => Err(YamlError::InvalidRootType {
            expected: "mapping".to_string(),
            found: type_name(&other).to_string(),
        }),
    }
}

/// Parse a summary artifact document.
pub fn summary_from_yaml(yaml: &str) -> YamlResult<Benchmark> {
    let value: YamlValue = serde_yaml::from_str(yaml).map_err(YamlError::parse)?;
    let map = match &value {
        YamlValue::Mapping(map) => map,
        other => {
            return Err(YamlError::InvalidRootType {
                expected: "mapping".to_string(),
                found: type_name(other).to_string(),
            })
        }
    };

    let info_map = require_mapping(map, "benchmark")?;
    let benchmark = BenchmarkInfo {
        id: require_str(info_map, "id")?,
        path: require_str(info_map, "path")?,
        properties: properties_from(info_map)?,
    };

    let mut runs = Vec::new();
    match map.get("runs") {
        Some(YamlValue::Sequence(entries)) => {
            for entry in entries {
                match entry {
                    YamlValue::Mapping(run_map) => runs.push(run_from_yaml(run_map)?),
                    other => {
                        return Err(YamlError::InvalidShape(format!(
                            "run entry must be a mapping, found {}",
                            type_name(other)
                        )))
                    }
                }
            }
        }
        Some(YamlValue::Null) | None => {}
        Some(other) => {
            return Err(YamlError::InvalidShape(format!(
                "`runs` must be a sequence, found {}",
                type_name(other)
            )))
        }
    }

    let run_count = match map.get("run_count") {
        Some(value) => usize_from(value, "run_count")?,
        None => runs.len(),
    };

    let summary = match map.get("summary") {
        Some(YamlValue::Mapping(summary_map)) => stats_from_yaml(summary_map)?,
        Some(YamlValue::Null) | None => Stats::default(),
        Some(other) => {
            return Err(YamlError::InvalidShape(format!(
                "`summary` must be a mapping, found {}",
                type_name(other)
            )))
        }
    };

    Ok(Benchmark {
        benchmark,
        run_count,
        runs,
        summary,
    })
}

/// Read and parse a summary artifact file.
pub fn read_summary(path: &Path) -> YamlResult<Benchmark> {
    let text = fs::read_to_string(path).map_err(|e| YamlError::io(path, &e))?;
    summary_from_yaml(&text)
}

// ---------------------------------------------------------------------------
// scalar and mapping helpers
// ---------------------------------------------------------------------------

pub(crate) fn type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "bool",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

pub(crate) fn scalar_from_yaml(value: &YamlValue) -> YamlResult<Value> {
    match value {
        YamlValue::Null => Ok(Value::Null),
        YamlValue::Bool(b) => Ok(Value::Bool(*b)),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(YamlError::InvalidShape(format!(
                    "number {} does not fit a 64-bit value",
                    n
                )))
            }
        }
        YamlValue::String(s) => Ok(Value::String(s.clone())),
        other => Err(YamlError::InvalidShape(format!(
            "expected a scalar, found {}",
            type_name(other)
        ))),
    }
}

fn key_string(key: &YamlValue) -> YamlResult<String> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        other => Err(YamlError::NonStringKey {
            key_type: type_name(other).to_string(),
        }),
    }
}

fn field_from_yaml(value: &YamlValue) -> YamlResult<Field> {
    match value {
        YamlValue::Mapping(map) => Ok(Field::Map(mapping_to_fields(map)?)),
        other => Ok(Field::Scalar(scalar_from_yaml(other)?)),
    }
}

fn mapping_to_fields(map: &Mapping) -> YamlResult<BTreeMap<String, Field>> {
    let mut fields = BTreeMap::new();
    for (key, value) in map {
        fields.insert(key_string(key)?, field_from_yaml(value)?);
    }
    Ok(fields)
}

fn mapping_to_entries(map: &Mapping) -> YamlResult<BTreeMap<String, TreeEntry<Value>>> {
    let mut entries = BTreeMap::new();
    for (key, value) in map {
        let key = key_string(key)?;
        let entry = match value {
            YamlValue::Mapping(child) => match child.get(LEAF_KEY) {
                Some(inner) => {
                    if child.len() != 1 {
                        return Err(YamlError::InvalidShape(format!(
                            "`{}` marker mapping must have no sibling keys",
                            LEAF_KEY
                        )));
                    }
                    TreeEntry::Leaf(scalar_from_yaml(inner)?)
                }
                None => TreeEntry::Node(mapping_to_entries(child)?),
            },
            other => TreeEntry::Leaf(scalar_from_yaml(other)?),
        };
        entries.insert(key, entry);
    }
    Ok(entries)
}

// ---------------------------------------------------------------------------
// summary artifact helpers
// ---------------------------------------------------------------------------

fn require_mapping<'a>(map: &'a Mapping, key: &str) -> YamlResult<&'a Mapping> {
    match map.get(key) {
        Some(YamlValue::Mapping(child)) => Ok(child),
        Some(other) => Err(YamlError::InvalidShape(format!(
            "`{}` must be a mapping, found {}",
            key,
            type_name(other)
        ))),
        None => Err(YamlError::InvalidShape(format!("missing `{}` key", key))),
    }
}

fn require_str(map: &Mapping, key: &str) -> YamlResult<String> {
    match map.get(key) {
        Some(YamlValue::String(s)) => Ok(s.clone()),
        Some(other) => Err(YamlError::InvalidShape(format!(
            "`{}` must be a string, found {}",
            key,
            type_name(other)
        ))),
        None => Err(YamlError::InvalidShape(format!("missing `{}` key", key))),
    }
}

fn usize_from(value: &YamlValue, context: &str) -> YamlResult<usize> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| {
            YamlError::InvalidShape(format!("`{}` must be a non-negative integer", context))
        })
}

fn u32_from(value: &YamlValue, context: &str) -> YamlResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            YamlError::InvalidShape(format!("`{}` must be a non-negative integer", context))
        })
}

fn f64_from(value: &YamlValue, context: &str) -> YamlResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| YamlError::InvalidShape(format!("`{}` must be a number", context)))
}

fn properties_from(map: &Mapping) -> YamlResult<BTreeMap<String, Value>> {
    let mut properties = BTreeMap::new();
    if let Some(YamlValue::Mapping(props)) = map.get("properties") {
        for (key, value) in props {
            properties.insert(key_string(key)?, scalar_from_yaml(value)?);
        }
    }
    Ok(properties)
}

fn run_from_yaml(map: &Mapping) -> YamlResult<RunSummary> {
    let id = u32_from(
        map.get("id")
            .ok_or_else(|| YamlError::InvalidShape("run is missing `id`".to_string()))?,
        "id",
    )?;
    let properties = properties_from(map)?;

    let mut results = RunResults::default();
    if let Some(YamlValue::Mapping(results_map)) = map.get("results") {
        if let Some(YamlValue::Mapping(metrics)) = results_map.get("sharded_metrics") {
            for (metric, value) in metrics {
                results
                    .sharded_metrics
                    .insert(key_string(metric)?, metric_results_from(value, true)?);
            }
        }
        if let Some(YamlValue::Mapping(metrics)) = results_map.get("shardless_metrics") {
            for (metric, value) in metrics {
                results
                    .shardless_metrics
                    .insert(key_string(metric)?, metric_results_from(value, false)?);
            }
        }
    }

    Ok(RunSummary {
        id,
        properties,
        results,
    })
}

fn metric_results_from(value: &YamlValue, sharded: bool) -> YamlResult<MetricRunResults> {
    let map = match value {
        YamlValue::Mapping(map) => map,
        other => {
            return Err(YamlError::InvalidShape(format!(
                "metric results must be a mapping, found {}",
                type_name(other)
            )))
        }
    };

    let mut results = MetricRunResults {
        properties: properties_from(map)?,
        backends: BTreeMap::new(),
    };

    if let Some(YamlValue::Mapping(backends)) = map.get("backends") {
        for (backend, value) in backends {
            let backend_map = match value {
                YamlValue::Mapping(map) => map,
                other => {
                    return Err(YamlError::InvalidShape(format!(
                        "backend result must be a mapping, found {}",
                        type_name(other)
                    )))
                }
            };
            let properties = properties_from(backend_map)?;
            let result = if sharded {
                let mut shards = Vec::new();
                if let Some(YamlValue::Sequence(entries)) = backend_map.get("shards") {
                    for entry in entries {
                        let shard_map = match entry {
                            YamlValue::Mapping(map) => map,
                            other => {
                                return Err(YamlError::InvalidShape(format!(
                                    "shard entry must be a mapping, found {}",
                                    type_name(other)
                                )))
                            }
                        };
                        let shard = u32_from(
                            shard_map.get("shard").ok_or_else(|| {
                                YamlError::InvalidShape("shard entry is missing `shard`".to_string())
                            })?,
                            "shard",
                        )?;
                        let value = scalar_from_yaml(
                            shard_map.get("value").unwrap_or(&YamlValue::Null),
                        )?;
                        shards.push(ShardValue { shard, value });
                    }
                }
                BackendRunResult::Sharded { properties, shards }
            } else {
                let value = scalar_from_yaml(backend_map.get("value").unwrap_or(&YamlValue::Null))?;
                BackendRunResult::Shardless { properties, value }
            };
            results.backends.insert(key_string(backend)?, result);
        }
    }

    Ok(results)
}

fn stat_record_from(value: &YamlValue) -> YamlResult<StatRecord> {
    let map = match value {
        YamlValue::Mapping(map) => map,
        other => {
            return Err(YamlError::InvalidShape(format!(
                "statistics record must be a mapping, found {}",
                type_name(other)
            )))
        }
    };
    let field = |key: &str| -> YamlResult<f64> {
        f64_from(
            map.get(key)
                .ok_or_else(|| YamlError::InvalidShape(format!("missing `{}` statistic", key)))?,
            key,
        )
    };
    Ok(StatRecord {
        min: field("min")?,
        max: field("max")?,
        mean: field("mean")?,
        median: field("median")?,
        range: field("range")?,
        stdev: field("stdev")?,
        variance: field("variance")?,
    })
}

fn stats_from_yaml(map: &Mapping) -> YamlResult<Stats> {
    let mut stats = Stats::default();

    if let Some(YamlValue::Mapping(metrics)) = map.get("sharded_metrics") {
        for (metric, backends) in metrics {
            let metric = key_string(metric)?;
            let backends = match backends {
                YamlValue::Mapping(map) => map,
                other => {
                    return Err(YamlError::InvalidShape(format!(
                        "sharded statistics for `{}` must be a mapping, found {}",
                        metric,
                        type_name(other)
                    )))
                }
            };
            let mut by_backend = BTreeMap::new();
            for (backend, shards) in backends {
                let shards_map = match shards {
                    YamlValue::Mapping(map) => map,
                    other => {
                        return Err(YamlError::InvalidShape(format!(
                            "per-shard statistics must be a mapping, found {}",
                            type_name(other)
                        )))
                    }
                };
                let mut by_shard = BTreeMap::new();
                for (shard, record) in shards_map {
                    by_shard.insert(u32_from(shard, "shard")?, stat_record_from(record)?);
                }
                by_backend.insert(key_string(backend)?, by_shard);
            }
            stats.sharded_metrics.insert(metric, by_backend);
        }
    }

    if let Some(YamlValue::Mapping(metrics)) = map.get("shardless_metrics") {
        for (metric, backends) in metrics {
            let metric = key_string(metric)?;
            let backends = match backends {
                YamlValue::Mapping(map) => map,
                other => {
                    return Err(YamlError::InvalidShape(format!(
                        "shardless statistics for `{}` must be a mapping, found {}",
                        metric,
                        type_name(other)
                    )))
                }
            };
            let mut by_backend = BTreeMap::new();
            for (backend, record) in backends {
                by_backend.insert(key_string(backend)?, stat_record_from(record)?);
            }
            stats.shardless_metrics.insert(metric, by_backend);
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardbench_core::MetricPath;

    fn path(segments: &[&str]) -> MetricPath {
        MetricPath::from_segments(segments).unwrap()
    }

    // ==================== extract_embedded_document ====================

    #[test]
    fn test_extract_between_markers() {
        let raw = "starting up\n---\n- shard: 0\n  iops: 100\n...\n";
        let doc = extract_embedded_document(raw).unwrap();
        assert_eq!(doc, "- shard: 0\n  iops: 100\n");
    }

    #[test]
    fn test_extract_missing_start_marker_is_error() {
        let raw = "no yaml here\n";
        assert_eq!(
            extract_embedded_document(raw).unwrap_err(),
            YamlError::MissingDocumentStart
        );
    }

    #[test]
    fn test_extract_missing_terminator_uses_rest() {
        let raw = "noise\n---\n- iops: 5\n";
        assert_eq!(extract_embedded_document(raw).unwrap(), "- iops: 5\n");
    }

    #[test]
    fn test_extract_ignores_trailing_noise_after_terminator() {
        let raw = "---\n- iops: 5\n...\nshutting down\n";
        assert_eq!(extract_embedded_document(raw).unwrap(), "- iops: 5\n");
    }

    // ==================== parse_records ====================

    #[test]
    fn test_parse_records_basic() {
        let yaml = "- shard: 0\n  iops: 100\n- stats:\n    total: 7\n";
        let records = parse_records(yaml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].shard().unwrap(), Some(0));
        let stats = records[1].fields()["stats"].as_map().unwrap();
        assert_eq!(stats["total"].as_scalar(), Some(&Value::Int(7)));
    }

    #[test]
    fn test_parse_records_empty_document() {
        assert!(parse_records("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_records_non_sequence_root_rejected() {
        let err = parse_records("iops: 100\n").unwrap_err();
        assert!(matches!(err, YamlError::InvalidRootType { .. }));
    }

    #[test]
    fn test_parse_records_non_mapping_entry_rejected() {
        let err = parse_records("- 42\n").unwrap_err();
        assert!(matches!(err, YamlError::InvalidShape(_)));
    }

    #[test]
    fn test_parse_records_duplicate_key_rejected() {
        let err = parse_records("- iops: 1\n  iops: 2\n").unwrap_err();
        assert!(matches!(err, YamlError::ParseError(_)));
    }

    #[test]
    fn test_parse_records_non_string_key_rejected() {
        let err = parse_records("- 1: x\n").unwrap_err();
        assert!(matches!(err, YamlError::NonStringKey { .. }));
    }

    #[test]
    fn test_parse_records_float_and_string_values() {
        let yaml = "- lat: 2.5\n  name: reader\n  active: true\n";
        let records = parse_records(yaml).unwrap();
        let fields = records[0].fields();
        assert_eq!(fields["lat"].as_scalar(), Some(&Value::Float(2.5)));
        assert_eq!(
            fields["name"].as_scalar(),
            Some(&Value::String("reader".to_string()))
        );
        assert_eq!(fields["active"].as_scalar(), Some(&Value::Bool(true)));
    }

    // ==================== tree_from_yaml ====================

    #[test]
    fn test_tree_from_yaml_leaf_marker() {
        let yaml = "io:\n  read:\n    __leaf__: 42\n";
        let tree = tree_from_yaml(yaml).unwrap();
        assert_eq!(tree.get(&path(&["io", "read"])), Some(&Value::Int(42)));
    }

    #[test]
    fn test_tree_from_yaml_bare_scalar_is_leaf() {
        let yaml = "io:\n  read: 42\n";
        let tree = tree_from_yaml(yaml).unwrap();
        assert_eq!(tree.get(&path(&["io", "read"])), Some(&Value::Int(42)));
    }

    #[test]
    fn test_tree_from_yaml_marker_with_sibling_rejected() {
        let yaml = "io:\n  __leaf__: 1\n  extra: 2\n";
        assert!(matches!(
            tree_from_yaml(yaml).unwrap_err(),
            YamlError::InvalidShape(_)
        ));
    }

    #[test]
    fn test_tree_from_yaml_duplicate_key_rejected() {
        let err = tree_from_yaml("io: 1\nio: 2\n").unwrap_err();
        assert!(matches!(err, YamlError::ParseError(_)));
    }

    #[test]
    fn test_tree_from_yaml_empty() {
        assert!(tree_from_yaml("").unwrap().is_empty());
    }

    // ==================== summary_from_yaml ====================

    #[test]
    fn test_summary_from_yaml_minimal() {
        let yaml = "\
benchmark:
  id: io_read
  path: io/read
run_count: 1
runs:
  - id: 0
    results:
      shardless_metrics:
        lat:
          backends:
            epoll:
              value: 2.5
summary:
  shardless_metrics:
    lat:
      epoll:
        min: 2.5
        max: 2.5
        mean: 2.5
        median: 2.5
        range: 0.0
        stdev: 0.0
        variance: 0.0
";
        let benchmark = summary_from_yaml(yaml).unwrap();
        assert_eq!(benchmark.benchmark.id, "io_read");
        assert_eq!(benchmark.run_count, 1);
        assert_eq!(
            benchmark.runs[0].results.shardless_metrics["lat"].backends["epoll"],
            BackendRunResult::Shardless {
                properties: BTreeMap::new(),
                value: Value::Float(2.5),
            }
        );
        assert_eq!(benchmark.summary.shardless_metrics["lat"]["epoll"].mean, 2.5);
    }

    #[test]
    fn test_summary_missing_benchmark_key_rejected() {
        assert!(matches!(
            summary_from_yaml("runs: []\n").unwrap_err(),
            YamlError::InvalidShape(_)
        ));
    }

    #[test]
    fn test_summary_incomplete_stat_record_rejected() {
        let yaml = "\
benchmark:
  id: x
  path: x
summary:
  shardless_metrics:
    lat:
      epoll:
        min: 1.0
";
        assert!(matches!(
            summary_from_yaml(yaml).unwrap_err(),
            YamlError::InvalidShape(_)
        ));
    }
}
