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

//! Data-point extraction.
//!
//! Walks one backend's raw measurement records and produces every metric
//! path available in the data, split into shardless points (path -> value)
//! and sharded points (path -> {shard -> value}).

use crate::error::BenchResult;
use crate::path::MetricPath;
use crate::record::{Field, Record, SHARD_FIELD};
use crate::tree::MetricTree;
use crate::value::Value;
use std::collections::BTreeMap;

/// Shardless data points for one backend: path -> value.
pub type ShardlessPoints = MetricTree<Value>;

/// Sharded data points for one backend: path -> {shard -> value}.
pub type ShardedPoints = MetricTree<BTreeMap<u32, Value>>;

/// The extractor's output for one backend run.
#[derive(Debug, Clone, Default)]
pub struct DataPoints {
    /// Points from records without a shard discriminator.
    pub shardless: ShardlessPoints,
    /// Points from per-shard records, keyed by shard under each path.
    pub sharded: ShardedPoints,
}

/// Extract all data points from one backend's parsed record list.
///
/// Every non-mapping field value is a leaf whose path is the sequence of
/// field names traversed to reach it; the `shard` field is excluded from
/// paths and instead selects which output tree the record's leaves land in.
///
/// When the same shardless path repeats within one record list, the last
/// write wins. This mirrors the behavior of the testers this tool consumes
/// and is not treated as an error.
pub fn extract_data_points(records: &[Record]) -> BenchResult<DataPoints> {
    let mut points = DataPoints::default();

    for record in records {
        let shard = record.shard()?;
        let mut prefix = Vec::new();
        let mut leaves = Vec::new();
        collect_leaves(record.fields(), &mut prefix, &mut leaves);

        for (path, value) in leaves {
            match shard {
                Some(shard_index) => {
                    points
                        .sharded
                        .setdefault(&path, BTreeMap::new())?
                        .insert(shard_index, value);
                }
                None => points.shardless.set(&path, value)?,
            }
        }
    }

    Ok(points)
}

fn collect_leaves(
    fields: &BTreeMap<String, Field>,
    prefix: &mut Vec<String>,
    out: &mut Vec<(MetricPath, Value)>,
) {
    for (name, field) in fields {
        // The shard discriminator is record metadata, not metric identity;
        // it never appears in a path at any depth.
        if name == SHARD_FIELD {
            continue;
        }
        prefix.push(name.clone());
        match field {
            Field::Scalar(value) => out.push((MetricPath::from_vec(prefix.clone()), value.clone())),
            Field::Map(children) => collect_leaves(children, prefix, out),
        }
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    fn path(segments: &[&str]) -> MetricPath {
        MetricPath::from_segments(segments).unwrap()
    }

    fn nested(entries: Vec<(&str, Field)>) -> Field {
        Field::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn sharded_record(shard: i64, entries: Vec<(&str, Field)>) -> Record {
        let mut record = Record::new();
        record.insert(SHARD_FIELD, Field::Scalar(Value::Int(shard)));
        for (name, field) in entries {
            record.insert(name, field);
        }
        record
    }

    fn shardless_record(entries: Vec<(&str, Field)>) -> Record {
        let mut record = Record::new();
        for (name, field) in entries {
            record.insert(name, field);
        }
        record
    }

    #[test]
    fn test_extract_splits_sharded_and_shardless() {
        let records = vec![
            sharded_record(0, vec![("m", nested(vec![("x", Field::Scalar(Value::Int(10)))]))]),
            sharded_record(1, vec![("m", nested(vec![("x", Field::Scalar(Value::Int(20)))]))]),
            shardless_record(vec![("m", nested(vec![("y", Field::Scalar(Value::Int(5)))]))]),
        ];

        let points = extract_data_points(&records).unwrap();

        let shards = points.sharded.get(&path(&["m", "x"])).unwrap();
        assert_eq!(shards.get(&0), Some(&Value::Int(10)));
        assert_eq!(shards.get(&1), Some(&Value::Int(20)));
        assert_eq!(points.sharded.len(), 1);

        assert_eq!(points.shardless.get(&path(&["m", "y"])), Some(&Value::Int(5)));
        assert_eq!(points.shardless.len(), 1);
    }

    #[test]
    fn test_shard_field_excluded_from_paths() {
        let records = vec![sharded_record(
            2,
            vec![("throughput", Field::Scalar(Value::Float(1.5)))],
        )];
        let points = extract_data_points(&records).unwrap();

        assert!(points.sharded.contains(&path(&["throughput"])));
        assert!(!points.sharded.contains(&path(&["shard"])));
    }

    #[test]
    fn test_deep_nesting_builds_full_path() {
        let records = vec![shardless_record(vec![(
            "io",
            nested(vec![(
                "read",
                nested(vec![("256kb", Field::Scalar(Value::Int(123)))]),
            )]),
        )])];
        let points = extract_data_points(&records).unwrap();
        assert_eq!(
            points.shardless.get(&path(&["io", "read", "256kb"])),
            Some(&Value::Int(123))
        );
    }

    #[test]
    fn test_repeated_shardless_path_last_write_wins() {
        let records = vec![
            shardless_record(vec![("m", Field::Scalar(Value::Int(1)))]),
            shardless_record(vec![("m", Field::Scalar(Value::Int(2)))]),
        ];
        let points = extract_data_points(&records).unwrap();
        assert_eq!(points.shardless.get(&path(&["m"])), Some(&Value::Int(2)));
    }

    #[test]
    fn test_non_integer_shard_surfaces_error() {
        let mut record = Record::new();
        record.insert(SHARD_FIELD, Field::Scalar(Value::from("zero")));
        record.insert("m", Field::Scalar(Value::Int(1)));
        assert!(extract_data_points(&[record]).is_err());
    }

    #[test]
    fn test_record_with_only_shard_yields_nothing() {
        let records = vec![sharded_record(0, vec![])];
        let points = extract_data_points(&records).unwrap();
        assert!(points.sharded.is_empty());
        assert!(points.shardless.is_empty());
    }

    #[test]
    fn test_nested_shard_named_field_is_skipped() {
        let records = vec![shardless_record(vec![(
            "stats",
            nested(vec![
                ("shard", Field::Scalar(Value::Int(9))),
                ("total", Field::Scalar(Value::Int(4))),
            ]),
        )])];
        let points = extract_data_points(&records).unwrap();
        assert_eq!(points.shardless.get(&path(&["stats", "shard"])), None);
        assert_eq!(
            points.shardless.get(&path(&["stats", "total"])),
            Some(&Value::Int(4))
        );
    }
}
