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

//! Summarize command - run the full aggregation pipeline over raw tester
//! output and write the summary artifact.

use super::read_file;
use crate::error::{CliError, CliResult};
use colored::Colorize;
use shardbench_core::{
    accumulate_runs, compute_benchmark_summary, extract_data_points, join_backends, BenchmarkInfo,
    RunMetrics,
};
use shardbench_yaml::{extract_embedded_document, parse_records, write_summary};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One `NAME=FILE` backend argument: a backend name and the raw output
/// file of one of its runs.
///
/// Repeating a name provides successive runs of that backend: the i-th
/// file given for each backend belongs to the i-th run.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSpec {
    /// Backend name, e.g. `io_uring`.
    pub name: String,
    /// Raw output file of one run.
    pub file: PathBuf,
}

impl FromStr for BackendSpec {
    type Err = CliError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        match spec.split_once('=') {
            Some((name, file)) if !name.is_empty() && !file.is_empty() => Ok(Self {
                name: name.to_string(),
                file: PathBuf::from(file),
            }),
            _ => Err(CliError::InvalidBackendSpec(spec.to_string())),
        }
    }
}

/// Run the pipeline over the given backend outputs and write
/// `metrics_summary.yaml` into `output_dir`.
///
/// `run_ids` overrides the run identifiers positionally; runs beyond the
/// provided list fall back to their position index.
pub fn summarize(
    backends: &[BackendSpec],
    output_dir: &Path,
    run_ids: &[u32],
    benchmark_id: &str,
    benchmark_path: &str,
) -> Result<(), String> {
    let benchmark = build_summary(backends, run_ids, benchmark_id, benchmark_path)
        .map_err(|e| e.to_string())?;
    let written = write_summary(output_dir, &benchmark).map_err(|e| e.to_string())?;

    println!("{} {}", "✓".green().bold(), written.display());
    println!("  Benchmark: {}", benchmark.benchmark.id);
    println!("  Runs: {}", benchmark.run_count);
    println!(
        "  Metrics: {} sharded, {} shardless",
        benchmark.summary.sharded_metrics.len(),
        benchmark.summary.shardless_metrics.len()
    );
    Ok(())
}

fn build_summary(
    backends: &[BackendSpec],
    run_ids: &[u32],
    benchmark_id: &str,
    benchmark_path: &str,
) -> CliResult<shardbench_core::Benchmark> {
    // Group files per backend, preserving argument order within a backend.
    let mut files_by_backend: BTreeMap<&str, Vec<&Path>> = BTreeMap::new();
    for spec in backends {
        files_by_backend
            .entry(spec.name.as_str())
            .or_default()
            .push(spec.file.as_path());
    }

    let total_runs = files_by_backend
        .values()
        .map(|files| files.len())
        .max()
        .unwrap_or(0);

    let mut runs = Vec::with_capacity(total_runs);
    for index in 0..total_runs {
        let mut per_backend = BTreeMap::new();
        for (name, files) in &files_by_backend {
            let Some(file) = files.get(index) else {
                continue;
            };
            let raw = read_file(file)?;
            let records = parse_records(extract_embedded_document(&raw)?)?;
            per_backend.insert(name.to_string(), extract_data_points(&records)?);
        }
        runs.push(RunMetrics {
            run_id: run_ids.get(index).copied().unwrap_or(index as u32),
            metrics: join_backends(&per_backend)?,
        });
    }

    let accumulated = accumulate_runs(&runs)?;
    Ok(compute_benchmark_summary(
        &accumulated,
        BenchmarkInfo {
            id: benchmark_id.to_string(),
            path: benchmark_path.to_string(),
            properties: BTreeMap::new(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_spec_parses() {
        let spec: BackendSpec = "epoll=out/epoll.txt".parse().unwrap();
        assert_eq!(spec.name, "epoll");
        assert_eq!(spec.file, PathBuf::from("out/epoll.txt"));
    }

    #[test]
    fn test_backend_spec_missing_separator() {
        assert!("epoll".parse::<BackendSpec>().is_err());
        assert!("=file".parse::<BackendSpec>().is_err());
        assert!("epoll=".parse::<BackendSpec>().is_err());
    }

    #[test]
    fn test_backend_spec_file_may_contain_equals() {
        let spec: BackendSpec = "epoll=dir/a=b.txt".parse().unwrap();
        assert_eq!(spec.file, PathBuf::from("dir/a=b.txt"));
    }
}
