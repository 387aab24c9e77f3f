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

//! Inspect command - print the contents of a summary artifact.

use colored::Colorize;
use shardbench_core::StatRecord;
use shardbench_yaml::read_summary;
use std::path::Path;

/// Load a summary artifact and print its run count, metrics, and
/// per-backend statistics.
pub fn inspect(file: &Path, verbose: bool) -> Result<(), String> {
    let benchmark = read_summary(file).map_err(|e| e.to_string())?;

    println!(
        "{} {}",
        "Benchmark".bold().underline(),
        benchmark.benchmark.id
    );
    println!("  Path: {}", benchmark.benchmark.path);
    println!("  Runs: {}", benchmark.run_count);

    if !benchmark.summary.shardless_metrics.is_empty() {
        println!("\n{}", "Shardless metrics".bold());
        for (metric, backends) in &benchmark.summary.shardless_metrics {
            println!("  {}", metric.green());
            for (backend, record) in backends {
                println!("    {}: {}", backend, format_record(record, verbose));
            }
        }
    }

    if !benchmark.summary.sharded_metrics.is_empty() {
        println!("\n{}", "Sharded metrics".bold());
        for (metric, backends) in &benchmark.summary.sharded_metrics {
            println!("  {}", metric.green());
            for (backend, shards) in backends {
                println!("    {} ({} shards)", backend, shards.len());
                if verbose {
                    for (shard, record) in shards {
                        println!("      shard {}: {}", shard, format_record(record, true));
                    }
                }
            }
        }
    }

    Ok(())
}

fn format_record(record: &StatRecord, verbose: bool) -> String {
    if verbose {
        format!(
            "mean {:.3}, median {:.3}, min {:.3}, max {:.3}, stdev {:.3}",
            record.mean, record.median, record.min, record.max, record.stdev
        )
    } else {
        format!("mean {:.3} (range {:.3})", record.mean, record.range)
    }
}
