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

//! CLI command definitions and argument parsing.

use crate::commands::{self, BackendSpec};
use clap::Subcommand;
use std::path::PathBuf;

/// Top-level shardbench commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate raw tester output into a summary artifact
    ///
    /// Reads one raw output file per backend and run, drives the full
    /// extraction/join/accumulation/summarization pipeline, and writes
    /// `metrics_summary.yaml` into the output directory. Repeat a backend
    /// name to provide successive runs of that backend.
    Summarize {
        /// Backend raw output as NAME=FILE (repeatable)
        #[arg(short, long = "backend", value_name = "NAME=FILE", required = true)]
        backends: Vec<BackendSpec>,

        /// Directory receiving metrics_summary.yaml
        #[arg(short, long, value_name = "DIR")]
        output_dir: PathBuf,

        /// Run identifier per position (repeatable; defaults to 0,1,...)
        #[arg(long = "run-id", value_name = "N")]
        run_ids: Vec<u32>,

        /// Benchmark identifier stored in the artifact
        #[arg(long, default_value = "benchmark")]
        id: String,

        /// Benchmark path stored in the artifact
        #[arg(long = "bench-path", default_value = "")]
        bench_path: String,
    },

    /// Print the contents of a summary artifact
    Inspect {
        /// Summary artifact file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show per-shard statistics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Migrate a version 1 suite config to version 2
    ///
    /// Replaces each deprecated asymmetric `*_cpuset` key with an
    /// application/async-worker cpuset pair.
    UpgradeConfig {
        /// Suite config file to migrate
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Cores allotted to each async worker
        #[arg(long, value_name = "N")]
        cores_per_worker: usize,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the command.
    pub fn execute(self) -> Result<(), String> {
        match self {
            Commands::Summarize {
                backends,
                output_dir,
                run_ids,
                id,
                bench_path,
            } => commands::summarize(&backends, &output_dir, &run_ids, &id, &bench_path),
            Commands::Inspect { file, verbose } => commands::inspect(&file, verbose),
            Commands::UpgradeConfig {
                config,
                cores_per_worker,
                output,
            } => commands::upgrade_config(&config, cores_per_worker, output.as_deref()),
        }
    }
}
