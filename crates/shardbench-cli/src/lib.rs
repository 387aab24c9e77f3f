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

//! shardbench CLI library.
//!
//! Command implementations for the `shardbench` binary:
//!
//! - **summarize**: run the aggregation pipeline over raw tester output
//!   and write the per-benchmark summary artifact
//! - **inspect**: print a summary artifact to the console
//! - **upgrade-config**: migrate version 1 suite configs to version 2
//!
//! The suite-config cpuset helpers live in [`config`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, CliResult};
