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

//! Structured error types for the shardbench CLI.

use shardbench_core::BenchError;
use shardbench_yaml::YamlError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by CLI commands and the suite-config helpers.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A cpuset string could not be parsed.
    #[error("invalid cpuset '{input}': {message}")]
    InvalidCpuset {
        /// The offending cpuset string
        input: String,
        /// What went wrong
        message: String,
    },

    /// A suite configuration document violated its contract.
    #[error("invalid suite config: {0}")]
    InvalidConfig(String),

    /// A `NAME=FILE` backend specification was malformed.
    #[error("invalid backend spec '{0}': expected NAME=FILE")]
    InvalidBackendSpec(String),

    /// YAML layer failure.
    #[error(transparent)]
    Yaml(#[from] YamlError),

    /// Aggregation core failure.
    #[error(transparent)]
    Core(#[from] BenchError),
}

impl CliError {
    /// Build an `Io` error with path context.
    pub fn io_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Build an `InvalidCpuset` error.
    pub fn invalid_cpuset(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCpuset {
            input: input.into(),
            message: message.into(),
        }
    }
}

/// Result alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
