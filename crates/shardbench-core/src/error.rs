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

//! Error types for the aggregation core.

use thiserror::Error;

/// Errors raised by the metric tree and the aggregation pipeline.
///
/// Structural violations (ambiguous matches, leaf/subtree conflicts) are
/// contract errors and propagate to the top-level invocation; the core has
/// no retry or partial-failure mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// A metric path must contain at least one segment.
    #[error("metric path must not be empty")]
    EmptyPath,

    /// A comparator matched more than one sibling key at the same level.
    #[error("ambiguous match for segment '{segment}' in path '{path}': candidates {candidates:?}")]
    AmbiguousMatch {
        /// The probe segment that matched multiple keys.
        segment: String,
        /// The full probe path, joined for display.
        path: String,
        /// All stored keys the comparator accepted.
        candidates: Vec<String>,
    },

    /// A lookup or insert hit a leaf where a subtree was expected, or the
    /// other way around.
    #[error("path conflict at '{path}': {message}")]
    PathConflict {
        /// The path at which the conflict was detected, joined for display.
        path: String,
        /// What was expected versus what was found.
        message: String,
    },

    /// A raw measurement record violated its structural contract.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl BenchError {
    /// Build a `PathConflict` error for the given path.
    pub fn path_conflict(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PathConflict {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a `MalformedRecord` error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord(message.into())
    }
}

/// Result type for core operations.
pub type BenchResult<T> = Result<T, BenchError>;
