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

//! Error types for YAML parsing and serialization.

use shardbench_core::BenchError;
use thiserror::Error;

/// Errors that can occur while parsing or serializing YAML documents.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum YamlError {
    /// YAML parsing or serialization failed
    #[error("YAML error: {0}")]
    ParseError(String),

    /// Raw tester output contained no embedded document start marker
    #[error("no embedded YAML document found: missing `---` start marker")]
    MissingDocumentStart,

    /// Document root has the wrong shape
    #[error("expected {expected} at document root, found {found}")]
    InvalidRootType { expected: String, found: String },

    /// Non-string key encountered in a mapping
    #[error("non-string keys not supported, found {key_type}")]
    NonStringKey { key_type: String },

    /// A value did not match the expected artifact shape
    #[error("malformed document: {0}")]
    InvalidShape(String),

    /// The summary file already exists; it is written once per directory
    #[error("summary file already exists: {path}")]
    SummaryExists { path: String },

    /// File I/O failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// A core invariant was violated while rebuilding a tree
    #[error(transparent)]
    Core(#[from] BenchError),
}

impl YamlError {
    pub(crate) fn parse(err: serde_yaml::Error) -> Self {
        Self::ParseError(err.to_string())
    }

    pub(crate) fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result alias for YAML operations.
pub type YamlResult<T> = Result<T, YamlError>;
