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

//! YAML layer for shardbench.
//!
//! Everything that touches text or files lives here: extracting the
//! embedded YAML payload from raw tester output, parsing it into
//! measurement records, and round-tripping metric trees and summary
//! artifacts.
//!
//! # Leaf marker
//!
//! A [`MetricTree`](shardbench_core::MetricTree) keeps leaf values
//! structurally distinct from internal nodes. The external representation
//! preserves that distinction with an explicit marker: a leaf serializes
//! as a one-key mapping `{__leaf__: <value>}`. Reading accepts the marker
//! form and, as shorthand for hand-written files, bare scalars.
//!
//! # Example
//!
//! ```rust
//! use shardbench_yaml::{extract_embedded_document, parse_records};
//!
//! let raw = "starting io-tester\n---\n- shard: 0\n  iops: 1200\n...\ndone\n";
//! let doc = extract_embedded_document(raw).unwrap();
//! let records = parse_records(doc).unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].shard().unwrap(), Some(0));
//! ```

mod error;
mod from_yaml;
mod to_yaml;

/// Marker key identifying a leaf in the external tree representation.
pub const LEAF_KEY: &str = "__leaf__";

/// File name of the per-benchmark summary artifact.
pub const SUMMARY_FILE_NAME: &str = "metrics_summary.yaml";

pub use error::{YamlError, YamlResult};
pub use from_yaml::{
    extract_embedded_document, parse_records, read_summary, summary_from_yaml, tree_from_yaml,
};
pub use to_yaml::{summary_to_yaml, tree_to_yaml, write_summary};
