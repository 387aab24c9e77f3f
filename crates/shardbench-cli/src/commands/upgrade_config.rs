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

//! Upgrade-config command - migrate v1 suite configs to v2.

use super::read_file;
use crate::config::upgrade_v1_to_v2;
use colored::Colorize;
use serde_yaml::Mapping;
use std::fs;
use std::path::Path;

/// Apply the v1 to v2 suite-config migration.
///
/// Writes the upgraded config to `output` when given, otherwise to
/// stdout.
pub fn upgrade_config(
    config_file: &Path,
    cores_per_worker: usize,
    output: Option<&Path>,
) -> Result<(), String> {
    let text = read_file(config_file).map_err(|e| e.to_string())?;
    let config: Mapping = serde_yaml::from_str(&text).map_err(|e| e.to_string())?;

    let upgraded = upgrade_v1_to_v2(&config, cores_per_worker).map_err(|e| e.to_string())?;
    let rendered = serde_yaml::to_string(&upgraded).map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            fs::write(path, rendered).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
            println!("{} {}", "✓".green().bold(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
