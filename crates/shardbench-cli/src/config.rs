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

//! Suite configuration versioning.
//!
//! Version 1 suite configs carried a single cpuset per asymmetric tester;
//! version 2 splits each into an application cpuset and an async-worker
//! cpuset. The upgrade takes the low cores for the workers in proportion
//! to `cores_per_worker` and leaves the rest to the application.

use crate::error::{CliError, CliResult};
use serde_yaml::{Mapping, Value as YamlValue};
use std::collections::BTreeSet;

/// The v1 cpuset keys replaced by `*_app_cpuset` / `*_async_worker_cpuset`
/// pairs in v2.
pub const DEPRECATED_CPUSET_KEYS: [&str; 3] = [
    "io_asymmetric_cpuset",
    "rpc_asymmetric_server_cpuset",
    "rpc_asymmetric_client_cpuset",
];

/// Parse a cpuset string such as `0-3,7` into a core set.
pub fn parse_cpuset(cpuset: &str) -> CliResult<BTreeSet<u32>> {
    let mut result = BTreeSet::new();
    for element in cpuset.split(',') {
        match element.split_once('-') {
            Some((begin, end)) => {
                let begin: u32 = begin
                    .parse()
                    .map_err(|_| CliError::invalid_cpuset(cpuset, "range start is not a number"))?;
                let end: u32 = end
                    .parse()
                    .map_err(|_| CliError::invalid_cpuset(cpuset, "range end is not a number"))?;
                if begin > end {
                    return Err(CliError::invalid_cpuset(cpuset, "range start exceeds end"));
                }
                result.extend(begin..=end);
            }
            None => {
                let core: u32 = element
                    .parse()
                    .map_err(|_| CliError::invalid_cpuset(cpuset, "element is not a number"))?;
                result.insert(core);
            }
        }
    }
    Ok(result)
}

/// Render a core set back to the `0,1,2,7` string form.
pub fn cpuset_to_string(cpuset: &BTreeSet<u32>) -> String {
    cpuset
        .iter()
        .map(|core| core.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a cpuset into (application cores, async-worker cores).
///
/// One async worker is provisioned per `cores_per_worker + 1` cores; the
/// workers take the lowest cores and the application keeps the rest. Zero
/// cores per worker, and cpusets too small to leave the application any
/// cores, are errors.
pub fn proportional_split(
    cpuset: &BTreeSet<u32>,
    cores_per_worker: usize,
) -> CliResult<(BTreeSet<u32>, BTreeSet<u32>)> {
    if cores_per_worker == 0 {
        return Err(CliError::InvalidConfig(
            "cores per worker must be more than 0".to_string(),
        ));
    }

    let num_workers = cpuset.len() / (cores_per_worker + 1);
    if cpuset.len() <= num_workers {
        return Err(CliError::InvalidConfig(
            "not enough cores in the cpuset for the requested number of async workers".to_string(),
        ));
    }

    // BTreeSet iterates in ascending core order
    let async_worker_cpuset: BTreeSet<u32> = cpuset.iter().copied().take(num_workers).collect();
    let app_cpuset: BTreeSet<u32> = cpuset.iter().copied().skip(num_workers).collect();

    Ok((app_cpuset, async_worker_cpuset))
}

/// The config's declared version; absent means version 1.
pub fn config_version(config: &Mapping) -> CliResult<i64> {
    match config.get("config_version") {
        None => Ok(1),
        Some(value) => value.as_i64().ok_or_else(|| {
            CliError::InvalidConfig("config_version must be an integer".to_string())
        }),
    }
}

/// Upgrade a version 1 suite config to version 2.
///
/// Each deprecated `*_cpuset` key is replaced with an `*_app_cpuset` /
/// `*_async_worker_cpuset` pair produced by [`proportional_split`]. The
/// input mapping is left untouched; non-v1 configs are rejected.
pub fn upgrade_v1_to_v2(config: &Mapping, cores_per_worker: usize) -> CliResult<Mapping> {
    if config_version(config)? != 1 {
        return Err(CliError::InvalidConfig(
            "expected version 1 config".to_string(),
        ));
    }

    let mut upgraded = config.clone();
    for key in DEPRECATED_CPUSET_KEYS {
        let value = upgraded.remove(key).ok_or_else(|| {
            CliError::InvalidConfig(format!("missing deprecated key `{}`", key))
        })?;
        let cpuset_str = value.as_str().ok_or_else(|| {
            CliError::InvalidConfig(format!("`{}` must be a cpuset string", key))
        })?;

        let cpuset = parse_cpuset(cpuset_str)?;
        let (app_cpuset, async_worker_cpuset) = proportional_split(&cpuset, cores_per_worker)?;

        let basename = key.trim_end_matches("_cpuset");
        upgraded.insert(
            YamlValue::String(format!("{}_app_cpuset", basename)),
            YamlValue::String(cpuset_to_string(&app_cpuset)),
        );
        upgraded.insert(
            YamlValue::String(format!("{}_async_worker_cpuset", basename)),
            YamlValue::String(cpuset_to_string(&async_worker_cpuset)),
        );
    }

    upgraded.insert(
        YamlValue::String("config_version".to_string()),
        YamlValue::Number(2.into()),
    );

    Ok(upgraded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1_config() -> Mapping {
        let yaml = "\
io_asymmetric_cpuset: 0-5
rpc_asymmetric_server_cpuset: 6-11
rpc_asymmetric_client_cpuset: 12-17
runs: 3
";
        serde_yaml::from_str(yaml).unwrap()
    }

    // ==================== parse_cpuset ====================

    #[test]
    fn test_parse_single_cores() {
        assert_eq!(parse_cpuset("0,2,5").unwrap(), BTreeSet::from([0, 2, 5]));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_cpuset("1-4").unwrap(), BTreeSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn test_parse_mixed() {
        assert_eq!(
            parse_cpuset("0-2,7,9-10").unwrap(),
            BTreeSet::from([0, 1, 2, 7, 9, 10])
        );
    }

    #[test]
    fn test_parse_duplicates_collapse() {
        assert_eq!(parse_cpuset("1,1,1-2").unwrap(), BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!(parse_cpuset("0,x").is_err());
        assert!(parse_cpuset("3-1").is_err());
        assert!(parse_cpuset("").is_err());
    }

    #[test]
    fn test_cpuset_string_round_trip() {
        let cpuset = parse_cpuset("0-3,7").unwrap();
        assert_eq!(cpuset_to_string(&cpuset), "0,1,2,3,7");
    }

    // ==================== proportional_split ====================

    #[test]
    fn test_split_takes_low_cores_for_workers() {
        let cpuset = parse_cpuset("0-5").unwrap();
        let (app, workers) = proportional_split(&cpuset, 2).unwrap();
        // 6 cores / (2 + 1) = 2 workers
        assert_eq!(workers, BTreeSet::from([0, 1]));
        assert_eq!(app, BTreeSet::from([2, 3, 4, 5]));
    }

    #[test]
    fn test_split_small_cpuset_gets_no_workers() {
        let cpuset = parse_cpuset("0-1").unwrap();
        let (app, workers) = proportional_split(&cpuset, 2).unwrap();
        assert!(workers.is_empty());
        assert_eq!(app, BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_split_zero_cores_per_worker_rejected() {
        let cpuset = parse_cpuset("0-5").unwrap();
        assert!(proportional_split(&cpuset, 0).is_err());
    }

    // ==================== config versioning ====================

    #[test]
    fn test_version_defaults_to_one() {
        assert_eq!(config_version(&Mapping::new()).unwrap(), 1);
    }

    #[test]
    fn test_version_read_from_config() {
        let mut config = Mapping::new();
        config.insert(
            YamlValue::String("config_version".to_string()),
            YamlValue::Number(2.into()),
        );
        assert_eq!(config_version(&config).unwrap(), 2);
    }

    #[test]
    fn test_upgrade_replaces_deprecated_keys() {
        let upgraded = upgrade_v1_to_v2(&v1_config(), 2).unwrap();

        assert!(upgraded.get("io_asymmetric_cpuset").is_none());
        assert_eq!(
            upgraded.get("io_asymmetric_app_cpuset"),
            Some(&YamlValue::String("2,3,4,5".to_string()))
        );
        assert_eq!(
            upgraded.get("io_asymmetric_async_worker_cpuset"),
            Some(&YamlValue::String("0,1".to_string()))
        );
        assert_eq!(
            upgraded.get("config_version"),
            Some(&YamlValue::Number(2.into()))
        );
        // unrelated keys survive
        assert_eq!(upgraded.get("runs"), Some(&YamlValue::Number(3.into())));
    }

    #[test]
    fn test_upgrade_does_not_mutate_input() {
        let config = v1_config();
        let before = config.clone();
        upgrade_v1_to_v2(&config, 2).unwrap();
        assert_eq!(config, before);
    }

    #[test]
    fn test_upgrade_rejects_non_v1() {
        let upgraded = upgrade_v1_to_v2(&v1_config(), 2).unwrap();
        assert!(matches!(
            upgrade_v1_to_v2(&upgraded, 2).unwrap_err(),
            CliError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_upgrade_missing_deprecated_key_rejected() {
        let mut config = v1_config();
        config.remove("rpc_asymmetric_client_cpuset");
        assert!(upgrade_v1_to_v2(&config, 2).is_err());
    }
}
