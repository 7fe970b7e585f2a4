use std::{collections::BTreeSet, fs, path::Path};

use anyhow::{Context, Result};
use ci_tools_core::{
    config::GeneratorConfig,
    util::{has_extension, walk_files},
};
use serde::Deserialize;
use serde_yaml::{Mapping, Sequence, Value};

use crate::{
    config::Configuration,
    dashboard::{GeneratedDashboard, Role},
    release::ReleaseDescriptor,
};

/// Dashboards derived from every release descriptor under a directory.
#[derive(Debug, Default)]
pub struct Collected {
    pub dashboards: Vec<GeneratedDashboard>,
    /// Descriptors read and parsed.
    pub descriptors: usize,
    /// Descriptors without a known publish destination.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub descriptors: usize,
    pub skipped: usize,
    pub dashboards: usize,
    /// Whether the configured dashboard group was found in the group index.
    pub group_updated: bool,
}

/// Partition a release's verification jobs into its blocking and informing
/// dashboards. Returns `None` when the publish destination is unknown.
/// Dashboards without jobs are dropped.
pub fn dashboards_for_release(
    path: &Path,
    release: &ReleaseDescriptor,
    config: &GeneratorConfig,
) -> Option<Vec<GeneratedDashboard>> {
    let target = release.publish_target();
    let Some((product, version)) = target.product_version() else {
        tracing::info!(path = %path.display(), "Could not determine publish destination");
        return None;
    };

    let mut blocking = GeneratedDashboard::new(product, version, Role::Blocking);
    let mut informing = GeneratedDashboard::new(product, version, Role::Informing);
    for (key, job) in &release.verify {
        let name = job.prow_job.name.as_str();
        if name.is_empty() {
            tracing::warn!(path = %path.display(), key = %key, "Verify job has no prow job name");
            continue;
        }
        if config.is_excluded(name) {
            tracing::debug!(path = %path.display(), job = %name, "Skipping excluded job");
            continue;
        }
        match Role::for_job(job.optional) {
            Role::Blocking => blocking.add(name),
            Role::Informing => informing.add(name),
        }
    }
    Some([blocking, informing].into_iter().filter(|d| !d.is_empty()).collect())
}

/// Walk the release configuration directory and derive dashboards from every
/// `.json` descriptor, in walk order.
pub fn collect_dashboards(config: &GeneratorConfig) -> Result<Collected> {
    let mut collected = Collected::default();
    for path in walk_files(&config.release_config_dir)? {
        if !has_extension(&path, "json") {
            continue;
        }
        let data = fs::read(&path).with_context(|| {
            format!("Could not read release controller config at {}", path.display())
        })?;
        let release = ReleaseDescriptor::from_slice(&data).with_context(|| {
            format!("Could not unmarshal release controller config at {}", path.display())
        })?;
        collected.descriptors += 1;
        match dashboards_for_release(&path, &release, config) {
            Some(dashboards) => collected.dashboards.extend(dashboards),
            None => collected.skipped += 1,
        }
    }
    Ok(collected)
}

/// Merge `names` into the dashboard groups called `group` in a parsed group
/// index. Membership becomes the sorted union of the new names and the names
/// of every group with that name. Only the `dashboard_names` entry of those
/// groups is replaced; everything else, including key order, is untouched.
/// Returns `false` if no such group exists; groups are never created.
pub fn merge_group<'a>(
    index: &mut Value,
    group: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> bool {
    let Some(groups) = index.get_mut("dashboard_groups").and_then(Value::as_sequence_mut) else {
        return false;
    };
    let matching: Vec<&mut Mapping> = groups
        .iter_mut()
        .filter_map(Value::as_mapping_mut)
        .filter(|g| g.get("name").and_then(Value::as_str) == Some(group))
        .collect();
    if matching.is_empty() {
        return false;
    }

    let mut merged: BTreeSet<String> = names.into_iter().map(str::to_string).collect();
    for dash_group in &matching {
        if let Some(existing) = dash_group.get("dashboard_names").and_then(Value::as_sequence) {
            merged.extend(existing.iter().filter_map(Value::as_str).map(str::to_string));
        }
    }
    let merged: Sequence = merged.into_iter().map(Value::String).collect();
    for dash_group in matching {
        dash_group.insert(Value::from("dashboard_names"), Value::Sequence(merged.clone()));
    }
    true
}

/// Update the group index (`groups.yaml`) with the names of the generated
/// dashboards and write it back.
pub fn update_group_index(
    config: &GeneratorConfig,
    dashboards: &[GeneratedDashboard],
) -> Result<bool> {
    let path = config.groups_file();
    let data = fs::read_to_string(&path)
        .with_context(|| format!("Could not read TestGrid group config at {}", path.display()))?;
    let mut index: Value = serde_yaml::from_str(&data).with_context(|| {
        format!("Could not unmarshal TestGrid group config at {}", path.display())
    })?;
    // Reject documents that are not a TestGrid configuration before touching them
    Configuration::deserialize(&index).with_context(|| {
        format!("Could not unmarshal TestGrid group config at {}", path.display())
    })?;

    let found = merge_group(&mut index, &config.group, dashboards.iter().map(|d| d.name()));
    if !found {
        tracing::warn!(
            path = %path.display(),
            group = %config.group,
            "Dashboard group not found in group config, leaving membership unchanged"
        );
    }

    let data = serde_yaml::to_string(&index).context("Could not marshal TestGrid group config")?;
    fs::write(&path, data)
        .with_context(|| format!("Could not write TestGrid group config at {}", path.display()))?;
    Ok(found)
}

/// Write one configuration file per dashboard, replacing any existing file.
pub fn write_dashboards(
    config: &GeneratorConfig,
    dashboards: Vec<GeneratedDashboard>,
) -> Result<usize> {
    let mut written = 0;
    for dashboard in dashboards {
        let name = dashboard.name().to_string();
        let data = dashboard
            .into_configuration()
            .to_yaml()
            .with_context(|| format!("Could not marshal TestGrid config for {name}"))?;
        let path = config.dashboard_file(&name);
        fs::write(&path, data)
            .with_context(|| format!("Could not write TestGrid config for {name}"))?;
        tracing::debug!(path = %path.display(), "Wrote dashboard config");
        written += 1;
    }
    Ok(written)
}

/// Generate TestGrid dashboards for release-gating and release-informing jobs.
///
/// The whole run fails on the first read, parse or write error. Files written
/// before the failure are left in place.
pub fn generate(config: &GeneratorConfig) -> Result<Summary> {
    config.validate()?;
    let Collected { dashboards, descriptors, skipped } =
        collect_dashboards(config).context("Could not process input configurations")?;
    // First, update the overall list of dashboards that exist for the group
    let group_updated = update_group_index(config, &dashboards)?;
    // Then, rewrite any dashboard configs we are generating
    let dashboards = write_dashboards(config, dashboards)?;
    Ok(Summary { descriptors, skipped, dashboards, group_updated })
}

#[cfg(test)]
mod tests {
    use ci_tools_core::config::DEFAULT_EXCLUDED_JOB;

    use super::*;

    fn release(json: &str) -> ReleaseDescriptor {
        ReleaseDescriptor::from_slice(json.as_bytes()).unwrap()
    }

    fn names(dashboards: &[GeneratedDashboard]) -> Vec<&str> {
        dashboards.iter().map(|d| d.name()).collect()
    }

    #[test]
    fn test_partition_by_optional() {
        let release = release(
            r#"{
                "publish": {"tag": {"tagRef": {"name": "4.2"}}},
                "verify": {
                    "aws": {"prowJob": {"name": "e2e-aws-4.2"}},
                    "gcp": {"optional": true, "prowJob": {"name": "e2e-gcp-4.2"}},
                    "azure": {"optional": true, "prowJob": {"name": "e2e-azure-4.2"}}
                }
            }"#,
        );
        let config = GeneratorConfig::new("release", "testgrid");
        let dashboards =
            dashboards_for_release(Path::new("4.2.json"), &release, &config).unwrap();
        assert_eq!(names(&dashboards), [
            "redhat-openshift-ocp-release-4.2-blocking",
            "redhat-openshift-ocp-release-4.2-informing",
        ]);
        let blocking: Vec<_> = dashboards[0].test_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(blocking, ["e2e-aws-4.2"]);
        let informing: Vec<_> = dashboards[1].test_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(informing, ["e2e-azure-4.2", "e2e-gcp-4.2"]);
    }

    #[test]
    fn test_excluded_job_skipped() {
        let json = format!(
            r#"{{
                "publish": {{"mirror-to-origin": {{"imageStreamRef": {{"name": "origin-v4.0"}}}}}},
                "verify": {{
                    "upgrade": {{"prowJob": {{"name": "{DEFAULT_EXCLUDED_JOB}"}}}},
                    "upgrade-optional": {{"optional": true, "prowJob": {{"name": "{DEFAULT_EXCLUDED_JOB}"}}}},
                    "e2e": {{"optional": true, "prowJob": {{"name": "e2e-aws"}}}}
                }}
            }}"#
        );
        let release = release(&json);
        let config = GeneratorConfig::new("release", "testgrid");
        let dashboards =
            dashboards_for_release(Path::new("origin.json"), &release, &config).unwrap();
        // Nothing left for the blocking dashboard
        assert_eq!(names(&dashboards), ["redhat-openshift-okd-release-origin-v4.0-informing"]);
        assert!(dashboards.iter().all(|d| {
            d.test_groups.iter().all(|g| g.name != DEFAULT_EXCLUDED_JOB)
                && d.dashboard.dashboard_tab.iter().all(|t| t.name != DEFAULT_EXCLUDED_JOB)
        }));

        // Without the exclusion the job is treated like any other
        let config = config.with_excluded_jobs(Vec::<String>::new());
        let dashboards =
            dashboards_for_release(Path::new("origin.json"), &release, &config).unwrap();
        assert_eq!(dashboards.len(), 2);
        assert_eq!(dashboards[0].test_groups[0].name, DEFAULT_EXCLUDED_JOB);
    }

    #[test]
    fn test_unknown_publish_target() {
        let release = release(r#"{"verify": {"aws": {"prowJob": {"name": "e2e-aws"}}}}"#);
        let config = GeneratorConfig::new("release", "testgrid");
        assert!(dashboards_for_release(Path::new("x.json"), &release, &config).is_none());
    }

    #[test]
    fn test_no_jobs() {
        let release = release(
            r#"{"publish": {"tag": {"tagRef": {"name": "4.1"}}}, "verify": {
                "blank": {"prowJob": {"name": ""}}
            }}"#,
        );
        let config = GeneratorConfig::new("release", "testgrid");
        let dashboards = dashboards_for_release(Path::new("x.json"), &release, &config).unwrap();
        assert!(dashboards.is_empty());
    }

    fn parse_index(yaml: &str) -> Value { serde_yaml::from_str(yaml).unwrap() }

    fn group_names(index: &Value, i: usize) -> Vec<&str> {
        index["dashboard_groups"][i]["dashboard_names"]
            .as_sequence()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect()
    }

    #[test]
    fn test_merge_group() {
        let mut index = parse_index(
            "dashboard_groups:\n\
             - name: google\n  dashboard_names: [z, a]\n\
             - name: redhat\n  dashboard_names: [d, b]\n  description: Red Hat\n",
        );
        assert!(merge_group(&mut index, "redhat", ["c", "b", "a", "c"]));
        assert_eq!(group_names(&index, 1), ["a", "b", "c", "d"]);
        // Unrelated groups keep their order
        assert_eq!(group_names(&index, 0), ["z", "a"]);
        // The replaced entry keeps its position among the group's keys
        let keys: Vec<_> = index["dashboard_groups"][1]
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, ["name", "dashboard_names", "description"]);

        // Idempotent
        let before = index.clone();
        assert!(merge_group(&mut index, "redhat", ["a", "d"]));
        assert_eq!(index, before);
    }

    #[test]
    fn test_merge_duplicate_groups() {
        let mut index = parse_index(
            "dashboard_groups:\n\
             - name: redhat\n  dashboard_names: [b]\n\
             - name: redhat\n  dashboard_names: [c]\n",
        );
        assert!(merge_group(&mut index, "redhat", ["a"]));
        assert_eq!(group_names(&index, 0), ["a", "b", "c"]);
        assert_eq!(group_names(&index, 1), ["a", "b", "c"]);
    }

    #[test]
    fn test_merge_missing_group() {
        let mut index = parse_index("dashboard_groups:\n- name: google\n");
        let before = index.clone();
        assert!(!merge_group(&mut index, "redhat", ["a"]));
        assert_eq!(index, before);

        let mut empty = parse_index("{}");
        assert!(!merge_group(&mut empty, "redhat", ["a"]));
    }
}
