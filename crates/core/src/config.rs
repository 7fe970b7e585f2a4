use std::path::PathBuf;

use anyhow::{Result, bail};

/// Name of the group index file inside the TestGrid configuration directory.
pub const GROUPS_FILE: &str = "groups.yaml";

/// Dashboard group that generated dashboards are registered under.
pub const DEFAULT_GROUP: &str = "redhat";

/// This job is not sharded by version, so it never belongs on a
/// per-version dashboard.
// TODO: confirm with the release team whether this exclusion is still needed.
pub const DEFAULT_EXCLUDED_JOB: &str = "release-openshift-origin-installer-e2e-aws-upgrade";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Release Controller configuration directory.
    pub release_config_dir: PathBuf,
    /// TestGrid configuration directory.
    pub testgrid_config_dir: PathBuf,
    /// Dashboard group to merge generated dashboard names into.
    pub group: String,
    /// Prow job names that are never assigned to a dashboard.
    pub excluded_jobs: Vec<String>,
}

impl GeneratorConfig {
    pub fn new(
        release_config_dir: impl Into<PathBuf>,
        testgrid_config_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            release_config_dir: release_config_dir.into(),
            testgrid_config_dir: testgrid_config_dir.into(),
            group: DEFAULT_GROUP.to_string(),
            excluded_jobs: vec![DEFAULT_EXCLUDED_JOB.to_string()],
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_excluded_jobs<I, S>(mut self, jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_jobs = jobs.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.release_config_dir.as_os_str().is_empty() {
            bail!("--release-config is required");
        }
        if self.testgrid_config_dir.as_os_str().is_empty() {
            bail!("--testgrid-config is required");
        }
        if self.group.is_empty() {
            bail!("dashboard group name must not be empty");
        }
        Ok(())
    }

    pub fn is_excluded(&self, job: &str) -> bool { self.excluded_jobs.iter().any(|j| j == job) }

    pub fn groups_file(&self) -> PathBuf { self.testgrid_config_dir.join(GROUPS_FILE) }

    pub fn dashboard_file(&self, dashboard: &str) -> PathBuf {
        self.testgrid_config_dir.join(format!("{dashboard}.yaml"))
    }
}
