use std::{fmt, str::FromStr};

use crate::{
    config::{Configuration, Dashboard, DashboardTab, LinkTemplate, TestGroup},
    release::Product,
};

const GCS_LOG_PREFIX: &str = "origin-ci-test/logs";
const PROW_URL: &str = "https://prow.svc.ci.openshift.org";
const ORIGIN_REPO_URL: &str = "https://github.com/openshift/origin";

/// Whether a job gates the release or only informs about it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Role {
    Blocking,
    Informing,
}

impl Role {
    pub const fn variants() -> &'static [Self] { &[Self::Blocking, Self::Informing] }

    pub fn for_job(optional: bool) -> Self { if optional { Self::Informing } else { Self::Blocking } }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::Informing => "informing",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blocking" => Ok(Self::Blocking),
            "informing" => Ok(Self::Informing),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

pub fn dashboard_name(product: Product, version: &str, role: Role) -> String {
    format!("redhat-openshift-{product}-release-{version}-{role}")
}

/// Builds a dashboard tab for a job with default values injected.
pub fn dashboard_tab_for(name: &str) -> DashboardTab {
    DashboardTab {
        name: name.to_string(),
        test_group_name: name.to_string(),
        base_options: "width=10".to_string(),
        open_test_template: Some(LinkTemplate::new(format!(
            "{PROW_URL}/view/gcs/<gcs_prefix>/<changelist>"
        ))),
        file_bug_template: Some(
            LinkTemplate::new(format!("{ORIGIN_REPO_URL}/issues/new"))
                .with_option("title", "E2E: <test-name>")
                .with_option("body", "<test-url>"),
        ),
        open_bug_template: Some(LinkTemplate::new(format!("{ORIGIN_REPO_URL}/issues/"))),
        results_url_template: Some(LinkTemplate::new(format!(
            "{PROW_URL}/job-history/<gcs_prefix>"
        ))),
        code_search_path: format!("{ORIGIN_REPO_URL}/search"),
        code_search_url_template: Some(LinkTemplate::new(format!(
            "{ORIGIN_REPO_URL}/compare/<start-custom-0>...<end-custom-0>"
        ))),
        ..Default::default()
    }
}

pub fn test_group_for(name: &str) -> TestGroup {
    TestGroup {
        name: name.to_string(),
        gcs_prefix: format!("{GCS_LOG_PREFIX}/{name}"),
        ..Default::default()
    }
}

/// A dashboard for one product, version and role, together with the test
/// groups its tabs refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDashboard {
    pub dashboard: Dashboard,
    pub test_groups: Vec<TestGroup>,
}

impl GeneratedDashboard {
    pub fn new(product: Product, version: &str, role: Role) -> Self {
        Self {
            dashboard: Dashboard {
                name: dashboard_name(product, version, role),
                ..Default::default()
            },
            test_groups: vec![],
        }
    }

    pub fn name(&self) -> &str { &self.dashboard.name }

    pub fn add(&mut self, job: &str) {
        self.dashboard.dashboard_tab.push(dashboard_tab_for(job));
        self.test_groups.push(test_group_for(job));
    }

    pub fn len(&self) -> usize { self.test_groups.len() }

    pub fn is_empty(&self) -> bool { self.test_groups.is_empty() }

    /// A standalone configuration holding only this dashboard and its test
    /// groups, sorted by name.
    pub fn into_configuration(self) -> Configuration {
        let Self { mut dashboard, mut test_groups } = self;
        test_groups.sort_by(|a, b| a.name.cmp(&b.name));
        dashboard.dashboard_tab.sort_by(|a, b| a.name.cmp(&b.name));
        Configuration { test_groups, dashboards: vec![dashboard], ..Default::default() }
    }
}
