//! TestGrid configuration documents.
//!
//! Only the fields this tool writes are modeled. Anything else found in a
//! document is kept in `extra`, so parsing and re-serializing a document
//! keeps unknown fields (though not their position). The group index is
//! rewritten from a `serde_yaml::Value` instead, see
//! [`crate::generator::merge_group`].

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test_groups: Vec<TestGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dashboards: Vec<Dashboard>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dashboard_groups: Vec<DashboardGroup>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TestGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gcs_prefix: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Dashboard {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dashboard_tab: Vec<DashboardTab>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardTab {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub test_group_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_options: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_test_template: Option<LinkTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_bug_template: Option<LinkTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_bug_template: Option<LinkTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_url_template: Option<LinkTemplate>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code_search_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_search_url_template: Option<LinkTemplate>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LinkTemplate {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<LinkOptionsTemplate>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl LinkTemplate {
    pub fn new(url: impl Into<String>) -> Self { Self { url: url.into(), ..Default::default() } }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(LinkOptionsTemplate {
            key: key.into(),
            value: value.into(),
            ..Default::default()
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LinkOptionsTemplate {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dashboard_names: Vec<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Configuration {
    pub fn from_yaml(data: &str) -> serde_yaml::Result<Self> { serde_yaml::from_str(data) }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> { serde_yaml::to_string(self) }
}
