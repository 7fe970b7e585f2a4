use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Deserialize;

/// The subset of a Release Controller release stream configuration needed
/// to place its verification jobs on dashboards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseDescriptor {
    #[serde(default)]
    pub publish: Publish,
    #[serde(default)]
    pub verify: BTreeMap<String, VerifyJob>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Publish {
    #[serde(rename = "mirror-to-origin", default)]
    pub mirror: Option<MirrorPublish>,
    #[serde(default)]
    pub tag: Option<TagPublish>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MirrorPublish {
    #[serde(rename = "imageStreamRef", default)]
    pub image_stream_ref: Option<NamedRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagPublish {
    #[serde(rename = "tagRef", default)]
    pub tag_ref: Option<NamedRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyJob {
    #[serde(default)]
    pub optional: bool,
    #[serde(rename = "prowJob", default)]
    pub prow_job: NamedRef,
}

impl ReleaseDescriptor {
    pub fn from_slice(data: &[u8]) -> serde_json::Result<Self> { serde_json::from_slice(data) }

    pub fn publish_target(&self) -> PublishTarget { PublishTarget::from(&self.publish) }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Product {
    Okd,
    Ocp,
}

impl Product {
    pub const fn variants() -> &'static [Self] { &[Self::Okd, Self::Ocp] }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Okd => "okd",
            Self::Ocp => "ocp",
        }
    }
}

impl FromStr for Product {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "okd" => Ok(Self::Okd),
            "ocp" => Ok(Self::Ocp),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Where a release stream publishes its payloads.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PublishTarget {
    /// Mirrored to an OKD image stream.
    MirroredImageStream(String),
    /// Tagged into an OCP release image stream tag.
    TaggedRelease(String),
    Unknown,
}

impl PublishTarget {
    pub fn product_version(&self) -> Option<(Product, &str)> {
        match self {
            Self::MirroredImageStream(name) => Some((Product::Okd, name)),
            Self::TaggedRelease(name) => Some((Product::Ocp, name)),
            Self::Unknown => None,
        }
    }
}

impl From<&Publish> for PublishTarget {
    fn from(publish: &Publish) -> Self {
        let mirror = publish.mirror.as_ref().and_then(|m| m.image_stream_ref.as_ref());
        let tag = publish.tag.as_ref().and_then(|t| t.tag_ref.as_ref());
        // The mirror destination takes precedence when both are configured
        if let Some(r) = mirror.filter(|r| !r.name.is_empty()) {
            Self::MirroredImageStream(r.name.clone())
        } else if let Some(r) = tag.filter(|r| !r.name.is_empty()) {
            Self::TaggedRelease(r.name.clone())
        } else {
            Self::Unknown
        }
    }
}
