use std::collections::BTreeSet;
use std::fmt;

/// A capability of the external generator that a site can enable.
///
/// The set is closed: identifiers outside this enum fail deserialization
/// rather than registering new features.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    ContentRendering,
    SitemapGeneration,
}

impl Feature {
    pub fn all() -> BTreeSet<Feature> {
        [Feature::ContentRendering, Feature::SitemapGeneration]
            .into_iter()
            .collect()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::ContentRendering => "content_rendering",
            Feature::SitemapGeneration => "sitemap_generation",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Experimental {
    pub assets: bool,
}

impl Default for Experimental {
    fn default() -> Self {
        Self { assets: true }
    }
}
