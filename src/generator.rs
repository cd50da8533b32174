use std::fmt;

use sitewright_config::Experimental;
use sitewright_config::Feature;
use sitewright_config::Site;

/// A plugin handle passed to the generator, invoked with no arguments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integration {
    Mdx,
    Sitemap,
}

impl Integration {
    fn from_feature(feature: Feature) -> Self {
        match feature {
            Feature::ContentRendering => Integration::Mdx,
            Feature::SitemapGeneration => Integration::Sitemap,
        }
    }
}

/// The configuration object handed to the external site-generation engine.
///
/// The engine is a terminal consumer: nothing flows back across this
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GeneratorConfig {
    pub site: String,
    pub integrations: Vec<Integration>,
    pub experimental: Experimental,
}

impl GeneratorConfig {
    pub fn from_site(site: &Site) -> Self {
        Self {
            site: site.url.as_str().to_owned(),
            integrations: site
                .features
                .iter()
                .copied()
                .map(Integration::from_feature)
                .collect(),
            experimental: site.experimental,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use sitewright_config::Environments;

    #[test]
    fn from_site_orders_integrations() {
        let site = Environments::default().resolve("github-pages").unwrap();
        let actual = GeneratorConfig::from_site(&site);
        assert_eq!(actual.site, "https://msoup.github.io/blog/");
        assert_eq!(
            actual.integrations,
            [Integration::Mdx, Integration::Sitemap]
        );
        assert_eq!(actual.experimental, Experimental { assets: true });
    }

    #[test]
    fn display_yaml() {
        let site = Environments::default().resolve("custom-domain").unwrap();
        let actual = GeneratorConfig::from_site(&site).to_string();
        assert_eq!(
            actual,
            "site: https://www.cloudsoup.net\nintegrations:\n- mdx\n- sitemap\nexperimental:\n  assets: true\n"
        );
    }
}
