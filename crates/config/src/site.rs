use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::ConfigError;
use crate::Experimental;
use crate::Feature;

/// An absolute base URL with a single scheme and host.
///
/// The accepted text is kept verbatim.  Trailing slashes are significant to
/// the generator, and silently rewriting a malformed value could publish a
/// broken canonical URL, so nothing is normalized or corrected here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SiteUrl(String);

impl SiteUrl {
    pub fn parse<S: Into<String>>(raw: S) -> Result<Self, ConfigError> {
        Self::parse_internal(raw.into())
    }

    fn parse_internal(raw: String) -> Result<Self, ConfigError> {
        // `http://http://host/`, the paste-over-the-placeholder defect
        if has_duplicated_scheme(&raw) {
            return Err(ConfigError::InvalidSiteUrl {
                url: raw,
                reason: "duplicated scheme".to_owned(),
            });
        }
        let parsed = match url::Url::parse(&raw) {
            Ok(parsed) => parsed,
            Err(source) => {
                return Err(ConfigError::InvalidSiteUrl {
                    url: raw,
                    reason: source.to_string(),
                });
            }
        };
        if parsed.cannot_be_a_base() || !parsed.has_host() {
            return Err(ConfigError::InvalidSiteUrl {
                url: raw,
                reason: "missing host".to_owned(),
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Only a second scheme stacked directly on the first counts; a `://` later
// in the path or query is the host's business, not ours.
fn has_duplicated_scheme(raw: &str) -> bool {
    let Some((_, rest)) = raw.split_once("://") else {
        return false;
    };
    let Some((second, _)) = rest.split_once("://") else {
        return false;
    };
    let mut chars = second.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for SiteUrl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SiteUrl {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_internal(value)
    }
}

impl From<SiteUrl> for String {
    fn from(value: SiteUrl) -> Self {
        value.0
    }
}

/// A fully resolved site configuration.
///
/// Immutable once produced; every value satisfies the URL invariant.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Site {
    pub url: SiteUrl,
    pub features: BTreeSet<Feature>,
    pub experimental: Experimental,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_keeps_trailing_slash() {
        let actual = SiteUrl::parse("https://msoup.github.io/blog/").unwrap();
        assert_eq!(actual.as_str(), "https://msoup.github.io/blog/");
    }

    #[test]
    fn parse_keeps_bare_host() {
        let actual = SiteUrl::parse("https://www.cloudsoup.net").unwrap();
        assert_eq!(actual.as_str(), "https://www.cloudsoup.net");
    }

    #[test]
    fn parse_rejects_duplicated_scheme() {
        let actual = SiteUrl::parse("http://http://143.198.144.49/");
        assert!(matches!(
            actual,
            Err(ConfigError::InvalidSiteUrl { .. })
        ));

        let actual = SiteUrl::parse("https://https://example.com");
        assert!(matches!(
            actual,
            Err(ConfigError::InvalidSiteUrl { .. })
        ));
    }

    #[test]
    fn parse_keeps_embedded_url() {
        let actual = SiteUrl::parse("https://example.com/go?to=https://other").unwrap();
        assert_eq!(actual.as_str(), "https://example.com/go?to=https://other");

        let actual = SiteUrl::parse("https://example.com/mirror/https://other/").unwrap();
        assert_eq!(actual.as_str(), "https://example.com/mirror/https://other/");
    }

    #[test]
    fn parse_rejects_relative() {
        let actual = SiteUrl::parse("blog/");
        assert!(matches!(
            actual,
            Err(ConfigError::InvalidSiteUrl { .. })
        ));
    }

    #[test]
    fn parse_rejects_empty() {
        let actual = SiteUrl::parse("");
        assert!(matches!(
            actual,
            Err(ConfigError::InvalidSiteUrl { .. })
        ));
    }

    #[test]
    fn parse_rejects_hostless() {
        let actual = SiteUrl::parse("file:///srv/www");
        assert!(matches!(
            actual,
            Err(ConfigError::InvalidSiteUrl { .. })
        ));

        let actual = SiteUrl::parse("data:text/plain,hello");
        assert!(matches!(
            actual,
            Err(ConfigError::InvalidSiteUrl { .. })
        ));
    }

    #[test]
    fn deserialize_validates() {
        let actual: Result<SiteUrl, _> = serde_yaml::from_str("\"http://http://host/\"");
        assert!(actual.is_err());
    }
}
