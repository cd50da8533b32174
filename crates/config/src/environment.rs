use std::collections::BTreeMap;
use std::fmt;
use std::path;

use crate::ConfigError;
use crate::Experimental;
use crate::Feature;
use crate::Site;
use crate::SiteUrl;

pub const ENVIRONMENTS_FILE: &str = "_sitewright.yml";

/// A deployment target's raw settings, as written in the table.
///
/// The URL is held unvalidated; the invariant is checked when the
/// environment is resolved, not when the table is loaded.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Environment {
    pub site: String,
}

/// Lookup table mapping environment identifiers to deployment targets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Environments {
    pub environments: BTreeMap<String, Environment>,
}

impl Environments {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Self, ConfigError> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let environments = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?
        };

        Ok(environments)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Self, ConfigError> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<Self, ConfigError> {
        let file_path = find_project_file(cwd, ENVIRONMENTS_FILE);
        let environments = file_path
            .map(|p| {
                log::debug!("Using environments file `{}`", p.display());
                Self::from_file(&p)
            })
            .unwrap_or_else(|| {
                log::warn!(
                    "No {ENVIRONMENTS_FILE} file found in current directory, using built-in environments."
                );
                Ok(Self::default())
            })?;
        Ok(environments)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }

    /// Map an environment identifier to a validated [`Site`].
    ///
    /// Pure and deterministic: no I/O, no shared state.  An identifier
    /// missing from the table is `UnknownEnvironment`; a URL that violates
    /// the single-scheme invariant is `InvalidSiteUrl`, reported rather
    /// than corrected.
    pub fn resolve(&self, name: &str) -> Result<Site, ConfigError> {
        let environment =
            self.environments
                .get(name)
                .ok_or_else(|| ConfigError::UnknownEnvironment {
                    name: name.to_owned(),
                    known: self.names().map(String::from).collect(),
                })?;
        let url = SiteUrl::parse(environment.site.as_str())?;
        Ok(Site {
            url,
            features: Feature::all(),
            experimental: Experimental::default(),
        })
    }
}

impl Default for Environments {
    fn default() -> Self {
        // The `production` URL is malformed at the source; it stays verbatim
        // so `resolve` reports it instead of guessing a correction.
        let environments = [
            ("production", "http://http://143.198.144.49/"),
            ("github-pages", "https://msoup.github.io/blog/"),
            ("custom-domain", "https://www.cloudsoup.net"),
        ]
        .into_iter()
        .map(|(name, site)| {
            (
                name.to_owned(),
                Environment {
                    site: site.to_owned(),
                },
            )
        })
        .collect();
        Self { environments }
    }
}

impl fmt::Display for Environments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}
