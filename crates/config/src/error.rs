use std::path;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unknown environment `{name}`, expected one of: {choices}", choices = .known.join(", "))]
    UnknownEnvironment { name: String, known: Vec<String> },
    #[error("invalid site URL `{url}`: {reason}")]
    InvalidSiteUrl { url: String, reason: String },
    #[error("failed to read environments from `{}`", .path.display())]
    Io {
        path: path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse environments from `{}`", .path.display())]
    Parse {
        path: path::PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
