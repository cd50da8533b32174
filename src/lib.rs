pub mod generator;

pub use sitewright_config::ConfigError;
pub use sitewright_config::Environment;
pub use sitewright_config::Environments;
pub use sitewright_config::Experimental;
pub use sitewright_config::Feature;
pub use sitewright_config::Site;
pub use sitewright_config::SiteUrl;
