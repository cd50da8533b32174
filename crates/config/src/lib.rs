mod environment;
mod error;
mod features;
mod site;

pub use self::environment::*;
pub use self::error::*;
pub use self::features::*;
pub use self::site::*;
