//! Configuration section definitions.

mod build;
mod content;
mod site;

pub use build::{BuildConfig, ExtractorKind, FeedFormat};
pub use content::ContentConfig;
pub use site::SiteInfoConfig;
