//! Domain types for the client operations

pub mod config;
pub mod output;
pub mod params;
pub mod usage;

// Re-export for convenience
pub use config::{ClientConfig, ClientConfigBuilder};
pub use output::{LookupOutput, MatchInput, MatchOutput, SearchOutput};
pub use params::{
    EntityType, Language, LookupFormat, LookupOptions, MatchDataType, MatchOptions, Orient,
    SearchFormat, SearchOrder, SearchQuery, TagContentType, TagOptions, TagOutputFormat,
};
pub use usage::UsageSample;
