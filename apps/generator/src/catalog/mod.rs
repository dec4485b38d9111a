// Config catalog: named YAML configurations under the configs directory.

pub mod listing;
pub mod loader;

pub use listing::{describe_configs, missing_config_hint, summarize_configs};
pub use loader::load_config;
