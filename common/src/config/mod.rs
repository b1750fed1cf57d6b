mod config_content_provider;
mod config_manager;
mod validate;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_manager::{ConfigManager, ConfigSerializer, YamlConfigSerializer};
pub use validate::Validate;
