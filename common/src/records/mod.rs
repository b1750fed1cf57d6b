mod record_book;
mod score_record;
mod settings;

use std::path::PathBuf;

use crate::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use record_book::RecordBook;
pub use score_record::ScoreRecord;
pub use settings::GameSettings;

pub type SettingsManager = ConfigManager<FileContentConfigProvider, GameSettings, YamlConfigSerializer>;
pub type RecordBookManager = ConfigManager<FileContentConfigProvider, RecordBook, YamlConfigSerializer>;

pub fn settings_manager(file_path: impl Into<PathBuf>) -> SettingsManager {
    ConfigManager::from_yaml_file(file_path)
}

pub fn record_book_manager(file_path: impl Into<PathBuf>) -> RecordBookManager {
    ConfigManager::from_yaml_file(file_path)
}
