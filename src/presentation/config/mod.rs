mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ExtractionProviderSetting, ExtractionSettings, LoggingSettings, PollingSettings,
    ServerSettings, Settings, TranscriptionProviderSetting, TranscriptionSettings,
};
