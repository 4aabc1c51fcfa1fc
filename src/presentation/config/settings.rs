use std::time::Duration;

use super::Environment;

#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub extraction: ExtractionSettings,
    pub polling: PollingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionProviderSetting {
    OpenAi,
    AssemblyAi,
}

impl TranscriptionProviderSetting {
    fn api_key_var(&self) -> &'static str {
        match self {
            TranscriptionProviderSetting::OpenAi => "OPENAI_API_KEY",
            TranscriptionProviderSetting::AssemblyAi => "ASSEMBLYAI_API_KEY",
        }
    }
}

impl TryFrom<String> for TranscriptionProviderSetting {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "assemblyai" => Ok(Self::AssemblyAi),
            other => Err(format!(
                "Invalid transcription provider: {}. Expected: openai or assemblyai",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionProviderSetting {
    OpenAi,
    AssemblyAi,
}

impl ExtractionProviderSetting {
    fn api_key_var(&self) -> &'static str {
        match self {
            ExtractionProviderSetting::OpenAi => "OPENAI_API_KEY",
            ExtractionProviderSetting::AssemblyAi => "ASSEMBLYAI_API_KEY",
        }
    }
}

impl TryFrom<String> for ExtractionProviderSetting {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "assemblyai" => Ok(Self::AssemblyAi),
            other => Err(format!(
                "Invalid extraction provider: {}. Expected: openai or assemblyai",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    pub provider: ExtractionProviderSetting,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PollingSettings {
    pub interval_ms: u64,
    pub max_wait_secs: u64,
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub json_format: bool,
}

impl Settings {
    /// Loads all settings from environment variables. Credentials enter the
    /// process here and are handed to providers at construction time; nothing
    /// downstream reads ambient state.
    pub fn from_env() -> Result<Self, String> {
        let environment = match std::env::var("APP_ENV") {
            Ok(value) => Environment::try_from(value)?,
            Err(_) => Environment::Local,
        };

        let transcription_provider = match std::env::var("TRANSCRIPTION_PROVIDER") {
            Ok(value) => TranscriptionProviderSetting::try_from(value)?,
            Err(_) => TranscriptionProviderSetting::OpenAi,
        };

        let extraction_provider = match std::env::var("EXTRACTION_PROVIDER") {
            Ok(value) => ExtractionProviderSetting::try_from(value)?,
            Err(_) => ExtractionProviderSetting::OpenAi,
        };

        let json_format = match std::env::var("LOG_FORMAT") {
            Ok(value) => value.to_lowercase() == "json",
            Err(_) => environment == Environment::Prod,
        };

        Ok(Self {
            environment,
            server: ServerSettings {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("SERVER_PORT", 3000)?,
            },
            transcription: TranscriptionSettings {
                api_key: std::env::var("TRANSCRIPTION_API_KEY")
                    .or_else(|_| std::env::var(transcription_provider.api_key_var()))
                    .unwrap_or_default(),
                provider: transcription_provider,
                base_url: optional_var("TRANSCRIPTION_BASE_URL"),
                model: optional_var("TRANSCRIPTION_MODEL"),
                language: optional_var("TRANSCRIPTION_LANGUAGE"),
            },
            extraction: ExtractionSettings {
                api_key: std::env::var("EXTRACTION_API_KEY")
                    .or_else(|_| std::env::var(extraction_provider.api_key_var()))
                    .unwrap_or_default(),
                provider: extraction_provider,
                base_url: optional_var("EXTRACTION_BASE_URL"),
                model: optional_var("EXTRACTION_MODEL"),
            },
            polling: PollingSettings {
                interval_ms: parse_var("POLL_INTERVAL_MS", 2500)?,
                max_wait_secs: parse_var("POLL_MAX_WAIT_SECS", 300)?,
            },
            logging: LoggingSettings { json_format },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| format!("Invalid {}: {}", name, value)),
        Err(_) => Ok(default),
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
