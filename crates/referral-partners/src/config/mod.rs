use std::env;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the report runner.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub output: OutputConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_output_dir(None)
    }

    /// Like [`AppConfig::load`], but an explicit output directory replaces
    /// `APP_OUTPUT_DIR` before it is validated.
    pub fn load_with_output_dir(output_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let dir = match output_dir {
            Some(dir) => dir,
            None => PathBuf::from(
                env::var("APP_OUTPUT_DIR")
                    .unwrap_or_else(|_| ".".to_string())
                    .trim(),
            ),
        };
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }

        let render_chart = match env::var("APP_RENDER_CHART") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "APP_RENDER_CHART",
                value: raw,
            })?,
            Err(_) => true,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            output: OutputConfig {
                dir,
                render_chart,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Where report artifacts land and which optional artifacts are produced.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub render_chart: bool,
}

impl OutputConfig {
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_OUTPUT_DIR must not be empty")]
    EmptyOutputDir,
    #[error("{name} must be true or false (got '{value}')")]
    InvalidFlag { name: &'static str, value: String },
}
