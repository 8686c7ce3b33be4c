use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::partners::{ChartError, ContactImportError, ExportError, ImportError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("practice import error: {0}")]
    Import(#[from] ImportError),
    #[error("contact import error: {0}")]
    ContactImport(#[from] ContactImportError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    #[error("chart error: {0}")]
    Chart(#[from] ChartError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
