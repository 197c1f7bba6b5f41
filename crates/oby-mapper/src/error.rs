use crate::config::ConfigError;
use crate::schema::SchemaError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Startup and command-line failures. Mapping failures never surface here;
/// they travel inside `MappingResult`.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Schema(SchemaError),
    Seed(serde_json::Error),
    Output(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Schema(err) => write!(f, "schema error: {}", err),
            AppError::Seed(err) => write!(f, "invalid seed data: {}", err),
            AppError::Output(err) => write!(f, "failed to render output: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Schema(err) => Some(err),
            AppError::Seed(err) | AppError::Output(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SchemaError> for AppError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json")
    }

    #[test]
    fn seed_and_output_failures_are_told_apart() {
        let seed = AppError::Seed(json_error()).to_string();
        let output = AppError::Output(json_error()).to_string();

        assert!(seed.starts_with("invalid seed data: "));
        assert!(output.starts_with("failed to render output: "));
    }

    #[test]
    fn schema_errors_keep_their_source() {
        let error = AppError::from(SchemaError::Compile("bad".to_string()));
        assert_eq!(error.to_string(), "schema error: OBY schema failed to compile: bad");
        assert!(error.source().is_some());
    }
}
