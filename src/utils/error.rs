use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyluxError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid answer '{value}' for '{field}'")]
    InvalidAnswer { field: String, value: String },

    #[error("Assessment gate refused: {reasons}")]
    GateRefused { reasons: String },

    #[error("Assessment is not confirmed yet (current stage: {stage})")]
    NotConfirmed { stage: String },

    #[error("Input closed while waiting for {stage}")]
    InputClosed { stage: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Flow,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SkyluxError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SkyluxError::ConfigValidationError { .. }
            | SkyluxError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SkyluxError::InvalidAnswer { .. } | SkyluxError::InputClosed { .. } => {
                ErrorCategory::Input
            }
            SkyluxError::GateRefused { .. } | SkyluxError::NotConfirmed { .. } => {
                ErrorCategory::Flow
            }
            SkyluxError::CsvError(_)
            | SkyluxError::IoError(_)
            | SkyluxError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者中途離開不算失敗
            SkyluxError::InputClosed { .. } => ErrorSeverity::Low,
            SkyluxError::InvalidAnswer { .. }
            | SkyluxError::GateRefused { .. }
            | SkyluxError::NotConfirmed { .. } => ErrorSeverity::Medium,
            SkyluxError::ConfigValidationError { .. }
            | SkyluxError::InvalidConfigValueError { .. }
            | SkyluxError::CsvError(_)
            | SkyluxError::SerializationError(_) => ErrorSeverity::High,
            SkyluxError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the TOML configuration file and the language codes it declares"
            }
            ErrorCategory::Input => "Re-run the assessment and answer every question",
            ErrorCategory::Flow => {
                "Enter a booking code, accept the consent statement and confirm the flight decision"
            }
            ErrorCategory::Output => "Check that the output directory exists and is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SkyluxError::GateRefused { reasons } => {
                format!("Cannot start the assessment: {}", reasons)
            }
            SkyluxError::InputClosed { .. } => "Assessment cancelled.".to_string(),
            SkyluxError::InvalidAnswer { field, value } => {
                format!("'{}' is not a valid answer for {}", value, field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkyluxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_closed_is_low_severity() {
        let err = SkyluxError::InputClosed {
            stage: "booking code".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.user_friendly_message(), "Assessment cancelled.");
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: SkyluxError = std::io::Error::other("disk full").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("output directory"));
    }
}
