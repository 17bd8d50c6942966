use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Artifact not found: {path} ({reason})")]
    ArtifactNotFound { path: String, reason: String },

    #[error("Artifact corrupt: {path} ({reason})")]
    ArtifactCorrupt { path: String, reason: String },

    #[error("Invalid input for '{field}' = {value}: {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Division by zero: '{field}' must be greater than 0")]
    DivisionByZero { field: String },

    #[error("Feature shape mismatch at {stage}: expected {expected} columns, got {actual}")]
    FeatureShapeMismatch {
        stage: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column order mismatch at {stage}: position {position} expected '{expected}', found '{found}'")]
    ColumnOrderMismatch {
        stage: String,
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' = {value}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or unreadable model files; fatal at startup
    Artifact,
    /// Bad input for a single request
    Input,
    /// Feature layout disagreement between vector and artifacts
    Contract,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PredictorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ArtifactNotFound { .. } | Self::ArtifactCorrupt { .. } => ErrorCategory::Artifact,
            Self::InvalidInput { .. } | Self::DivisionByZero { .. } => ErrorCategory::Input,
            Self::FeatureShapeMismatch { .. } | Self::ColumnOrderMismatch { .. } => {
                ErrorCategory::Contract
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Artifact | ErrorCategory::Contract | ErrorCategory::System => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Request-level errors reject a single submission; everything else halts.
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ArtifactNotFound { path, .. } => format!(
                "Make sure '{}' exists and is readable, or point --artifact-dir at the folder holding the scaler and model",
                path
            ),
            Self::ArtifactCorrupt { .. } => {
                "Re-export the fitted scaler and model to JSON and replace the artifact files".to_string()
            }
            Self::InvalidInput { field, .. } => format!("Check the value supplied for '{}'", field),
            Self::DivisionByZero { field } => {
                format!("Enter a value of at least 1 for '{}'", field)
            }
            Self::FeatureShapeMismatch { .. } | Self::ColumnOrderMismatch { .. } => {
                "The artifacts were fitted on a different feature layout; re-export them with the expected 11 columns in order".to_string()
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Artifact => format!("Could not load the prediction model: {}", self),
            ErrorCategory::Input => format!("Invalid house features: {}", self),
            ErrorCategory::Contract => format!("Internal feature layout error: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_errors_are_critical() {
        let err = PredictorError::ArtifactNotFound {
            path: "models/scaler.json".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Artifact);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.is_recoverable());
        assert!(err.recovery_suggestion().contains("models/scaler.json"));
    }

    #[test]
    fn test_input_errors_are_recoverable() {
        let err = PredictorError::DivisionByZero {
            field: "households".to_string(),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("households"));
    }

    #[test]
    fn test_shape_mismatch_is_contract_error() {
        let err = PredictorError::FeatureShapeMismatch {
            stage: "pipeline".to_string(),
            expected: 11,
            actual: 10,
        };
        assert_eq!(err.category(), ErrorCategory::Contract);
        assert_eq!(
            err.to_string(),
            "Feature shape mismatch at pipeline: expected 11 columns, got 10"
        );
    }
}
