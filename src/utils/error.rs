use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectorError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Rendering error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProjectorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProjectorError::ConfigValidationError { .. }
            | ProjectorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ProjectorError::InvalidConfigValueError { .. } => ErrorCategory::Input,
            ProjectorError::ZipError(_)
            | ProjectorError::CsvError(_)
            | ProjectorError::IoError(_)
            | ProjectorError::SerializationError(_) => ErrorCategory::Output,
            ProjectorError::RenderError { .. } => ErrorCategory::Rendering,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProjectorError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
            ProjectorError::ConfigValidationError { .. }
            | ProjectorError::MissingConfigError { .. }
            | ProjectorError::RenderError { .. } => ErrorSeverity::High,
            ProjectorError::ZipError(_)
            | ProjectorError::CsvError(_)
            | ProjectorError::SerializationError(_) => ErrorSeverity::High,
            ProjectorError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ProjectorError::InvalidConfigValueError { field, .. } => {
                format!("Check the value given for '{}' and try again", field)
            }
            ProjectorError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file", field)
            }
            ProjectorError::ConfigValidationError { .. } => {
                "Make sure the configuration file is valid TOML with a [[scenarios]] table".to_string()
            }
            ProjectorError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            ProjectorError::ZipError(_)
            | ProjectorError::CsvError(_)
            | ProjectorError::SerializationError(_) => {
                "Try a different output format or output path".to_string()
            }
            ProjectorError::RenderError { .. } => {
                "Re-run with --verbose to see the chart frame that failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("設定錯誤: {}", self),
            ErrorCategory::Input => format!("輸入值錯誤: {}", self),
            ErrorCategory::Output => format!("輸出失敗: {}", self),
            ErrorCategory::Rendering => format!("圖表產生失敗: {}", self),
        }
    }

    /// 依嚴重程度決定 CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectorError>;
