use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF generation failed: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("{service} responded with status {status}: {message}")]
    ServiceError {
        service: String,
        status: u16,
        message: String,
    },

    #[error("Unexpected response from {service}: {message}")]
    UnexpectedResponse { service: String, message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Rendering,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ApiError(_)
            | ReportError::ServiceError { .. }
            | ReportError::UnexpectedResponse { .. } => ErrorCategory::Network,
            ReportError::PdfError(_) | ReportError::TemplateError { .. } => {
                ErrorCategory::Rendering
            }
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ReportError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遠端服務暫時性錯誤，稍後重跑可能成功
            ReportError::ApiError(_) => ErrorSeverity::Medium,
            ReportError::ServiceError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            ReportError::ServiceError { .. }
            | ReportError::UnexpectedResponse { .. }
            | ReportError::TemplateError { .. }
            | ReportError::PdfError(_)
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ReportError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::ApiError(_) => {
                "Check your network connection and that the service endpoints are reachable"
                    .to_string()
            }
            ReportError::ServiceError { status: 429, .. } => {
                "The translation service is rate limited; wait a while or pass --api-key"
                    .to_string()
            }
            ReportError::ServiceError { service, .. } => {
                format!("Verify the {} endpoint and try again later", service)
            }
            ReportError::UnexpectedResponse { service, .. } => {
                format!("Make sure the {} endpoint points at a compatible API", service)
            }
            ReportError::TemplateError { .. } => {
                "Check the report template for unknown or misspelled {{ placeholders }}"
                    .to_string()
            }
            ReportError::PdfError(_) => "Re-run with --verbose to inspect the PDF step".to_string(),
            ReportError::IoError(_) => {
                "Make sure the output directory exists and is writable".to_string()
            }
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file".to_string()
            }
        }
    }

    /// 依嚴重程度決定的程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch report data: {}", self),
            ErrorCategory::Rendering => format!("Could not render the report: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Io => format!("Could not write the report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
