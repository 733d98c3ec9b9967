use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Catalog request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Catalog,
    Export,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortfolioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortfolioError::ConfigError { .. }
            | PortfolioError::InvalidConfigValueError { .. }
            | PortfolioError::UrlError(_) => ErrorCategory::Configuration,
            PortfolioError::HttpError(_) | PortfolioError::CatalogError { .. } => {
                ErrorCategory::Catalog
            }
            PortfolioError::ZipError(_)
            | PortfolioError::CsvError(_)
            | PortfolioError::SerializationError(_) => ErrorCategory::Export,
            PortfolioError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PortfolioError::HttpError(_) => ErrorSeverity::Medium,
            PortfolioError::ConfigError { .. }
            | PortfolioError::InvalidConfigValueError { .. }
            | PortfolioError::UrlError(_)
            | PortfolioError::CatalogError { .. }
            | PortfolioError::CsvError(_)
            | PortfolioError::SerializationError(_) => ErrorSeverity::High,
            PortfolioError::ZipError(_) | PortfolioError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the config file and command-line flags",
            ErrorCategory::Catalog => {
                "Check the catalog source, or fall back to the builtin catalog"
            }
            ErrorCategory::Export => "Check the output directory and retry the export",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PortfolioError::ConfigError { message } => format!("Invalid configuration: {}", message),
            PortfolioError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            PortfolioError::CatalogError { message } => {
                format!("Could not load the catalog: {}", message)
            }
            PortfolioError::HttpError(_) => "Could not reach the catalog endpoint".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
