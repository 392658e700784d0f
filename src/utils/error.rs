use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuyerError {
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("API error during login. Code: {code}, Message: {message}")]
    AuthenticationError { code: i64, message: String },

    #[error("API error while fetching account info. Code: {code}, Message: {message}")]
    AccountInfoError { code: i64, message: String },

    #[error("API error during domain check of {domain}. Code: {code}, Message: {message}")]
    DomainCheckError {
        domain: String,
        code: i64,
        message: String,
    },

    #[error("Failed to purchase domain {domain}. Code: {code}, Message: {message}")]
    PurchaseRejected {
        domain: String,
        code: i64,
        message: String,
    },

    #[error("Unexpected registrar response during {operation}: {message}")]
    ProtocolError { operation: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Remote,
    Network,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BuyerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BuyerError::MissingConfigError { .. } | BuyerError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            BuyerError::AuthenticationError { .. }
            | BuyerError::AccountInfoError { .. }
            | BuyerError::DomainCheckError { .. }
            | BuyerError::PurchaseRejected { .. }
            | BuyerError::ProtocolError { .. } => ErrorCategory::Remote,
            BuyerError::TransportError(_) => ErrorCategory::Network,
            BuyerError::IoError(_) | BuyerError::SerializationError(_) => ErrorCategory::Local,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BuyerError::PurchaseRejected { .. } => ErrorSeverity::Low,
            BuyerError::TransportError(_) => ErrorSeverity::Medium,
            BuyerError::AuthenticationError { .. }
            | BuyerError::AccountInfoError { .. }
            | BuyerError::DomainCheckError { .. }
            | BuyerError::ProtocolError { .. }
            | BuyerError::SerializationError(_) => ErrorSeverity::High,
            BuyerError::MissingConfigError { .. }
            | BuyerError::InvalidConfigValueError { .. }
            | BuyerError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BuyerError::MissingConfigError { .. } => {
                "Set the missing value in the environment, in .env, or on the command line"
            }
            BuyerError::InvalidConfigValueError { .. } => "Correct the configuration value and retry",
            BuyerError::AuthenticationError { .. } => {
                "Check the account username and password, and whether the account requires 2FA"
            }
            BuyerError::AccountInfoError { .. } => {
                "Make sure the account has default contacts configured"
            }
            BuyerError::DomainCheckError { .. } => {
                "Check the domain name in the list, or rerun with --on-check-error skip"
            }
            BuyerError::PurchaseRejected { .. } => "Review the registrar message for this domain",
            BuyerError::TransportError(_) => "Check network connectivity and the API URL, then retry",
            BuyerError::ProtocolError { .. } => "Verify that --api-url points at a Domrobot JSON-RPC endpoint",
            BuyerError::IoError(_) => "Check that the domain list and log file paths are accessible",
            BuyerError::SerializationError(_) => "Report the registrar response that could not be parsed",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BuyerError::MissingConfigError { field } => {
                format!("Configuration value '{}' is not set", field)
            }
            BuyerError::AuthenticationError { code, message } => {
                format!("Login rejected by the registrar ({}: {})", code, message)
            }
            BuyerError::AccountInfoError { code, message } => {
                format!("Could not load account defaults ({}: {})", code, message)
            }
            BuyerError::DomainCheckError { domain, code, message } => {
                format!("Availability check failed for {} ({}: {})", domain, code, message)
            }
            BuyerError::TransportError(e) => format!("Could not reach the registrar: {}", e),
            other => other.to_string(),
        }
    }

    pub(crate) fn protocol(operation: &str, message: impl Into<String>) -> Self {
        BuyerError::ProtocolError {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuyerError>;
