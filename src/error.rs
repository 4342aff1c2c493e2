use rust_decimal::Decimal;
use thiserror::Error;

/// Broad category of a failed call to the marketplace API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The request never produced a readable response.
    Network,
    /// The server answered with a 5xx status.
    Server,
    /// The server refused the request (any other non-success status).
    Rejected,
}

impl RemoteErrorKind {
    pub fn from_status(status: u16) -> Self {
        if status >= 500 {
            RemoteErrorKind::Server
        } else {
            RemoteErrorKind::Rejected
        }
    }
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Please enter a valid amount")]
    InvalidAmount,
    #[error("Amount cannot exceed contract balance")]
    ExceedsBalance { amount: Decimal, balance: Decimal },
    #[error("Description cannot exceed {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("No funds available in contract balance")]
    NoBalance,
    #[error("The payment request form is not open")]
    FormClosed,
    #[error("A payment request is already being submitted")]
    SubmissionInFlight,
    #[error("You must be signed in to request a payment")]
    Unauthenticated,
    #[error("{message}")]
    RemoteFailure {
        kind: RemoteErrorKind,
        status: Option<u16>,
        message: String,
    },
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PaymentError {
    pub const NETWORK_MESSAGE: &'static str =
        "Network error. Please check your internet connection.";

    pub fn network() -> Self {
        PaymentError::RemoteFailure {
            kind: RemoteErrorKind::Network,
            status: None,
            message: Self::NETWORK_MESSAGE.to_string(),
        }
    }

    /// True for errors caught before anything was sent over the network.
    pub fn is_local(&self) -> bool {
        !matches!(self, PaymentError::RemoteFailure { .. })
    }
}

impl From<url::ParseError> for PaymentError {
    fn from(err: url::ParseError) -> Self {
        PaymentError::ConfigError(format!("invalid API URL: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
