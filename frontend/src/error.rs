use thiserror::Error;

/// Failure talking to the REST backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Mongo duplicate-key failures come back verbatim from the backend.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, ApiError::Status { message, .. } if message.contains("E11000"))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }

    /// Message to show the user, preferring what the server said.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Network(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    MalformedToken(String),

    #[error("Session expired, please log in again")]
    Expired,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date: {0:?}")]
    Invalid(String),

    #[error("Birth date cannot be in the future")]
    BirthInFuture,

    #[error("Date is out of range")]
    OutOfRange,
}

/// Client-side form check that failed before any request was sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_detection() {
        let err = ApiError::Status {
            status: 500,
            message: "E11000 duplicate key error collection: customers".into(),
        };
        assert!(err.is_duplicate_key());
        assert!(!ApiError::Network("offline".into()).is_duplicate_key());
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 400,
            message: "This account is already completed.".into(),
        };
        assert_eq!(err.user_message("Failed"), "This account is already completed.");

        let err = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message("Failed to add record"), "Failed to add record");
        assert_eq!(
            ApiError::Decode("eof".into()).user_message("Failed"),
            "Failed"
        );
    }
}
