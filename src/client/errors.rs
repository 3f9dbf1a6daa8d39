use std::fmt;

/// Transport-level failures shared by every feature client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// HTTP status when the backend answered with a non-success code.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn http_error_display_includes_status() {
        let err = AppError::Http {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (401): unauthorized");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn non_http_errors_have_no_status() {
        assert_eq!(AppError::Timeout("slow".to_string()).status(), None);
        assert_eq!(
            AppError::Config("missing".to_string()).to_string(),
            "Config error: missing"
        );
    }
}
