use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    #[error("Resource not found")]
    NotFound,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("XML parsing error: {0}")]
    XmlError(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Document table not found on {0}")]
    MissingTable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Filing discovery failed for CIK {cik}: {source}")]
    Discovery {
        cik: String,
        #[source]
        source: Box<EdgarError>,
    },
}

impl EdgarError {
    /// Whether the failure happened at the transport level (connection, timeout,
    /// throttling) rather than in the content that came back.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EdgarError::RequestError(_)
                | EdgarError::Connection { .. }
                | EdgarError::RateLimitExceeded
        )
    }
}

impl From<quick_xml::Error> for EdgarError {
    fn from(error: quick_xml::Error) -> Self {
        EdgarError::XmlError(error.to_string())
    }
}

impl From<chrono::ParseError> for EdgarError {
    fn from(error: chrono::ParseError) -> Self {
        EdgarError::InvalidDate(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EdgarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let connection = EdgarError::Connection {
            url: "https://www.sec.gov".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(connection.is_transport());
        assert!(EdgarError::RateLimitExceeded.is_transport());
        assert!(!EdgarError::NotFound.is_transport());
        assert!(!EdgarError::MissingTable("x".to_string()).is_transport());
    }

    #[test]
    fn test_discovery_error_message() {
        let err = EdgarError::Discovery {
            cik: "320193".to_string(),
            source: Box::new(EdgarError::NotFound),
        };
        assert_eq!(
            err.to_string(),
            "Filing discovery failed for CIK 320193: Resource not found"
        );
    }
}
