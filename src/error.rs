use reqwest::StatusCode;
use thiserror::Error;

/// All fatal errors produced by the ETL run.
///
/// Per-record validation failures are not represented here: they are
/// recovered inside the aggregation pass (the record is dropped and
/// counted). Everything below aborts the run.
#[derive(Error, Debug)]
pub enum EtlError {
    /// The remote call could not be completed at all.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Either call completed but returned a non-success status.
    #[error("{call} returned HTTP {status}")]
    TransportStatus { call: &'static str, status: StatusCode },

    /// The fetch response body was not the expected JSON document
    /// (not JSON at all, or missing the top-level `data` field).
    #[error("malformed fetch response: {0}")]
    Format(#[from] serde_json::Error),

    /// The sink accepted the request at the transport layer but signalled
    /// failure, or returned an empty or unparsable acknowledgement.
    #[error("submission not acknowledged: {0}")]
    Submission(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_status_display() {
        let err = EtlError::TransportStatus {
            call: "fetch",
            status: StatusCode::BAD_GATEWAY,
        };
        assert_eq!(err.to_string(), "fetch returned HTTP 502 Bad Gateway");
    }

    #[test]
    fn test_format_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = EtlError::Format(json_err);
        assert!(err.to_string().starts_with("malformed fetch response:"));
    }

    #[test]
    fn test_submission_display() {
        let err = EtlError::Submission("empty acknowledgement body".to_string());
        assert_eq!(
            err.to_string(),
            "submission not acknowledged: empty acknowledgement body"
        );
    }
}
