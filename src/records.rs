use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One raw login record as served by the endpoint.
///
/// Both fields tolerate absence and `null`: the source is best-effort and
/// validation happens during aggregation, not during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRecord {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub login_date: Option<String>,
}

/// Top-level shape of the fetch response. Only `data` is read; any sibling
/// fields the endpoint may add are ignored.
#[derive(Debug, Deserialize)]
pub struct FetchResponse {
    pub data: Vec<LoginRecord>,
}

/// The three derived views produced by one aggregation pass, plus a
/// dropped-record counter kept for the run summary.
///
/// Ordered containers so that output and the submission payload are
/// deterministic for a given input.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AggregationResult {
    /// Validated emails, deduplicated by exact string match.
    pub distinct_emails: BTreeSet<String>,
    /// Domains shared by at least two distinct emails, with the number of
    /// distinct emails on each. Single-user domains are absent entirely.
    pub domain_counts: BTreeMap<String, u32>,
    /// Emails whose login timestamp fell in calendar April (UTC).
    /// Always a subset of `distinct_emails`.
    pub april_emails: BTreeSet<String>,
    /// Records discarded by email validation. Reported, never fatal.
    pub records_dropped: u32,
}

/// The outbound payload POSTed back to the endpoint.
#[derive(Debug, Serialize)]
pub struct SubmissionPayload {
    pub your_email_address: String,
    pub unique_emails: Vec<String>,
    pub user_domain_counts: BTreeMap<String, u32>,
    pub april_emails: Vec<String>,
}

impl SubmissionPayload {
    pub fn new(your_email: &str, result: &AggregationResult) -> Self {
        Self {
            your_email_address: your_email.to_string(),
            unique_emails: result.distinct_emails.iter().cloned().collect(),
            user_domain_counts: result.domain_counts.clone(),
            april_emails: result.april_emails.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_response_ignores_extra_fields() {
        let body = r#"{"data": [{"email": "a@x.com", "login_date": null}], "status": "ok"}"#;
        let parsed: FetchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].email.as_deref(), Some("a@x.com"));
        assert_eq!(parsed.data[0].login_date, None);
    }

    #[test]
    fn test_fetch_response_requires_data_field() {
        let body = r#"{"records": []}"#;
        assert!(serde_json::from_str::<FetchResponse>(body).is_err());
    }

    #[test]
    fn test_login_record_tolerates_missing_fields() {
        let parsed: FetchResponse = serde_json::from_str(r#"{"data": [{}]}"#).unwrap();
        assert_eq!(parsed.data[0].email, None);
        assert_eq!(parsed.data[0].login_date, None);
    }

    #[test]
    fn test_payload_field_names_and_order() {
        let mut result = AggregationResult::default();
        result.distinct_emails.insert("b@x.com".to_string());
        result.distinct_emails.insert("a@x.com".to_string());
        result.domain_counts.insert("x.com".to_string(), 2);
        result.april_emails.insert("a@x.com".to_string());

        let payload = SubmissionPayload::new("me@example.com", &result);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["your_email_address"], "me@example.com");
        assert_eq!(
            json["unique_emails"],
            serde_json::json!(["a@x.com", "b@x.com"])
        );
        assert_eq!(json["user_domain_counts"], serde_json::json!({"x.com": 2}));
        assert_eq!(json["april_emails"], serde_json::json!(["a@x.com"]));
    }

    #[test]
    fn test_empty_result_serializes_to_empty_collections() {
        let payload = SubmissionPayload::new("me@example.com", &AggregationResult::default());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["unique_emails"], serde_json::json!([]));
        assert_eq!(json["user_domain_counts"], serde_json::json!({}));
        assert_eq!(json["april_emails"], serde_json::json!([]));
    }
}
