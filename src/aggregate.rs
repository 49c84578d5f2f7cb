use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::records::{AggregationResult, LoginRecord};

/// Validate an email candidate, returning the trimmed address on success.
///
/// An email is accepted only if it is present, non-empty after trimming,
/// and contains both an `@` and at least one `.`. Anything else is
/// rejected; the caller drops the record rather than failing the run.
pub fn validate_email(raw: Option<&str>) -> Option<&str> {
    let email = raw?.trim();
    if email.is_empty() || !email.contains('@') || !email.contains('.') {
        return None;
    }
    Some(email)
}

/// The domain of a validated email: everything after the last `@`.
pub fn email_domain(email: &str) -> &str {
    match email.rfind('@') {
        Some(at) => &email[at + 1..],
        None => email,
    }
}

/// Parse an ISO-8601-like timestamp into UTC.
///
/// Offset-carrying forms (including the `Z` suffix) are converted to UTC.
/// Naive datetimes, `T` or space separated with optional fractional
/// seconds, are interpreted as already being UTC. Returns `None` for
/// anything else.
pub fn parse_login_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}

/// Whether a raw timestamp falls in calendar April (month 4, any year)
/// once normalized to UTC.
///
/// A missing, malformed, or unparsable timestamp is deliberately treated
/// as "not in April" rather than as an error: the record still counts
/// toward the distinct-email and domain views.
pub fn is_april_login(raw: Option<&str>) -> bool {
    raw.and_then(parse_login_date)
        .map(|dt| dt.month() == 4)
        .unwrap_or(false)
}

/// Summarize the raw record sequence in a single traversal.
///
/// Each record is validated; rejects are counted and dropped. A validated
/// email enters the distinct set, bumps its domain's distinct-user tally
/// on first sight, and enters the April set when its login timestamp
/// lands in April. The domain tally is filtered once at the end: only
/// domains with two or more distinct users are reported.
pub fn aggregate(records: &[LoginRecord]) -> AggregationResult {
    let mut result = AggregationResult::default();
    let mut domain_tally: BTreeMap<String, u32> = BTreeMap::new();

    for record in records {
        let email = match validate_email(record.email.as_deref()) {
            Some(email) => email,
            None => {
                result.records_dropped += 1;
                debug!(
                    action = "drop",
                    component = "aggregation",
                    email = ?record.email,
                    "Record failed email validation"
                );
                continue;
            }
        };

        if result.distinct_emails.insert(email.to_string()) {
            *domain_tally.entry(email_domain(email).to_string()).or_insert(0) += 1;
        }

        if is_april_login(record.login_date.as_deref()) {
            result.april_emails.insert(email.to_string());
        }
    }

    result.domain_counts = domain_tally.into_iter().filter(|(_, n)| *n >= 2).collect();

    info!(
        action = "complete",
        component = "aggregation",
        distinct_emails = result.distinct_emails.len(),
        shared_domains = result.domain_counts.len(),
        april_emails = result.april_emails.len(),
        records_dropped = result.records_dropped,
        "Aggregation completed"
    );

    result
}
