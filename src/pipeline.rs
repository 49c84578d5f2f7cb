use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tracing::info;

use crate::client::ApiClient;
use crate::records::{AggregationResult, SubmissionPayload};
use crate::{aggregate, Args};

/// Run the full pipeline: fetch, aggregate, submit.
///
/// Strictly sequential. The fetch completes before aggregation starts and
/// aggregation completes before submission starts; the run either finishes
/// and submits, or fails without retry. With `--dry-run` the submission
/// step is skipped and the run still counts as successful.
pub fn run_etl(args: &Args) -> Result<AggregationResult> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "pipeline", "Starting login-record ETL run");

    let client = ApiClient::new(args.endpoint.clone(), Duration::from_secs(args.timeout))
        .context("Failed to build HTTP client")?;

    let records = client.fetch_login_records()?;
    let result = aggregate::aggregate(&records);

    if args.dry_run {
        info!(action = "skip", component = "pipeline", "Dry run, not submitting the report");
    } else {
        let payload = SubmissionPayload::new(&args.your_email, &result);
        client.submit_report(&payload)?;
    }

    info!(
        action = "complete",
        component = "pipeline",
        duration_ms = total_start_time.elapsed().as_millis(),
        "ETL run completed"
    );
    Ok(result)
}

pub fn print_summary(result: &AggregationResult, args: &Args) {
    println!("\n--- Login Record Summary ---");
    println!(
        "Distinct emails: {}",
        crate::utils::format_number(result.distinct_emails.len() as u32)
    );
    println!(
        "Records dropped (invalid email): {}",
        crate::utils::format_number(result.records_dropped)
    );
    println!(
        "April logins: {}",
        crate::utils::format_number(result.april_emails.len() as u32)
    );

    if result.domain_counts.is_empty() {
        println!("No domain is shared by more than one user");
    } else {
        println!("\nDomains with more than one user:");
        // Largest domains first; ties resolve in domain order.
        let mut sorted_domains: Vec<(&String, &u32)> = result.domain_counts.iter().collect();
        sorted_domains.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (domain, count) in sorted_domains {
            println!("- {}: {} users", domain, crate::utils::format_number(*count));
        }
    }

    if args.dry_run {
        let payload = SubmissionPayload::new(&args.your_email, result);
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("\nPayload that would have been submitted:\n{}", json),
            Err(e) => println!("\nCould not render payload: {}", e),
        }
    }
}
