use clap::Parser;
use url::Url;

const DEFAULT_ENDPOINT: &str =
    "https://us-central1-marcy-playground.cloudfunctions.net/ordoroCodingTest";

#[derive(Parser, Debug)]
#[command(
    name = "logintally",
    about = "Fetch login records, summarize distinct users per domain and April logins, and submit the report",
    version,
    long_about = None
)]
pub struct Args {
    /// Endpoint serving the login records and receiving the report
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Email address identifying the submitter in the report
    #[arg(short, long, default_value = "jessereitz1@gmail.com")]
    pub your_email: String,

    /// Request timeout in seconds, applied to both calls
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Fetch and summarize without submitting the report
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
