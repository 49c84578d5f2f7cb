use anyhow::Result;
use clap::Parser;
use tracing::error;

use logintally::{pipeline, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    match pipeline::run_etl(&args) {
        Ok(result) => {
            pipeline::print_summary(&result, &args);
            Ok(())
        }
        Err(e) => {
            error!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
