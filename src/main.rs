mod args;
mod election;

use clap::Parser;
use log::{debug, info};
use snafu::ErrorCompat;
use std::error::Error;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    debug!("args: {:?}", args);

    match election::run_election(&args) {
        Ok(_) => {
            info!("Election completed");
        }
        Err(e) => {
            eprintln!("An error occured: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            if let Some(bt) = ErrorCompat::backtrace(e.as_ref()) {
                eprintln!("trace: {}", bt);
            }
            std::process::exit(1);
        }
    }
}
