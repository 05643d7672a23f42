mod args;

use crate::args::Args;
use anyhow::Result;
use clap::Parser;
use randr_client::{run, Options};
use std::io;
use std::process::ExitCode;
use tracing::debug;

fn init_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("randrctl={log_level},randr_client={log_level}").into()
            }),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // clap renders the usage synopsis; -h/--help go to stdout and
            // exit cleanly, every usage violation exits 1
            let is_help = !err.use_stderr();
            let _ = err.print();
            return if is_help {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            };
        }
    };

    if let Err(err) = try_main(args) {
        eprintln!("{err}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn try_main(args: Args) -> Result<()> {
    init_logging(args.verbose)?;

    let options = Options::from(args);
    debug!("options: {options:?}");

    run(&options, &mut io::stdout().lock())?;
    Ok(())
}
