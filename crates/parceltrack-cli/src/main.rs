use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parceltrack_cli::Cli::parse();
    match parceltrack_cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "command failed");
            eprintln!("{error}");
            ExitCode::from(error.exit_code())
        }
    }
}
