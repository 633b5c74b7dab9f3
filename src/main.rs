use std::process::ExitCode;

mod cli;
mod runner;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::parse_cli();
    runner::run_from_cli(cli)
}
