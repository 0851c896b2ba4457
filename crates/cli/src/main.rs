use std::process::ExitCode;

use clap::Parser;

use stockledger_cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    stockledger_observability::init();

    let cli = Cli::parse();
    if stockledger_cli::run(cli)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
