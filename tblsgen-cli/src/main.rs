//! tblsgen CLI - Command-line interface for generating tbls schema documents.

use clap::Parser;

use tblsgen_cli::cli::{Cli, Command};
use tblsgen_cli::commands;
use tblsgen_cli::error::CliResult;
use tblsgen_cli::{logging, output};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Generate(args) => commands::generate::run(args, cli.config).await,
        Command::Check(args) => commands::check::run(args, cli.config).await,
        Command::Init(args) => commands::init::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
