// Switchyard CLI entry point

use clap::Parser;
use switchyard_cli::{logging, output, Cli, CommandRouter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    if let Err(e) = CommandRouter::execute(cli).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
