// trello-link entry point

use clap::Parser;
use trello_link_cli::{init_logging, output::Annotations, Cli, EXIT_FAILURE};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut annotations = Annotations::stdout();
    let code = match trello_link_cli::run(&cli, &mut annotations).await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(details = %e.technical_details(), "Run failed");
            if let Err(io) = annotations.error(&e.user_message()) {
                eprintln!("{}: {}", e.user_message(), io);
            }
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}
