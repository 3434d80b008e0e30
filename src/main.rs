//! gh-issues-local CLI entry point.

use clap::Parser;

use gh_issues_local::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Serve(args) => {
            gh_issues_local::cli::commands::serve::execute(args, config_path).await
        }
        Commands::Token(args) => {
            gh_issues_local::cli::commands::token::execute(args, config_path, cli.json)
        }
    };

    if let Err(err) = result {
        gh_issues_local::cli::handle_error(err, cli.json);
    }
}
