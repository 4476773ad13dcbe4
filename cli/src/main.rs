//! Command-line interface for Folio pagination.
//!
//! This CLI tool provides:
//! - window: Fetch a paginated window from a running server
//! - links: Render pagination controls offline
//! - classify: Classify an address against a page address offline
//! - tags: Print pagination tag documentation
//!
//! Configuration via environment:
//! - FOLIO_URL: Base URL of the folio server (default: http://localhost:3000)

mod commands;

use clap::{Parser, Subcommand};

use commands::{classify::ClassifyArgs, links::LinksArgs, tags::TagsArgs, window::WindowArgs};

/// Folio pagination CLI
///
/// Output is JSON unless --human is given.
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Folio server URL
    #[arg(
        long,
        env = "FOLIO_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the paginated window of a page from the server
    Window(WindowArgs),

    /// Render pagination controls without a server
    Links(LinksArgs),

    /// Classify an address against a page address
    Classify(ClassifyArgs),

    /// Show pagination tag documentation
    Tags(TagsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Window(args) => match commands::build_client() {
            Ok(client) => commands::window::execute(&client, &cli.url, cli.human, args).await,
            Err(e) => Err(e),
        },
        Commands::Links(args) => commands::links::execute(cli.human, args),
        Commands::Classify(args) => commands::classify::execute(cli.human, args),
        Commands::Tags(args) => commands::tags::execute(cli.human, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
