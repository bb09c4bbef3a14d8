pub mod artifact;
pub mod builds;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod listing;
pub mod logger;
pub mod output;
pub mod resolver;

use anyhow::Context;
use cli::Cli;
use logger::Logger;
use resolver::{Resolver, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_lenient(std::env::args_os());
    Logger::init(cli.verbose);
    for arg in &cli.ignored {
        log::debug!("Ignoring argument {}", arg);
    }

    // The only fatal failure: without a repo list there's nothing to do.
    let entries = config::load(&cli.config)
        .with_context(|| format!("Cannot load config {}", cli.config))?;
    log::debug!("Loaded {} repos from {}", entries.len(), cli.config);

    let resolver = Resolver::new(Settings {
        api_url: cli.api_url,
        download_url: cli.download_url,
        target: cli.target,
        extension: cli.extension,
    });
    let links = resolver.resolve_all(&entries).await;

    let rendered = output::render(&links, cli.json)?;
    if cli.json {
        println!("{}", rendered);
    } else {
        print!("{}", rendered);
    }

    Ok(())
}
