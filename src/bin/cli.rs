//! pagefeed CLI
//!
//! Seeds the store from a TOML file, then runs the update scheduler for
//! the lifetime of the process. The `extract` subcommand is a one-shot
//! probe for authoring rules against a live page.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use pagefeed::{
    error::Result,
    extract,
    fetch::{ContentFetcher, HttpFetcher},
    models::{Config, Rule, Seed},
    scheduler::UpdateScheduler,
    storage::{ChannelStore, MemoryStore},
};

/// pagefeed - rule-driven page watcher
#[derive(Parser, Debug)]
#[command(
    name = "pagefeed",
    version,
    about = "Polls web pages and extracts structured feed items"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed sources and run the update scheduler until stopped
    Run {
        /// Path to the seed file listing initial sources
        #[arg(long, default_value = "data/seeds.toml")]
        seed: PathBuf,
    },

    /// Fetch one page and print the items a rule extracts from it
    Extract {
        /// Address of the page to fetch
        address: String,

        /// Pattern locating each item segment
        #[arg(long)]
        item: String,

        /// Pattern for the title within a segment
        #[arg(long)]
        title: String,

        /// Pattern for the link within a segment
        #[arg(long)]
        link: String,

        /// Pattern for the description within a segment
        #[arg(long)]
        description: String,
    },

    /// Validate configuration and seed files
    Validate {
        /// Path to the seed file listing initial sources
        #[arg(long, default_value = "data/seeds.toml")]
        seed: PathBuf,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Run { seed } => {
            config.validate()?;
            let seed = Seed::load_or_default(&seed);
            seed.validate()?;

            let store: Arc<dyn ChannelStore> = Arc::new(MemoryStore::new());
            let fetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
            let scheduler = Arc::new(UpdateScheduler::new(
                Arc::clone(&store),
                fetcher,
                config.scheduler.clone(),
            ));

            for entry in &seed.sources {
                match store.create_source(entry.to_new_source()).await {
                    Ok(source) => {
                        log::info!("created source {} ({})", source.id, source.name);
                        scheduler.spawn_refresh(source.id);
                    }
                    Err(e) => log::error!("creating source {} failed: {}", entry.name, e),
                }
            }

            log::info!("starting update scheduler");
            scheduler.run().await;
        }

        Command::Extract {
            address,
            item,
            title,
            link,
            description,
        } => {
            let rule = Rule {
                item_pattern: item,
                title_pattern: title,
                link_pattern: link,
                description_pattern: description,
            };
            let compiled = rule.compile()?;

            let fetcher = HttpFetcher::new(&config.fetch)?;
            let content = fetcher.fetch(&address).await?;
            let items = extract::extract(&content, &compiled)?;

            println!("{}", serde_json::to_string_pretty(&items)?);
        }

        Command::Validate { seed } => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            let seed = Seed::load(&seed)?;
            if let Err(e) = seed.validate() {
                log::error!("Seed validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Seed OK ({} sources)", seed.sources.len());

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
