mod lookup;
mod site;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use consign_core::Category;
use consign_index::{load_index, SortOrder};
use consign_site::SiteUrls;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "consign-cli")]
#[command(about = "Consignment store directory command line interface")]
struct Cli {
    /// Store table to read instead of `CONSIGN_DATA_PATH`
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Per-state store and city counts
    Stats {
        /// Top stores to list per state
        #[arg(long, default_value = "3")]
        top: usize,
    },
    /// List every state with stores
    States,
    /// List the cities of a state
    Cities {
        /// State name or slug (e.g. "New York" or new-york)
        state: String,
    },
    /// List the stores of a state or city
    Stores {
        /// State name or slug
        #[arg(long)]
        state: String,
        /// City name or slug within the state
        #[arg(long)]
        city: Option<String>,
        /// Sort order (reviews-desc, reviews-asc, name-asc, name-desc, city-asc)
        #[arg(long, default_value = "reviews-desc")]
        sort: SortOrder,
        /// Keep stores carrying any of these categories
        #[arg(long = "category")]
        categories: Vec<Category>,
        /// Keep stores in any of these cities (exact names)
        #[arg(long = "filter-city")]
        filter_cities: Vec<String>,
        /// Minimum review count
        #[arg(long, default_value = "0")]
        min_reviews: u32,
    },
    /// Search store, city and state names
    Search {
        query: String,
    },
    /// Render sitemap.xml
    Sitemap {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write every page payload as JSON under a directory
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = consign_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("consign-cli: no command given; see --help");
        return Ok(());
    };

    let data_path = cli.data.unwrap_or_else(|| config.data_path.clone());
    let index = load_index(&data_path);
    let urls = SiteUrls::from_config(&config);

    match command {
        Commands::Stats { top } => lookup::run_stats(&index, top),
        Commands::States => lookup::run_states(&index),
        Commands::Cities { state } => lookup::run_cities(&index, &state),
        Commands::Stores {
            state,
            city,
            sort,
            categories,
            filter_cities,
            min_reviews,
        } => lookup::run_stores(
            &index,
            &lookup::StoreSelection {
                state,
                city,
                sort,
                categories,
                filter_cities,
                min_reviews,
            },
        ),
        Commands::Search { query } => lookup::run_search(&index, &query),
        Commands::Sitemap { out } => site::run_sitemap(&index, &urls, out.as_deref())?,
        Commands::Export { out } => {
            site::run_export(&index, &urls, config.nearby_cities_limit, &out)?;
        }
    }

    Ok(())
}
