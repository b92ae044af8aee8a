use anyhow::Result;
use clap::{Parser, Subcommand};

/// myfridge - recipe corpus maintenance tools
#[derive(Parser)]
#[command(name = "myfridge")]
#[command(about = "Recipe corpus matching, deduplication and scoring", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Recipe store location (overrides config file)
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge near-duplicate recipes, keeping the best version of each
    Dedup {
        /// Skip the confirmation prompt before writing back
        #[arg(long)]
        yes: bool,
    },
    /// Recompute popularity scores from external demand signals
    ScorePopularity {
        /// Score at most this many records this run
        #[arg(long)]
        limit: Option<usize>,

        /// Resume from an existing checkpoint instead of starting fresh
        #[arg(long)]
        resume: bool,

        /// Skip the confirmation prompt before writing back
        #[arg(long)]
        yes: bool,

        /// Curated signal table (JSON); neutral signals when omitted
        #[arg(long)]
        signals: Option<String>,
    },
    /// Audit ingredient classification across the corpus
    Audit {
        /// Rows per report section
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },
    /// Rank recipes against a list of available ingredients
    Match {
        /// Ingredient to match; repeatable
        #[arg(long = "ingredient", required_unless_present = "inventory")]
        ingredients: Vec<String>,

        /// Inventory summary document (JSON); non-expired item names are
        /// added to the query
        #[arg(long)]
        inventory: Option<String>,

        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = myfridge::config::Config::load(cli.config.clone())?;
    if let Some(store_path) = cli.store {
        config.store.path = store_path;
    }
    config.validate().map_err(myfridge::error::AppError::Config)?;

    myfridge::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Dedup { yes } => myfridge::cli::dedup::run(config, yes).await?,
        Commands::ScorePopularity {
            limit,
            resume,
            yes,
            signals,
        } => myfridge::cli::score::run(config, limit, resume, yes, signals).await?,
        Commands::Audit { limit } => myfridge::cli::audit::run(config, limit).await?,
        Commands::Match {
            ingredients,
            inventory,
            limit,
        } => myfridge::cli::matching::run(config, ingredients, inventory, limit).await?,
    }

    Ok(())
}
