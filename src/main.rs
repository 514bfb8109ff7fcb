use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use skyward::{
    Alliance, Amenity, BudgetTier, DurationBucket, EnrichConfig, FilterSelection, RatingScorer,
    Recommendation, Recommender, Scorer, SimilarityScorer,
};

/// Recommend airlines from a review dataset.
#[derive(Debug, Parser)]
#[command(name = "skyward", version, about)]
struct Cli {
    /// Review dataset (.csv or .json).
    #[arg(long, value_name = "FILE")]
    data: PathBuf,

    /// Optional JSON file overriding the enrichment lookup tables.
    #[arg(long, value_name = "FILE")]
    enrich_config: Option<PathBuf>,

    /// Scoring strategy.
    #[arg(long, value_enum, default_value_t = Strategy::Rating)]
    strategy: Strategy,

    /// Free-text preference statement (required for --strategy similarity).
    #[arg(long)]
    query: Option<String>,

    /// Number of recommendations (1-10).
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Exact departure city filter.
    #[arg(long)]
    departure: Option<String>,

    /// Exact destination city filter.
    #[arg(long)]
    destination: Option<String>,

    /// Cabin class filter (e.g. "Economy").
    #[arg(long)]
    class: Option<String>,

    /// Traveller type filter (e.g. "Solo Leisure").
    #[arg(long)]
    traveller_type: Option<String>,

    /// Budget tier filter: cheap, mid, luxury.
    #[arg(long)]
    budget: Option<BudgetTier>,

    /// Alliance filter: star-alliance, oneworld, skyteam, none.
    #[arg(long)]
    alliance: Option<Alliance>,

    /// Flight duration filter: short, medium, long.
    #[arg(long)]
    duration: Option<DurationBucket>,

    /// Required amenities, repeatable: wifi, entertainment, legroom, lounge.
    #[arg(long = "amenity")]
    amenities: Vec<Amenity>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Rank by mean overall rating per airline.
    Rating,
    /// Rank by text similarity between reviews and --query.
    Similarity,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.enrich_config {
        Some(path) => EnrichConfig::from_json_file(path)?,
        None => EnrichConfig::default(),
    };

    let recommender = Recommender::from_path(&cli.data, &config)
        .with_context(|| format!("loading dataset {}", cli.data.display()))?;

    let selection = FilterSelection {
        departure: cli.departure,
        destination: cli.destination,
        class: cli.class,
        traveller_type: cli.traveller_type,
        budget_tier: cli.budget,
        alliance: cli.alliance,
        duration_bucket: cli.duration,
        amenities: cli.amenities.iter().copied().collect::<BTreeSet<_>>(),
    };

    let scorer: Box<dyn Scorer> = match cli.strategy {
        Strategy::Rating => Box::new(RatingScorer),
        Strategy::Similarity => {
            let query = cli.query.as_deref().unwrap_or("");
            Box::new(SimilarityScorer::new(query)?)
        }
    };

    let outcome = recommender.recommend(&selection, scorer.as_ref(), cli.top_n)?;

    match outcome {
        Recommendation::NoMatches => {
            println!("No reviews found for the selected filters.");
        }
        Recommendation::Ranked(rows) => {
            println!("Top {} recommended airlines:", rows.len());
            for (place, row) in rows.iter().enumerate() {
                let amenities = row
                    .amenities
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{:>2}. {}  score {:.3}  {} to {}  [{}]  ({})",
                    place + 1,
                    row.airline,
                    row.score,
                    row.departure,
                    row.destination,
                    row.class,
                    amenities,
                );
            }
        }
    }

    let warnings = recommender.warnings();
    if !warnings.is_empty() {
        eprintln!("\nData-quality warnings (sample):");
        for warning in warnings {
            eprintln!("  - {warning}");
        }
    }

    Ok(())
}
