use anyhow::{bail, Context, Result};
use catalog::{CatalogItem, CatalogKind, ItemId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::Rng;
use recommender::{state, NoMetadata, Recommendation, RecommendationFacade, RecommenderConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// ReelRecs - Title-based movie and TV recommender
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Content-based movie and TV recommendations from a title", long_about = None)]
struct Cli {
    /// Directory holding the catalog artifacts (overrides RECS_ARTIFACT_DIR)
    #[arg(short, long)]
    artifact_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend titles similar to a (possibly misspelled) title
    Recommend {
        /// Catalog to search: movie or tv
        #[arg(long, default_value = "movie")]
        kind: CatalogKind,

        /// Title to search for
        query: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the "similar" panel for a catalog item
    Similar {
        /// Catalog the item belongs to: movie or tv
        #[arg(long, default_value = "movie")]
        kind: CatalogKind,

        /// Catalog item ID
        #[arg(long)]
        id: ItemId,
    },

    /// Show which catalog title a query resolves to
    Resolve {
        /// Catalog to search: movie or tv
        #[arg(long, default_value = "movie")]
        kind: CatalogKind,

        /// Title to search for
        query: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "200")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "8")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = RecommenderConfig::from_env().context("Invalid recommender configuration")?;
    if let Some(dir) = cli.artifact_dir {
        config.artifact_dir = dir;
    }

    println!("Loading catalogs from {}...", config.artifact_dir.display());
    let start = Instant::now();
    state::load_catalogs(&config.artifact_dir)?;
    println!("{} Loaded catalogs in {:?}", "✓".green(), start.elapsed());

    let facade = RecommendationFacade::from_global(&config)?;

    match cli.command {
        Commands::Recommend { kind, query, json } => handle_recommend(&facade, kind, &query, json)?,
        Commands::Similar { kind, id } => handle_similar(&facade, kind, id).await?,
        Commands::Resolve { kind, query } => handle_resolve(&facade, kind, &query),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(facade, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    facade: &RecommendationFacade,
    kind: CatalogKind,
    query: &str,
    json: bool,
) -> Result<()> {
    let recommendation = facade.recommend(kind, query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
        return Ok(());
    }

    print_recommendation(&recommendation);
    Ok(())
}

/// Handle the 'similar' command
async fn handle_similar(facade: &RecommendationFacade, kind: CatalogKind, id: ItemId) -> Result<()> {
    let view = facade.detail(kind, id, &NoMetadata).await?;

    let Some(item) = &view.item else {
        println!("{}", format!("No {} with id {} in the catalog", kind, id).red());
        return Ok(());
    };

    println!("{}", format!("Similar to {}:", display_title(item)).bold().blue());
    print_items(&view.similar);
    Ok(())
}

/// Handle the 'resolve' command
fn handle_resolve(facade: &RecommendationFacade, kind: CatalogKind, query: &str) {
    match facade.resolve(kind, query) {
        Some(found) => println!(
            "{} {:?} -> {:?} (score {:.1})",
            "✓".green(),
            query,
            found.title,
            found.score
        ),
        None => println!("{} No {} found with that name", "✗".red(), kind),
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    facade: RecommendationFacade,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    let queries = sample_queries(facade.catalogs(), requests);
    info!("Running {} requests with concurrency {}", requests, concurrent);

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let overall = Instant::now();

    let mut handles = Vec::with_capacity(queries.len());
    for (kind, query) in queries {
        let facade = facade.clone();
        let permits = Arc::clone(&permits);
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                let recommendation = facade.recommend(kind, &query)?;
                Ok::<_, anyhow::Error>((start.elapsed(), recommendation.is_match()))
            })
            .await?
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(handles.len());
    let mut matched = 0;
    for handle in handles {
        let (elapsed, is_match) = handle.await??;
        timings.push(elapsed);
        if is_match {
            matched += 1;
        }
    }
    let wall_time = overall.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p).round() as usize];
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} matched)", requests, matched);
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Random catalog titles, some with a typo, across both catalogs
fn sample_queries(catalogs: &catalog::CatalogSet, count: usize) -> Vec<(CatalogKind, String)> {
    let mut rng = rand::rng();
    let mut queries = Vec::with_capacity(count);

    for _ in 0..count {
        let kind = CatalogKind::ALL[rng.random_range(0..CatalogKind::ALL.len())];
        let items = catalogs.get(kind).items();
        if items.is_empty() {
            queries.push((kind, String::new()));
            continue;
        }

        let mut chars: Vec<char> = items[rng.random_range(0..items.len())].title.chars().collect();
        if chars.len() > 3 && rng.random_bool(0.5) {
            let at = rng.random_range(0..chars.len() - 1);
            chars.swap(at, at + 1);
        }
        queries.push((kind, chars.into_iter().collect()));
    }
    queries
}

fn print_recommendation(recommendation: &Recommendation) {
    let Some(matched) = &recommendation.matched else {
        println!(
            "{}",
            format!("No {} found with that name", recommendation.kind).red()
        );
        return;
    };

    println!(
        "{}",
        format!(
            "Because you searched {:?} ({}):",
            recommendation.query,
            display_title(matched)
        )
        .bold()
        .blue()
    );
    print_items(&recommendation.items);
}

fn print_items(items: &[CatalogItem]) {
    if items.is_empty() {
        println!("  (no recommendations)");
        return;
    }
    for (rank, item) in items.iter().enumerate() {
        println!(
            "{}. {} {}",
            (rank + 1).to_string().green(),
            display_title(item),
            format!("[id {}]", item.id).dimmed()
        );
    }
}

fn display_title(item: &CatalogItem) -> String {
    match item.year() {
        Some(year) => format!("{} ({})", item.title, year),
        None => item.title.clone(),
    }
}
