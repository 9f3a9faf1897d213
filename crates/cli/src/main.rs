use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

use catalog::{CatalogIndex, CatalogProvider, CuisineFilter, DishDetail};
use scoring::{IngredientAffinity, IngredientMatch, ScoringEngine};
use server::ServerConfig;
use session::{BatchSampler, SessionManager, UserId};

mod simulation;

use simulation::{run_session, SimulatedSession, SwipeOdds};

const DEFAULT_CATALOG: &str = "data/catalog.json";

/// Dish Swipe - swipe through dishes, get recommendations
#[derive(Parser)]
#[command(name = "dish-swipe")]
#[command(about = "Swipe-session dish recommender", long_about = None)]
struct Cli {
    /// Path to the catalog JSON file
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (other settings come from DISH_SWIPE_* variables)
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Path to the bearer token table
        #[arg(long)]
        tokens: Option<PathBuf>,
    },

    /// List cuisines with their dish counts
    Cuisines,

    /// Swipe through one session at random and show the recommendations
    Simulate {
        /// Cuisine to draw dishes from (default: all)
        #[arg(long)]
        cuisine: Option<String>,

        /// Seed for reproducible batches and swipes
        #[arg(long)]
        seed: Option<u64>,

        /// Ingredient matching mode: name or literal
        #[arg(long, default_value = "name")]
        matching: IngredientMatch,

        /// Show the swipe history and how each result was scored
        #[arg(long)]
        explain: bool,
    },

    /// Run many simulated sessions concurrently
    Benchmark {
        /// Number of simulated users
        #[arg(long, default_value = "1000")]
        users: usize,

        /// Number of sessions in flight at once
        #[arg(long, default_value = "32")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let catalog = || {
        load_catalog(
            cli.catalog
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_CATALOG)),
        )
    };

    // Dispatch to appropriate command handler
    match cli.command {
        // The server loads its own state
        Commands::Serve { port, tokens } => {
            handle_serve(cli.catalog.clone(), port, tokens).await?
        }
        Commands::Cuisines => handle_cuisines(catalog()?)?,
        Commands::Simulate {
            cuisine,
            seed,
            matching,
            explain,
        } => handle_simulate(catalog()?, cuisine, seed, matching, explain).await?,
        Commands::Benchmark { users, concurrent } => {
            handle_benchmark(catalog()?, users, concurrent).await?
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<Arc<CatalogIndex>> {
    info!("Loading catalog from {}", path.display());
    let start = Instant::now();
    let catalog = Arc::new(
        CatalogIndex::load_from_file(path).context("Failed to load dish catalog")?,
    );
    let (cuisines, ingredients, dishes) = catalog.counts();
    info!(
        "Loaded {} dishes, {} cuisines, {} ingredients in {:?}",
        dishes,
        cuisines,
        ingredients,
        start.elapsed()
    );
    Ok(catalog)
}

/// Handle the 'serve' command
async fn handle_serve(
    catalog: Option<PathBuf>,
    port: Option<u16>,
    tokens: Option<PathBuf>,
) -> Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(catalog) = catalog {
        config = config.with_catalog_path(catalog);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(tokens) = tokens {
        config = config.with_tokens_path(tokens);
    }

    server::start_server(config).await
}

/// Handle the 'cuisines' command
fn handle_cuisines(catalog: Arc<CatalogIndex>) -> Result<()> {
    println!("{}", "Cuisines:".bold().blue());
    for cuisine in catalog.cuisines()? {
        let filter = CuisineFilter::Named(cuisine.name.clone());
        let count = catalog.fetch_dishes_by_cuisine(&filter)?.len();
        println!(
            "{}{:>4}  {} ({} dishes)",
            "• ".green(),
            cuisine.id,
            cuisine.name,
            count
        );
    }
    println!(
        "{}      all ({} dishes)",
        "• ".cyan(),
        catalog.all_dishes().len()
    );
    Ok(())
}

/// Handle the 'simulate' command
async fn handle_simulate(
    catalog: Arc<CatalogIndex>,
    cuisine: Option<String>,
    seed: Option<u64>,
    matching: IngredientMatch,
    explain: bool,
) -> Result<()> {
    let filter = CuisineFilter::parse(cuisine.as_deref());
    let sampler = seed.map_or_else(BatchSampler::entropy, BatchSampler::seeded);
    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let manager = SessionManager::new(catalog)
        .with_sampler(sampler)
        .with_engine(ScoringEngine::new().with_matching(matching));

    let user = UserId::from("simulated-user");
    let session = tokio::task::spawn_blocking(move || {
        run_session(&manager, &user, &filter, SwipeOdds::default(), &mut rng)
    })
    .await
    .context("Simulation task panicked")??;

    println!(
        "{}",
        format!(
            "Session finished after {} rounds ({} swipes)",
            session.rounds,
            session.swipe_count()
        )
        .bold()
        .blue()
    );
    if explain {
        print_history(&session);
    }
    print_recommendations(&session, matching, explain);
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    catalog: Arc<CatalogIndex>,
    users: usize,
    concurrent: usize,
) -> Result<()> {
    let manager = SessionManager::new(catalog);
    info!("Running {users} simulated sessions, {concurrent} at a time");
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    let start = Instant::now();
    let mut handles = Vec::with_capacity(users);
    for i in 0..users {
        let manager = manager.clone();
        let permits = Arc::clone(&permits);
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let elapsed = tokio::task::spawn_blocking(move || {
                let user = UserId::new(format!("bench-user-{i}"));
                let mut rng = StdRng::from_os_rng();
                let started = Instant::now();
                run_session(&manager, &user, &CuisineFilter::All, SwipeOdds::default(), &mut rng)?;
                Ok::<_, anyhow::Error>(started.elapsed())
            })
            .await??;
            Ok::<Duration, anyhow::Error>(elapsed)
        }));
    }

    let mut timings = Vec::with_capacity(users);
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = start.elapsed();

    if timings.is_empty() {
        println!("No sessions run");
        return Ok(());
    }

    timings.sort();
    let sum: Duration = timings.iter().sum();
    let avg_latency = sum / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = users as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Sessions: {} ({} concurrent)", users, concurrent);
    println!("Total time: {:?}", total_time);
    println!("Average session latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} sessions/second", throughput);
    println!("Sessions still held: {}", manager.store().len());

    Ok(())
}

fn dish_names(dishes: &[DishDetail]) -> String {
    dishes
        .iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_history(session: &SimulatedSession) {
    println!("{} {}", "Liked:".green(), dish_names(&session.liked));
    println!("{} {}", "Disliked:".red(), dish_names(&session.disliked));
    println!("{} {}", "Skipped:".dimmed(), dish_names(&session.skipped));
}

fn print_recommendations(session: &SimulatedSession, matching: IngredientMatch, explain: bool) {
    print!("{}", "Recommendations:\n".bold().blue());
    if session.results.is_empty() {
        println!("  (nothing scored above zero)");
        return;
    }

    let affinity = IngredientAffinity::from_history(&session.liked, &session.disliked, matching);
    for (rank, result) in session.results.iter().enumerate() {
        println!(
            "{}. {} [{}] - Score: {}",
            (rank + 1).to_string().green(),
            result.dish.name,
            result.dish.cuisine.name,
            result.score
        );
        if explain {
            for ingredient in &result.dish.ingredients {
                let liked = affinity.liked_count(ingredient);
                let note = if liked > 0 {
                    format!("+{liked}").green()
                } else if affinity.is_disliked(ingredient) {
                    "-1".red()
                } else {
                    "0".dimmed()
                };
                println!("     {} {}", note, ingredient.name);
            }
        }
    }
}
