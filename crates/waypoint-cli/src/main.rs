//! Command-line front end for the waypoint place resolver.
//!
//! Wires the production collaborators (geocoder client, Postgres place
//! store) into a [`PlaceResolver`] and exposes search, selection, and
//! review entry for manual use and smoke testing.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use waypoint_core::{load_app_config_from_env, Candidate, Coordinates};
use waypoint_db::{connect_pool, run_migrations, PoolConfig};
use waypoint_geocode::GeocodeClient;
use waypoint_places::{PgPlaceStore, PlaceResolver};

#[derive(Debug, Parser)]
#[command(name = "waypoint")]
#[command(about = "Place search for the waypoint travel-safety app")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search places across the geocoder and the community directory.
    Search {
        /// Free-text query, minimum 3 characters.
        query: String,
        /// Proximity bias as "lon,lat".
        #[arg(long)]
        near: Option<String>,
        /// Promote/select the Nth result (1-based) after searching.
        #[arg(long)]
        select: Option<usize>,
    },
    /// Add a review for a stored place.
    Review {
        place_id: i64,
        /// Rating from 1 to 5.
        rating: i32,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Show reviews for a stored place, newest first.
    Reviews { place_id: i64 },
    /// Apply pending database migrations.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            query,
            near,
            select,
        } => search(&query, near.as_deref(), select).await,
        Commands::Review {
            place_id,
            rating,
            comment,
        } => review(place_id, rating, comment.as_deref()).await,
        Commands::Reviews { place_id } => reviews(place_id).await,
        Commands::Migrate => migrate().await,
    }
}

async fn search(query: &str, near: Option<&str>, select: Option<usize>) -> anyhow::Result<()> {
    let config = load_app_config_from_env().context("loading configuration")?;
    let proximity = near.map(parse_coordinates).transpose()?;

    let geocoder = GeocodeClient::with_base_url(
        &config.geocode_token,
        config.geocode_timeout_secs,
        &config.geocode_base_url,
    )
    .context("building geocoder client")?;
    let pool = connect_pool(&config.database_url, PoolConfig::from_app_config(&config))
        .await
        .context("connecting to database")?;
    let resolver = PlaceResolver::new(geocoder, PgPlaceStore::new(pool));

    let results = resolver.search(query, proximity).await?;
    if results.is_empty() {
        println!("no places found for {query:?}");
        return Ok(());
    }

    for (i, candidate) in results.iter().enumerate() {
        println!("{}. {}", i + 1, describe(candidate));
    }

    if let Some(index) = select {
        let candidate = results
            .get(index.checked_sub(1).context("--select is 1-based")?)
            .with_context(|| format!("--select {index} is out of range"))?;
        match resolver.select(candidate.clone()).await {
            Ok(Candidate::Local(place)) => {
                println!("selected: {} (place id {})", place.name, place.id);
            }
            Ok(other) => println!("selected: {}", other.name()),
            Err(e) => {
                println!(
                    "selected {} but it could not be saved: {}",
                    e.candidate.name, e.source
                );
            }
        }
    }

    Ok(())
}

async fn review(place_id: i64, rating: i32, comment: Option<&str>) -> anyhow::Result<()> {
    let config = load_app_config_from_env().context("loading configuration")?;
    let pool = connect_pool(&config.database_url, PoolConfig::from_app_config(&config))
        .await
        .context("connecting to database")?;

    let review_id = waypoint_db::insert_review(&pool, place_id, rating, comment)
        .await
        .context("inserting review")?;
    println!("review {review_id} recorded for place {place_id}");
    Ok(())
}

async fn reviews(place_id: i64) -> anyhow::Result<()> {
    let config = load_app_config_from_env().context("loading configuration")?;
    let pool = connect_pool(&config.database_url, PoolConfig::from_app_config(&config))
        .await
        .context("connecting to database")?;

    let rows = waypoint_db::list_reviews_for_place(&pool, place_id)
        .await
        .context("listing reviews")?;
    if rows.is_empty() {
        println!("no reviews for place {place_id}");
        return Ok(());
    }
    for row in rows {
        let comment = row.comment.as_deref().unwrap_or("(no comment)");
        println!(
            "{}★ {} — {}",
            row.rating,
            row.created_at.format("%Y-%m-%d"),
            comment
        );
    }
    Ok(())
}

async fn migrate() -> anyhow::Result<()> {
    let pool = waypoint_db::connect_pool_from_env()
        .await
        .context("connecting to database")?;
    run_migrations(&pool).await.context("running migrations")?;
    println!("migrations up to date");
    Ok(())
}

/// Parses a "lon,lat" pair.
fn parse_coordinates(raw: &str) -> anyhow::Result<Coordinates> {
    let (lon, lat) = raw
        .split_once(',')
        .with_context(|| format!("expected \"lon,lat\", got {raw:?}"))?;
    Ok(Coordinates::new(
        lon.trim().parse().context("invalid longitude")?,
        lat.trim().parse().context("invalid latitude")?,
    ))
}

fn describe(candidate: &Candidate) -> String {
    match candidate {
        Candidate::Local(place) => {
            let rating = if place.rating.count > 0 {
                format!(
                    " — {:.1}★ ({} reviews)",
                    place.rating.average, place.rating.count
                )
            } else {
                String::new()
            };
            let origin = if place.user_added {
                "community"
            } else {
                "saved"
            };
            format!(
                "{} [{}] ({}) {}{}",
                place.name,
                origin,
                place.category.as_str(),
                place.address,
                rating
            )
        }
        Candidate::Remote(place) => format!(
            "{} [provider] ({}) {}",
            place.name,
            place.category.as_str(),
            place.address
        ),
    }
}
