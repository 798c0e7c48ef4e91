//! playcache - a terminal front for the game hub content cache.
//!
//! Stands in for the game views: loads each content collection through the
//! fetch-with-fallback loader, prints it, and offers an explicit refresh.
//! Works offline once the cache has been seeded.

use std::io;

use anyhow::{anyhow, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use playcache_core::api::ContentClient;
use playcache_core::cache::ContentStore;
use playcache_core::config::{Config, SERVICE_KEY_ENV, SERVICE_URL_ENV};
use playcache_core::deck::build_wheel;
use playcache_core::loader::{self, CollectionData};
use playcache_core::models::{themes, CardPairRecord, ContentRecord, PhraseRecord, WheelItemRecord};

const USAGE: &str = "\
playcache <command>

Commands:
  pairs      list the memory game card pairs
  phrases    list the guess-or-leave phrases, grouped by theme
  wheel      show the roulette wheel slices
  status     show cache ages per collection
  refresh    fetch all collections and update the local cache
";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("status");

    let config = Config::load()?;
    let store = ContentStore::open(config.cache_dir()?)?;

    match command {
        "pairs" => show_pairs(&config, &store).await,
        "phrases" => show_phrases(&config, &store).await,
        "wheel" => show_wheel(&config, &store).await,
        "status" => show_status(&store),
        "refresh" => refresh_all(&config, &store).await,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}

fn build_client(config: &Config) -> Result<ContentClient> {
    let url = config
        .resolved_service_url()
        .ok_or_else(|| anyhow!("No service URL configured; set {SERVICE_URL_ENV}"))?;
    let key = config
        .resolved_service_key()
        .ok_or_else(|| anyhow!("No service key configured; set {SERVICE_KEY_ENV}"))?;
    ContentClient::new(&url, &key)
}

/// Load one collection, treating a missing service configuration the same
/// as any other remote failure: fall back to the local cache.
async fn load<T>(config: &Config, store: &ContentStore) -> CollectionData<T>
where
    T: ContentRecord + Clone + Send + 'static,
{
    match build_client(config) {
        Ok(client) => loader::load_collection(store, client.fetch_all::<T>()).await,
        Err(e) => loader::load_collection(store, async move { Err(e) }).await,
    }
}

fn print_source<T: ContentRecord>(data: &CollectionData<T>, store: &ContentStore) {
    match data {
        CollectionData::Fresh(records) => {
            println!("{} records (online)\n", records.len());
        }
        CollectionData::Cached(records) => {
            let age = store
                .read_cached::<T>()
                .ok()
                .flatten()
                .map(|cached| cached.age_display())
                .unwrap_or_else(|| "unknown age".to_string());
            println!("{} records (from local cache, {})\n", records.len(), age);
        }
        CollectionData::Unavailable => {}
    }
}

fn print_unavailable(collection: &str) {
    println!("No {collection} data available.");
    println!("The service is unreachable and nothing is cached yet - go online once to seed the local cache.");
}

async fn show_pairs(config: &Config, store: &ContentStore) -> Result<()> {
    let data = load::<CardPairRecord>(config, store).await;
    print_source(&data, store);

    match data.records() {
        Some(records) => {
            for record in records {
                println!("  [{:>3}] {}", record.id, record.text);
            }
        }
        None => print_unavailable(CardPairRecord::COLLECTION),
    }
    Ok(())
}

async fn show_phrases(config: &Config, store: &ContentStore) -> Result<()> {
    let data = load::<PhraseRecord>(config, store).await;
    print_source(&data, store);

    match data.records() {
        Some(records) => {
            for theme in themes(records) {
                println!("{theme}:");
                for record in records.iter().filter(|r| r.theme == theme) {
                    println!("  [{:>3}] {} -> {}", record.id, record.phrase, record.word);
                }
            }
        }
        None => print_unavailable(PhraseRecord::COLLECTION),
    }
    Ok(())
}

async fn show_wheel(config: &Config, store: &ContentStore) -> Result<()> {
    let data = load::<WheelItemRecord>(config, store).await;
    print_source(&data, store);

    match data.records() {
        Some(records) => {
            for (index, slice) in build_wheel(records).iter().enumerate() {
                println!("  slice {:>2}: {} ({:?})", index + 1, slice.text, slice.color);
            }
        }
        None => print_unavailable(WheelItemRecord::COLLECTION),
    }
    Ok(())
}

fn show_status(store: &ContentStore) -> Result<()> {
    let ages = store.cache_ages();
    let display = |age: Option<String>| age.unwrap_or_else(|| "never".to_string());

    println!("memory_card_pairs:      {}", display(ages.pairs));
    println!("guess_or_leave_phrases: {}", display(ages.phrases));
    println!("roulette_items:         {}", display(ages.wheel));

    if store.any_stale() {
        println!("\nCache is stale - run `playcache refresh` while online.");
    }
    Ok(())
}

async fn refresh_all(config: &Config, store: &ContentStore) -> Result<()> {
    let client = build_client(config)?;
    info!("Refreshing all content collections");

    let (pairs, phrases, wheel) = futures::join!(
        loader::refresh_collection(store, client.fetch_all::<CardPairRecord>()),
        loader::refresh_collection(store, client.fetch_all::<PhraseRecord>()),
        loader::refresh_collection(store, client.fetch_all::<WheelItemRecord>()),
    );

    report_refresh(CardPairRecord::COLLECTION, &pairs);
    report_refresh(PhraseRecord::COLLECTION, &phrases);
    report_refresh(WheelItemRecord::COLLECTION, &wheel);

    if pairs.is_err() || phrases.is_err() || wheel.is_err() {
        Err(anyhow!("one or more collections failed to refresh"))
    } else {
        Ok(())
    }
}

fn report_refresh<T>(collection: &str, result: &Result<Vec<T>>) {
    match result {
        Ok(records) => println!("{collection}: {} records cached", records.len()),
        Err(e) => {
            warn!(collection, error = %e, "Refresh failed");
            println!("{collection}: refresh failed ({e})");
        }
    }
}
