//! MemKit demonstration driver
//!
//! Exercises the LRU cache and the probing set through their public APIs
//! and renders snapshots. All textual formatting lives here; the
//! structures themselves only expose read-only snapshots.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memkit::{Config, LruCache, ProbingSet, Slot};

/// Main entry point for the demonstration driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Walk the cache through promotion, eviction, and deletion
/// 4. Walk the set through growth, lookup, and deletion
fn main() -> Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MemKit demonstration");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_capacity={}, set_capacity={}, compaction={:?}",
        config.cache_capacity,
        config.set_capacity,
        config.compaction()
    );

    run_cache_demo(&config)?;
    run_set_demo(&config)?;

    info!("Demonstration complete");
    Ok(())
}

/// Walks the cache through inserts, a promoting read, bulk eviction, and
/// a deletion.
fn run_cache_demo(config: &Config) -> Result<()> {
    let mut cache = LruCache::new(config.cache_capacity)?;

    // Fill to capacity: order becomes [MRU 3, 2, 1 LRU] at capacity 3
    cache.put(1, 102345);
    cache.put(2, 102342);
    cache.put(3, 102303);
    println!("{}", render_cache(&cache));

    // A read promotes the entry to MRU
    println!("Get 2: {:?}", cache.get(2));
    println!("{}", render_cache(&cache));

    // Bulk inserts beyond capacity evict the oldest entries as needed
    for key in 4..=20 {
        cache.put(key, 100000 + key);
    }
    cache.put(21, 100021);
    cache.put(22, 100022);
    println!("{}", render_cache(&cache));

    // A read on an evicted key misses without touching the order
    println!("Get 3: {:?}", cache.get(3));

    cache.delete(10);
    println!("{}", render_cache(&cache));

    println!("Cache stats: {}", serde_json::to_string(&cache.stats())?);
    Ok(())
}

/// Walks the set through enough inserts to trigger growth, then lookups
/// and a deletion.
fn run_set_demo(config: &Config) -> Result<()> {
    let mut set = ProbingSet::with_compaction(config.set_capacity, config.compaction())?;

    let stations = [
        "oakfield",
        "riverside",
        "granite peak",
        "harbor west",
        "milltown",
        "northgate",
        "southford",
        "eastvale",
        "westbrook",
        "lakeshore",
        "pinehurst",
        "cedar grove",
        "foxglove",
        "stonebridge",
        "ironwood",
        "maple run",
        "fern hollow",
        "birch hill",
        "clearwater",
        "ridgeline",
    ];
    for station in stations {
        set.insert(station);
    }
    println!("{}", render_set(&set));

    println!("Contains 'riverside': {}", set.contains("riverside"));
    println!("Contains 'ghost town': {}", set.contains("ghost town"));

    set.delete("harbor west");
    println!("{}", render_set(&set));

    Ok(())
}

// == Presentation ==
/// Renders the cache order from MRU to LRU.
fn render_cache(cache: &LruCache) -> String {
    let mut out = format!(
        "=== LRU Cache (Size: {}, Capacity: {}) ===\n[MRU] ",
        cache.len(),
        cache.capacity()
    );
    for (key, value) in cache.snapshot() {
        out.push_str(&format!("({}:{}) ", key, value));
    }
    out.push_str("[LRU]");
    out
}

/// Renders the occupied and tombstone slots of the backing array.
fn render_set(set: &ProbingSet) -> String {
    let mut out = format!(
        "=== Probing Set (Size: {}, Capacity: {}, Load Factor: {:.2}) ===",
        set.len(),
        set.capacity(),
        set.load_factor()
    );
    for (index, slot) in set.snapshot() {
        match slot {
            Slot::Occupied(key) => out.push_str(&format!("\nIndex {}: {}", index, key)),
            Slot::Tombstone => out.push_str(&format!("\nIndex {}: [DELETED]", index)),
            Slot::Empty => {}
        }
    }
    out
}
