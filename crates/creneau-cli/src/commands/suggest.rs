use clap::Args;
use std::sync::Arc;

use creneau_core::{MapboxClient, PlaceDirectory};

#[derive(Args)]
pub struct SuggestArgs {
    /// Free-text address or place name
    pub query: String,
    /// Maximum number of suggestions
    #[arg(short, long, default_value_t = 3)]
    pub limit: usize,
    /// Print raw JSON instead of a list
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cache = Arc::new(super::open_cache()?);
    let mapbox = Arc::new(MapboxClient::from_env()?);

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let directory = PlaceDirectory::new(cache, mapbox);
    let suggestions = directory.suggest(&args.query, args.limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No suggestion for '{}'.", args.query);
        return Ok(());
    }
    for s in suggestions {
        match s.full_address {
            Some(address) => println!("{} - {} ({})", s.name, address, s.place_id),
            None => println!("{} ({})", s.name, s.place_id),
        }
    }
    Ok(())
}
