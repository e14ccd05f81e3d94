use clap::Subcommand;

#[derive(Subcommand)]
pub enum CacheAction {
    /// Entry counts per category
    Stats,
    /// Remove the whole store
    Clear,
}

pub fn run(action: CacheAction) -> Result<(), Box<dyn std::error::Error>> {
    let cache = super::open_cache()?;
    match action {
        CacheAction::Stats => {
            let stats = cache.stats();
            if stats.is_empty() {
                println!("cache is empty");
                return Ok(());
            }
            let mut categories: Vec<_> = stats.into_iter().collect();
            categories.sort();
            for (category, count) in categories {
                println!("{category}: {count}");
            }
        }
        CacheAction::Clear => {
            cache.clear()?;
            println!("cache cleared");
        }
    }
    Ok(())
}
