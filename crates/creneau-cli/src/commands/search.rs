use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use creneau_core::feed::CalendarSource;
use creneau_core::pool::DEFAULT_POOL_CAPACITY;
use creneau_core::integrations::GeocodingProvider;
use creneau_core::{
    duration, CachedEstimator, JsonFileSource, LegFailurePolicy, MapboxClient, PlaceDirectory,
    SlotFinder, WeekDescriptor, WorkerPool,
};

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text meeting place ("mairie Bayeux")
    pub place: String,
    /// ISO week number (defaults to the current week)
    #[arg(short, long)]
    pub week: Option<u32>,
    /// Year (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Meeting duration ("1h30", "45min")
    #[arg(short, long, default_value = "1h30")]
    pub duration: String,
    /// JSON calendar export to search around
    #[arg(short, long)]
    pub calendar: PathBuf,
    /// Concurrent travel lookups
    #[arg(long, default_value_t = DEFAULT_POOL_CAPACITY)]
    pub pool_size: usize,
    /// Fail the search on the first travel lookup error instead of
    /// assuming zero-cost travel
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let current = WeekDescriptor::current();
    let week = WeekDescriptor::new(
        args.year.unwrap_or(current.year),
        args.week.unwrap_or(current.week),
    );
    let meeting_secs = duration::parse(&args.duration);
    if meeting_secs == 0 {
        return Err(format!("cannot parse meeting duration '{}'", args.duration).into());
    }

    let appointments = JsonFileSource::new(&args.calendar).load()?;
    let workday = super::load_workday();
    let cache = Arc::new(super::open_cache()?);
    let mapbox = Arc::new(MapboxClient::from_env()?);

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let directory = PlaceDirectory::new(
        Arc::clone(&cache),
        Arc::clone(&mapbox) as Arc<dyn GeocodingProvider>,
    );
    let target = directory.locate(&args.place)?;
    println!("Searching week {}/{} around {}", week.week, week.year, target);

    let finder = SlotFinder::new(
        Arc::new(CachedEstimator::new(cache, mapbox)),
        Arc::new(WorkerPool::new(args.pool_size)),
    )
    .with_failure_policy(if args.strict {
        LegFailurePolicy::Abort
    } else {
        LegFailurePolicy::DegradeToZero
    });

    let slots = runtime.block_on(finder.find_slots(
        &appointments,
        &target,
        week,
        meeting_secs,
        &workday,
    ))?;

    if slots.is_empty() {
        println!("No feasible slot this week.");
        return Ok(());
    }

    for (i, slot) in slots.iter().enumerate() {
        let meal = if slot.meal_secs > 0 {
            format!(", meal {}", duration::format(slot.meal_secs))
        } else {
            String::new()
        };
        println!(
            "{}. {} (out {}, back {}{meal})",
            i + 1,
            slot,
            duration::format(slot.outbound_secs.round() as i64),
            duration::format(slot.return_secs.round() as i64),
        );
    }
    Ok(())
}
