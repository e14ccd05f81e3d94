use clap::Subcommand;
use creneau_core::WorkdayConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value (seconds)
    Get {
        /// Config key (e.g. "margin", "meal_duration")
        key: String,
    },
    /// Set a config value from seconds or duration text ("45min")
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Show the full configuration
    Show,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = super::load_workday();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = super::load_workday();
            config.set(&key, &value)?;
            println!("ok");
        }
        ConfigAction::Show => {
            let config = super::load_workday();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            let config = WorkdayConfig::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
