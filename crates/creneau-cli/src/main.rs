use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "creneau", version, about = "Find meeting slots around a field worker's week")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find feasible meeting slots for a week
    Search(commands::search::SearchArgs),
    /// Suggest addresses for a query
    Suggest(commands::suggest::SuggestArgs),
    /// Workday configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Lookup cache maintenance
    Cache {
        #[command(subcommand)]
        action: commands::cache::CacheAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args),
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Cache { action } => commands::cache::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "creneau", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
