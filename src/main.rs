use anyhow::Result;
use clap::{Parser, Subcommand};

use caja::cli::{handle_export_command, handle_movement_command, ExportCommands, MovementCommands};
use caja::config::{paths::CajaPaths, settings::Settings};
use caja::store::FileStore;

#[derive(Parser)]
#[command(
    name = "caja",
    version,
    about = "Terminal-based daily cash register for a vehicle dealership",
    long_about = "caja-cli keeps the daily cash register of a dealership's back \
                  office: income and expense movements tagged with a payment \
                  method, reconciled into daily, monthly, and running-balance \
                  summaries, with filtering, sorting, and CSV export."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive register
    #[command(alias = "ui")]
    Tui,

    /// Movement management commands
    #[command(subcommand, alias = "mov")]
    Movement(MovementCommands),

    /// Export the register as CSV sheets or a text summary
    #[command(subcommand)]
    Export(ExportCommands),

    /// Initialize the data directory and settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CajaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // The document store backing the register
    paths.ensure_directories()?;
    let store = FileStore::new(paths.data_dir());

    match cli.command {
        Some(Commands::Tui) | None => {
            caja::tui::run_tui(&store, &settings, &paths)?;
        }
        Some(Commands::Movement(cmd)) => {
            handle_movement_command(&store, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&store, &paths, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing caja-cli at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'caja' to open the register, or 'caja movement add --help'");
            println!("to record movements from the command line.");
        }
        Some(Commands::Config) => {
            println!("caja-cli Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Default view:    {:?}", settings.default_view);
        }
    }

    Ok(())
}
