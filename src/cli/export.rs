//! Export commands
//!
//! CLI handlers producing the CSV spreadsheet sheets and the clipboard-style
//! text summary for a chosen window.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::CajaPaths;
use crate::export::{build_clipboard_summary, export_spreadsheet};
use crate::register::{running_balance, RegisterFilter, RegisterView};
use crate::services::MovementService;
use crate::store::DocumentStore;

use super::movement::fetch_window;

/// Export commands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Write the movements and summary CSV sheets
    Spreadsheet {
        /// One business day (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["month", "all"])]
        date: Option<String>,
        /// One calendar month (YYYY-MM)
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// The entire history
        #[arg(short, long)]
        all: bool,
        /// Output path stem (writes <stem>-movements.csv and <stem>-summary.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a plain-text summary suitable for pasting
    Summary {
        /// One business day (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["month", "all"])]
        date: Option<String>,
        /// One calendar month (YYYY-MM)
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// The entire history
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle an export subcommand
pub fn handle_export_command(
    store: &dyn DocumentStore,
    paths: &CajaPaths,
    cmd: ExportCommands,
) -> Result<()> {
    let service = MovementService::new(store);

    match cmd {
        ExportCommands::Spreadsheet {
            date,
            month,
            all,
            output,
        } => {
            let movements = fetch_window(&service, date.as_deref(), month.as_deref(), all)?;
            let view = RegisterView::compute(&movements, &RegisterFilter::new());

            let balance = match date.as_deref() {
                Some(date) => {
                    let as_of: NaiveDate = date.parse()?;
                    let history = service.fetch_up_to(as_of)?;
                    Some(running_balance(&history, as_of))
                }
                None => None,
            };

            let stem = output.unwrap_or_else(|| {
                paths
                    .export_dir()
                    .join(window_stem(date.as_deref(), month.as_deref()))
            });

            let (movements_path, summary_path) =
                export_spreadsheet(&view.rows, &view.totals, &view.breakdown, balance, &stem)?;
            println!("Wrote {}", movements_path.display());
            println!("Wrote {}", summary_path.display());
        }

        ExportCommands::Summary { date, month, all } => {
            let movements = fetch_window(&service, date.as_deref(), month.as_deref(), all)?;
            let view = RegisterView::compute(&movements, &RegisterFilter::new());

            let (label, balance) = match (date.as_deref(), month.as_deref(), all) {
                (Some(date), _, _) => {
                    let as_of: NaiveDate = date.parse()?;
                    let history = service.fetch_up_to(as_of)?;
                    (
                        date.to_string(),
                        Some(running_balance(&history, as_of)),
                    )
                }
                (_, Some(month), _) => (month.to_string(), None),
                _ => ("Full history".to_string(), None),
            };

            print!(
                "{}",
                build_clipboard_summary(&label, &view.totals, &view.breakdown, balance)
            );
        }
    }

    Ok(())
}

fn window_stem(date: Option<&str>, month: Option<&str>) -> String {
    match (date, month) {
        (Some(date), _) => format!("caja-{}", date),
        (_, Some(month)) => format!("caja-{}", month),
        _ => "caja-history".to_string(),
    }
}
