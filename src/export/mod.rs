//! Export module for caja-cli
//!
//! Serializes the currently aggregated view in two forms:
//! - CSV "spreadsheet": a movements sheet and a summary sheet
//! - a plain-text clipboard summary
//!
//! Pure formatters; every number here was computed by the register core.

pub mod clipboard;
pub mod csv;

pub use self::clipboard::build_clipboard_summary;
pub use self::csv::{export_movements_csv, export_summary_csv};

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{CajaError, CajaResult};
use crate::models::{Money, Movement};
use crate::register::{MethodBreakdown, Totals};

/// Write both sheets next to each other:
/// `<stem>-movements.csv` and `<stem>-summary.csv`.
///
/// Returns the two paths written.
pub fn export_spreadsheet(
    rows: &[Movement],
    totals: &Totals,
    breakdown: &MethodBreakdown,
    balance: Option<Money>,
    stem: &Path,
) -> CajaResult<(PathBuf, PathBuf)> {
    let movements_path = sheet_path(stem, "movements");
    let summary_path = sheet_path(stem, "summary");

    if let Some(parent) = movements_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CajaError::Export(format!("{}: {}", parent.display(), e)))?;
    }

    let file = File::create(&movements_path)
        .map_err(|e| CajaError::Export(format!("{}: {}", movements_path.display(), e)))?;
    export_movements_csv(rows, file)?;

    let file = File::create(&summary_path)
        .map_err(|e| CajaError::Export(format!("{}: {}", summary_path.display(), e)))?;
    export_summary_csv(totals, breakdown, balance, file)?;

    Ok((movements_path, summary_path))
}

fn sheet_path(stem: &Path, sheet: &str) -> PathBuf {
    let name = stem
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "register".to_string());
    stem.with_file_name(format!("{}-{}.csv", name, sheet))
}
