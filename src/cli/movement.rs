//! Movement management commands
//!
//! CLI handlers for adding, listing, and deleting movements outside the TUI.

use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::display::{format_movement_table, format_summary_table};
use crate::models::{CheckDetail, Money, Movement, MovementKind, PaymentMethod};
use crate::register::{running_balance, KindFilter, RegisterFilter, RegisterView};
use crate::services::{MovementInput, MovementService};
use crate::store::DocumentStore;

/// Movement management commands
#[derive(Subcommand)]
pub enum MovementCommands {
    /// Add a new movement
    Add {
        /// Description of the movement
        description: String,
        /// Amount (e.g. 1234.56), always positive
        amount: String,
        /// Record an expense instead of an income
        #[arg(short = 'x', long)]
        expense: bool,
        /// Payment method: cash, transfer, card, check, other
        #[arg(short, long, default_value = "cash")]
        method: String,
        /// Business date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Check number (check method only)
        #[arg(long)]
        check_number: Option<String>,
        /// Check issuer (check method only)
        #[arg(long)]
        check_issuer: Option<String>,
    },
    /// List movements with totals and breakdown
    List {
        /// One business day (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["month", "all"])]
        date: Option<String>,
        /// One calendar month (YYYY-MM)
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// The entire history
        #[arg(short, long)]
        all: bool,
        /// Free-text filter on description or amount
        #[arg(short, long)]
        filter: Option<String>,
        /// Restrict to one kind: income or expense
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// Delete a movement after confirmation
    Delete {
        /// Movement id (as shown by `movement list --all`, e.g. mov-1a2b3c4d)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a movement subcommand
pub fn handle_movement_command(store: &dyn DocumentStore, cmd: MovementCommands) -> Result<()> {
    let service = MovementService::new(store);

    match cmd {
        MovementCommands::Add {
            description,
            amount,
            expense,
            method,
            date,
            check_number,
            check_issuer,
        } => {
            let amount =
                Money::parse(&amount).map_err(|_| anyhow!("Amount must be a number"))?;
            let payment_method = PaymentMethod::from_label(&method)
                .ok_or_else(|| anyhow!("Unknown payment method: {}", method))?;
            let date = parse_date_or_today(date.as_deref())?;

            let check_detail = if check_number.is_some() || check_issuer.is_some() {
                if payment_method != PaymentMethod::Check {
                    bail!("Check details are only valid with --method check");
                }
                Some(CheckDetail {
                    number: check_number.unwrap_or_default(),
                    issuer: check_issuer.unwrap_or_default(),
                    issue_date: Some(date),
                    due_date: None,
                })
            } else {
                None
            };

            let movement = service.create(MovementInput {
                description,
                amount,
                kind: if expense {
                    MovementKind::Expense
                } else {
                    MovementKind::Income
                },
                payment_method,
                check_detail,
                date,
            })?;

            println!("Added {} ({})", movement.description, movement.id);
        }

        MovementCommands::List {
            date,
            month,
            all,
            filter,
            kind,
        } => {
            let movements = fetch_window(&service, date.as_deref(), month.as_deref(), all)?;

            let mut register_filter = RegisterFilter::new();
            if let Some(text) = filter {
                register_filter = register_filter.text(text);
            }
            if let Some(kind) = kind {
                register_filter = register_filter.kind(parse_kind_filter(&kind)?);
            }

            let view = RegisterView::compute(&movements, &register_filter);
            println!("{}", format_movement_table(&view.rows));
            println!();
            println!("{}", format_summary_table(&view.totals, &view.breakdown));

            // The daily view also reports the running balance
            if let Some(date) = date.as_deref() {
                let as_of: NaiveDate = date.parse()?;
                let history = service.fetch_up_to(as_of)?;
                println!();
                println!("Running balance: {}", running_balance(&history, as_of));
            }
        }

        MovementCommands::Delete { id, yes } => {
            let movement = find_movement(&service, &id)?;

            if !yes && !confirm_delete(&movement)? {
                println!("Aborted.");
                return Ok(());
            }

            service.delete(movement.id)?;
            println!("Deleted {} ({})", movement.description, movement.id);
        }
    }

    Ok(())
}

/// Fetch the window selected by the list/export flags (default: today)
pub fn fetch_window(
    service: &MovementService,
    date: Option<&str>,
    month: Option<&str>,
    all: bool,
) -> Result<Vec<Movement>> {
    if all {
        return Ok(service.fetch_all()?);
    }
    if let Some(month) = month {
        let first = format!("{}-01", month)
            .parse::<NaiveDate>()
            .map_err(|_| anyhow!("Invalid month: {} (use YYYY-MM)", month))?;
        return Ok(service.fetch_month(first)?);
    }
    let date = parse_date_or_today(date)?;
    Ok(service.fetch_day(date)?)
}

fn parse_date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow!("Invalid date: {} (use YYYY-MM-DD)", raw)),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_kind_filter(raw: &str) -> Result<KindFilter> {
    match raw.to_ascii_lowercase().as_str() {
        "income" => Ok(KindFilter::Income),
        "expense" => Ok(KindFilter::Expense),
        "all" => Ok(KindFilter::All),
        other => Err(anyhow!("Unknown kind: {} (use income or expense)", other)),
    }
}

/// Resolve a movement from its (possibly abbreviated) id
fn find_movement(service: &MovementService, id: &str) -> Result<Movement> {
    let movements = service.fetch_all()?;
    let needle = id.strip_prefix("mov-").unwrap_or(id);

    let mut matches: Vec<Movement> = movements
        .into_iter()
        .filter(|m| m.id.as_uuid().to_string().starts_with(needle))
        .collect();

    match matches.len() {
        0 => bail!("Movement not found: {}", id),
        1 => Ok(matches.swap_remove(0)),
        _ => bail!("Ambiguous movement id: {}", id),
    }
}

fn confirm_delete(movement: &Movement) -> Result<bool> {
    println!(
        "Delete movement '{}' ({}, {})? [y/N]",
        movement.description,
        movement.date,
        movement.amount_display()
    );
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
