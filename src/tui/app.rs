//! Application state for the TUI
//!
//! `App` is the view controller of the register: one explicit state object
//! per concern (view mode, fetch status, edit state, pending delete) instead
//! of loose flags, with typed transitions between them. It owns the working
//! set of movements and orchestrates the movement service and the register
//! core; rendering reads this state and draws it.

use chrono::{Days, Local, NaiveDate};

use crate::config::settings::DefaultView;
use crate::config::{CajaPaths, Settings};
use crate::error::CajaResult;
use crate::export::export_spreadsheet;
use crate::models::{Movement, MovementId};
use crate::register::{
    month_bounds, running_balance, BalanceState, MonthlySummary, RegisterFilter, RegisterView,
    SortField,
};
use crate::services::MovementService;
use crate::store::DocumentStore;

use super::dialogs::MovementFormState;
use super::widgets::Notification;

/// Which window of movements is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One business day
    #[default]
    Daily,
    /// The entire history
    FullHistory,
    /// One calendar month, grouped by day
    Monthly,
}

impl From<DefaultView> for ViewMode {
    fn from(view: DefaultView) -> Self {
        match view {
            DefaultView::Daily => Self::Daily,
            DefaultView::FullHistory => Self::FullHistory,
            DefaultView::Monthly => Self::Monthly,
        }
    }
}

/// State of the last window fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    /// The previously displayed data stays visible, labeled stale
    Error(String),
}

/// Whether an edit is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    None,
    Editing(MovementId),
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddMovement,
    EditMovement(MovementId),
    /// First step of the two-step delete
    ConfirmDelete(MovementId),
}

/// Token tying a fetch completion to the request that started it.
///
/// Completions carrying a stale token are discarded, so a response that
/// arrives after the user has already moved on can never overwrite newer
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// Main application state
pub struct App<'a> {
    /// Movement service over the document store
    service: MovementService<'a>,

    /// Application settings
    pub settings: &'a Settings,

    /// Paths configuration (export target)
    pub paths: &'a CajaPaths,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Displayed window
    pub mode: ViewMode,

    /// The business date the register is anchored on
    pub reference_date: NaiveDate,

    /// Display filter and sort; changing it recomputes the view without
    /// touching the store
    pub filter: RegisterFilter,

    /// Whether the advanced filter row is open
    pub show_filters: bool,

    /// Whether keystrokes currently edit the filter text
    pub filter_active: bool,

    /// State of the last window fetch
    pub fetch_status: FetchStatus,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Working set: the last successfully fetched window. Only this
    /// controller mutates it, and only from fetch results.
    movements: Vec<Movement>,

    /// Derived register view over the working set
    pub view: RegisterView,

    /// Derived monthly summary (monthly mode only)
    pub monthly: Option<MonthlySummary>,

    /// Running balance up to the reference date (daily mode)
    pub balance: BalanceState,

    /// Movement form state
    pub form: MovementFormState,

    /// Selected row in the register table
    pub selected_index: usize,

    /// Toast notification
    pub notification: Option<Notification>,

    /// Generation counter for the request guard
    fetch_generation: u64,
}

impl<'a> App<'a> {
    /// Create a new App over a document store
    pub fn new(store: &'a dyn DocumentStore, settings: &'a Settings, paths: &'a CajaPaths) -> Self {
        let reference_date = Local::now().date_naive();
        Self {
            service: MovementService::new(store),
            settings,
            paths,
            should_quit: false,
            mode: ViewMode::from(settings.default_view),
            reference_date,
            filter: RegisterFilter::default(),
            show_filters: false,
            filter_active: false,
            fetch_status: FetchStatus::Idle,
            active_dialog: ActiveDialog::default(),
            movements: Vec::new(),
            view: RegisterView::default(),
            monthly: None,
            balance: BalanceState::Unknown,
            form: MovementFormState::new(reference_date),
            selected_index: 0,
            notification: None,
            fetch_generation: 0,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Edit state, derived from the active dialog so the two can't disagree
    pub fn edit_state(&self) -> EditState {
        match self.active_dialog {
            ActiveDialog::EditMovement(id) => EditState::Editing(id),
            _ => EditState::None,
        }
    }

    /// The movement under the cursor
    pub fn selected_movement(&self) -> Option<&Movement> {
        self.view.rows.get(self.selected_index)
    }

    /// The working set currently backing the view
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    // --- fetching ------------------------------------------------------

    /// Start a fetch: bumps the generation and flips to loading.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.fetch_generation += 1;
        self.fetch_status = FetchStatus::Loading;
        FetchToken(self.fetch_generation)
    }

    /// Apply a fetch result. Stale tokens are discarded: a newer fetch has
    /// started since, and its result is the one that counts.
    pub fn complete_fetch(&mut self, token: FetchToken, result: CajaResult<Vec<Movement>>) {
        if token.0 != self.fetch_generation {
            return;
        }

        match result {
            Ok(movements) => {
                self.movements = movements;
                self.fetch_status = FetchStatus::Idle;
                self.recompute_view();
            }
            Err(err) => {
                // Stale data stays visible; the user retries explicitly
                self.fetch_status = FetchStatus::Error(err.to_string());
                self.notify(Notification::error(err.to_string()));
            }
        }
    }

    /// Fetch the current window and rederive everything from it
    pub fn refresh(&mut self) {
        let token = self.begin_fetch();
        let result = match self.mode {
            ViewMode::Daily => self.service.fetch_day(self.reference_date),
            ViewMode::FullHistory => self.service.fetch_all(),
            ViewMode::Monthly => self.service.fetch_month(self.reference_date),
        };
        self.complete_fetch(token, result);

        if self.mode == ViewMode::Daily {
            self.refresh_balance();
        }
    }

    /// Recompute the running balance from the full history up to the
    /// reference date. A failed fetch reads as unknown, never as zero.
    fn refresh_balance(&mut self) {
        match self.service.fetch_up_to(self.reference_date) {
            Ok(history) => {
                self.balance =
                    BalanceState::Known(running_balance(&history, self.reference_date));
            }
            Err(err) => {
                self.balance = BalanceState::Unknown;
                self.notify(Notification::error(format!("Balance unavailable: {}", err)));
            }
        }
    }

    /// Rederive view and monthly summary from the working set.
    /// Pure recomputation; the store is not involved.
    fn recompute_view(&mut self) {
        self.view = RegisterView::compute(&self.movements, &self.filter);
        self.monthly = match self.mode {
            ViewMode::Monthly => Some(MonthlySummary::build(&self.movements)),
            _ => None,
        };
        if self.selected_index >= self.view.rows.len() {
            self.selected_index = self.view.rows.len().saturating_sub(1);
        }
    }

    // --- view mode and date navigation ---------------------------------

    /// Switch the displayed window
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.selected_index = 0;
        self.refresh();
    }

    /// Toggle between the daily window and the full history
    pub fn toggle_full_history(&mut self) {
        match self.mode {
            ViewMode::FullHistory => self.set_mode(ViewMode::Daily),
            _ => self.set_mode(ViewMode::FullHistory),
        }
    }

    /// Toggle the monthly view
    pub fn toggle_monthly(&mut self) {
        match self.mode {
            ViewMode::Monthly => self.set_mode(ViewMode::Daily),
            _ => self.set_mode(ViewMode::Monthly),
        }
    }

    /// Step to the previous day (previous month in monthly mode)
    pub fn prev_period(&mut self) {
        self.reference_date = match self.mode {
            ViewMode::Monthly => month_bounds(self.reference_date)
                .0
                .pred_opt()
                .unwrap_or(self.reference_date),
            _ => self
                .reference_date
                .checked_sub_days(Days::new(1))
                .unwrap_or(self.reference_date),
        };
        self.refresh();
    }

    /// Step to the next day (next month in monthly mode)
    pub fn next_period(&mut self) {
        self.reference_date = match self.mode {
            ViewMode::Monthly => month_bounds(self.reference_date)
                .1
                .succ_opt()
                .unwrap_or(self.reference_date),
            _ => self
                .reference_date
                .checked_add_days(Days::new(1))
                .unwrap_or(self.reference_date),
        };
        self.refresh();
    }

    /// Jump back to today
    pub fn goto_today(&mut self) {
        self.reference_date = Local::now().date_naive();
        self.refresh();
    }

    // --- filters (display-only: no refetch) ----------------------------

    /// Open/close the advanced filter row
    pub fn toggle_filters(&mut self) {
        self.show_filters = !self.show_filters;
        self.filter_active = self.show_filters;
        if !self.show_filters {
            self.filter = RegisterFilter::default();
            self.recompute_view();
        }
    }

    /// Append a character to the filter text
    pub fn push_filter_char(&mut self, c: char) {
        self.filter.text.push(c);
        self.recompute_view();
    }

    /// Remove the last character of the filter text
    pub fn pop_filter_char(&mut self) {
        self.filter.text.pop();
        self.recompute_view();
    }

    /// Cycle the kind filter (all -> income -> expense)
    pub fn cycle_kind_filter(&mut self) {
        self.filter.kind = self.filter.kind.next();
        self.recompute_view();
    }

    /// Cycle the sort field
    pub fn cycle_sort_field(&mut self) {
        self.filter.sort = match self.filter.sort {
            SortField::Date => SortField::Description,
            SortField::Description => SortField::Amount,
            SortField::Amount => SortField::Date,
        };
        self.recompute_view();
    }

    /// Flip the sort direction
    pub fn toggle_sort_direction(&mut self) {
        self.filter.direction = self.filter.direction.toggle();
        self.recompute_view();
    }

    // --- movement lifecycle --------------------------------------------

    /// Open the quick-entry form
    pub fn open_add_form(&mut self) {
        self.form = MovementFormState::new(self.reference_date);
        self.active_dialog = ActiveDialog::AddMovement;
    }

    /// Open the edit form for the selected movement
    pub fn open_edit_form(&mut self) {
        if let Some(movement) = self.selected_movement() {
            let id = movement.id;
            self.form = MovementFormState::from_movement(movement);
            self.active_dialog = ActiveDialog::EditMovement(id);
        }
    }

    /// Close whatever dialog is open. A no-op with no partial state change.
    pub fn cancel_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Submit the movement form (create or update).
    ///
    /// Validation failures stay in the form as a field-level message and
    /// never reach the store. Store failures keep the form open so the user
    /// can retry; nothing local was mutated. On success the window is
    /// re-fetched and, in daily mode, the balance recomputed.
    pub fn submit_form(&mut self) {
        let input = match self.form.build_input() {
            Ok(input) => input,
            Err(message) => {
                self.form.error_message = Some(message);
                return;
            }
        };

        let result = match self.active_dialog {
            ActiveDialog::EditMovement(id) => self.service.update(id, input).map(|_| "Movement updated"),
            _ => self.service.create(input).map(|_| "Movement added"),
        };

        match result {
            Ok(message) => {
                self.active_dialog = ActiveDialog::None;
                self.form.error_message = None;
                self.notify(Notification::success(message));
                self.refresh();
            }
            Err(err) => {
                self.form.error_message = Some(err.to_string());
                self.notify(Notification::error(err.to_string()));
            }
        }
    }

    /// First step of the delete: ask for confirmation
    pub fn request_delete(&mut self) {
        if let Some(movement) = self.selected_movement() {
            self.active_dialog = ActiveDialog::ConfirmDelete(movement.id);
        }
    }

    /// Second step of the delete: the user confirmed
    pub fn confirm_delete(&mut self) {
        let id = match self.active_dialog {
            ActiveDialog::ConfirmDelete(id) => id,
            _ => return,
        };
        self.active_dialog = ActiveDialog::None;

        match self.service.delete(id) {
            Ok(()) => {
                self.notify(Notification::success("Movement deleted"));
                self.refresh();
            }
            Err(err) => {
                self.notify(Notification::error(err.to_string()));
            }
        }
    }

    // --- export ---------------------------------------------------------

    /// Export the current view as the two CSV sheets
    pub fn export(&mut self) {
        let stem = self.paths.export_dir().join(self.export_stem());
        let result = export_spreadsheet(
            &self.view.rows,
            &self.view.totals,
            &self.view.breakdown,
            self.balance.value(),
            &stem,
        );
        match result {
            Ok((movements_path, _)) => {
                self.notify(Notification::success(format!(
                    "Exported to {}",
                    movements_path.display()
                )));
            }
            Err(err) => self.notify(Notification::error(err.to_string())),
        }
    }

    /// Human label of the displayed window
    pub fn window_label(&self) -> String {
        match self.mode {
            ViewMode::Daily => self.reference_date.format("%Y-%m-%d").to_string(),
            ViewMode::FullHistory => "Full history".to_string(),
            ViewMode::Monthly => self.reference_date.format("%B %Y").to_string(),
        }
    }

    fn export_stem(&self) -> String {
        match self.mode {
            ViewMode::Daily => format!("caja-{}", self.reference_date.format("%Y-%m-%d")),
            ViewMode::FullHistory => "caja-history".to_string(),
            ViewMode::Monthly => format!("caja-{}", self.reference_date.format("%Y-%m")),
        }
    }

    // --- selection and notifications -----------------------------------

    /// Move the table cursor up
    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move the table cursor down
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.view.rows.len() {
            self.selected_index += 1;
        }
    }

    /// Show a notification
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    /// Drop the notification once its display time has passed
    pub fn tick(&mut self) {
        if self
            .notification
            .as_ref()
            .map(Notification::is_expired)
            .unwrap_or(false)
        {
            self.notification = None;
        }
    }
}
