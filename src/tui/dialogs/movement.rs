//! Movement entry/edit dialog
//!
//! Modal form for the quick-entry flow and inline edits: description, amount,
//! kind, payment method, date, and check metadata when the method is check.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{CheckDetail, Money, Movement, MovementKind, PaymentMethod};
use crate::services::MovementInput;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Which field is currently focused in the movement form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementField {
    Date,
    #[default]
    Description,
    Amount,
    Kind,
    Method,
    CheckNumber,
    CheckIssuer,
    CheckIssueDate,
    CheckDueDate,
}

impl MovementField {
    fn next(self, with_check: bool) -> Self {
        match self {
            Self::Date => Self::Description,
            Self::Description => Self::Amount,
            Self::Amount => Self::Kind,
            Self::Kind => Self::Method,
            Self::Method => {
                if with_check {
                    Self::CheckNumber
                } else {
                    Self::Date
                }
            }
            Self::CheckNumber => Self::CheckIssuer,
            Self::CheckIssuer => Self::CheckIssueDate,
            Self::CheckIssueDate => Self::CheckDueDate,
            Self::CheckDueDate => Self::Date,
        }
    }

    fn prev(self, with_check: bool) -> Self {
        match self {
            Self::Date => {
                if with_check {
                    Self::CheckDueDate
                } else {
                    Self::Method
                }
            }
            Self::Description => Self::Date,
            Self::Amount => Self::Description,
            Self::Kind => Self::Amount,
            Self::Method => Self::Kind,
            Self::CheckNumber => Self::Method,
            Self::CheckIssuer => Self::CheckNumber,
            Self::CheckIssueDate => Self::CheckIssuer,
            Self::CheckDueDate => Self::CheckIssueDate,
        }
    }
}

/// State for the movement form dialog
#[derive(Debug, Clone)]
pub struct MovementFormState {
    /// Currently focused field
    pub focused_field: MovementField,

    /// Business date input (YYYY-MM-DD)
    pub date_input: TextInput,

    /// Description input
    pub description_input: TextInput,

    /// Amount input
    pub amount_input: TextInput,

    /// Income or expense
    pub kind: MovementKind,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Check metadata inputs, active only when the method is check
    pub check_number_input: TextInput,
    pub check_issuer_input: TextInput,
    pub check_issue_date_input: TextInput,
    pub check_due_date_input: TextInput,

    /// Whether this is an edit (vs new movement)
    pub is_edit: bool,

    /// Field-level error message to display
    pub error_message: Option<String>,
}

impl MovementFormState {
    /// Fresh form for the quick-entry flow, dated to the displayed day
    pub fn new(date: NaiveDate) -> Self {
        let mut state = Self {
            focused_field: MovementField::Description,
            date_input: TextInput::new()
                .label("Date")
                .content(date.format("%Y-%m-%d").to_string()),
            description_input: TextInput::new()
                .label("Description")
                .placeholder("What was it for?"),
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            kind: MovementKind::Income,
            payment_method: PaymentMethod::Cash,
            check_number_input: TextInput::new().label("Check #"),
            check_issuer_input: TextInput::new().label("Issuer"),
            check_issue_date_input: TextInput::new()
                .label("Issued")
                .placeholder("YYYY-MM-DD"),
            check_due_date_input: TextInput::new().label("Due").placeholder("YYYY-MM-DD"),
            is_edit: false,
            error_message: None,
        };
        state.update_focus();
        state
    }

    /// Form pre-populated from an existing movement
    pub fn from_movement(movement: &Movement) -> Self {
        let mut state = Self::new(movement.date);
        state.is_edit = true;
        state.description_input = TextInput::new()
            .label("Description")
            .content(&movement.description);
        state.amount_input = TextInput::new()
            .label("Amount")
            .content(movement.amount.to_decimal_string());
        state.kind = movement.kind;
        state.payment_method = movement.payment_method;

        if let Some(detail) = &movement.check_detail {
            state.check_number_input = TextInput::new().label("Check #").content(&detail.number);
            state.check_issuer_input = TextInput::new().label("Issuer").content(&detail.issuer);
            if let Some(date) = detail.issue_date {
                state.check_issue_date_input =
                    TextInput::new().label("Issued").content(date.to_string());
            }
            if let Some(date) = detail.due_date {
                state.check_due_date_input =
                    TextInput::new().label("Due").content(date.to_string());
            }
        }

        state.update_focus();
        state
    }

    fn with_check(&self) -> bool {
        self.payment_method == PaymentMethod::Check
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next(self.with_check());
        self.update_focus();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev(self.with_check());
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.date_input.focused = self.focused_field == MovementField::Date;
        self.description_input.focused = self.focused_field == MovementField::Description;
        self.amount_input.focused = self.focused_field == MovementField::Amount;
        self.check_number_input.focused = self.focused_field == MovementField::CheckNumber;
        self.check_issuer_input.focused = self.focused_field == MovementField::CheckIssuer;
        self.check_issue_date_input.focused = self.focused_field == MovementField::CheckIssueDate;
        self.check_due_date_input.focused = self.focused_field == MovementField::CheckDueDate;
    }

    /// The text input under focus, if the focused field has one
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            MovementField::Date => Some(&mut self.date_input),
            MovementField::Description => Some(&mut self.description_input),
            MovementField::Amount => Some(&mut self.amount_input),
            MovementField::Kind | MovementField::Method => None,
            MovementField::CheckNumber => Some(&mut self.check_number_input),
            MovementField::CheckIssuer => Some(&mut self.check_issuer_input),
            MovementField::CheckIssueDate => Some(&mut self.check_issue_date_input),
            MovementField::CheckDueDate => Some(&mut self.check_due_date_input),
        }
    }

    /// Toggle income/expense
    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            MovementKind::Income => MovementKind::Expense,
            MovementKind::Expense => MovementKind::Income,
        };
    }

    /// Cycle through payment methods. Leaving check clears the check inputs:
    /// the detail is dropped, not parked.
    pub fn cycle_method(&mut self) {
        let all = PaymentMethod::ALL;
        let index = all
            .iter()
            .position(|m| *m == self.payment_method)
            .unwrap_or(0);
        self.payment_method = all[(index + 1) % all.len()];

        if !self.with_check() {
            self.check_number_input.clear();
            self.check_issuer_input.clear();
            self.check_issue_date_input.clear();
            self.check_due_date_input.clear();
            if matches!(
                self.focused_field,
                MovementField::CheckNumber
                    | MovementField::CheckIssuer
                    | MovementField::CheckIssueDate
                    | MovementField::CheckDueDate
            ) {
                self.focused_field = MovementField::Method;
                self.update_focus();
            }
        }
    }

    /// Validate the form and build the service input.
    ///
    /// Returns a field-level error message on the first violation; nothing
    /// reaches the store until this succeeds.
    pub fn build_input(&self) -> Result<MovementInput, String> {
        let date = NaiveDate::parse_from_str(self.date_input.value().trim(), "%Y-%m-%d")
            .map_err(|_| "Invalid date format. Use YYYY-MM-DD".to_string())?;

        let description = self.description_input.value().trim().to_string();
        if description.is_empty() {
            return Err("Description cannot be empty".to_string());
        }

        let amount = Money::parse(self.amount_input.value())
            .map_err(|_| "Amount must be a number".to_string())?;
        if !amount.is_positive() {
            return Err("Amount must be greater than zero".to_string());
        }

        let check_detail = if self.with_check() {
            let issue_date = parse_optional_date(self.check_issue_date_input.value())
                .map_err(|_| "Invalid check issue date. Use YYYY-MM-DD".to_string())?;
            let due_date = parse_optional_date(self.check_due_date_input.value())
                .map_err(|_| "Invalid check due date. Use YYYY-MM-DD".to_string())?;
            Some(CheckDetail {
                number: self.check_number_input.value().trim().to_string(),
                issuer: self.check_issuer_input.value().trim().to_string(),
                issue_date,
                due_date,
            })
        } else {
            None
        };

        Ok(MovementInput {
            description,
            amount,
            kind: self.kind,
            payment_method: self.payment_method,
            check_detail,
            date,
        })
    }
}

fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map(Some)
}

/// Render the movement form dialog
pub fn render(frame: &mut Frame, form: &MovementFormState) {
    let title = if form.is_edit {
        " Edit Movement "
    } else {
        " Add Movement "
    };

    let height = if form.payment_method == PaymentMethod::Check {
        15
    } else {
        11
    };
    let area = centered_rect_fixed(52, height, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![
        Constraint::Length(1), // Date
        Constraint::Length(1), // Description
        Constraint::Length(1), // Amount
        Constraint::Length(1), // Kind
        Constraint::Length(1), // Method
    ];
    if form.payment_method == PaymentMethod::Check {
        constraints.extend([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ]);
    }
    constraints.extend([Constraint::Length(1), Constraint::Length(1)]); // error + hints

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    frame.render_widget(&form.date_input, rows[0]);
    frame.render_widget(&form.description_input, rows[1]);
    frame.render_widget(&form.amount_input, rows[2]);

    render_choice(
        frame,
        rows[3],
        "Type",
        &form.kind.to_string(),
        form.focused_field == MovementField::Kind,
    );
    render_choice(
        frame,
        rows[4],
        "Method",
        &form.payment_method.to_string(),
        form.focused_field == MovementField::Method,
    );

    let mut next = 5;
    if form.payment_method == PaymentMethod::Check {
        frame.render_widget(&form.check_number_input, rows[next]);
        frame.render_widget(&form.check_issuer_input, rows[next + 1]);
        frame.render_widget(&form.check_issue_date_input, rows[next + 2]);
        frame.render_widget(&form.check_due_date_input, rows[next + 3]);
        next += 4;
    }

    if let Some(error) = &form.error_message {
        let line = Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), rows[next]);
    }

    let hints = Line::from(Span::styled(
        "Tab: next  Space: toggle choice  Enter: save  Esc: cancel",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(hints), rows[next + 1]);
}

fn render_choice(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let line = Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Cyan)),
        Span::raw(": "),
        Span::styled(format!("< {} >", value), value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn filled_form() -> MovementFormState {
        let mut form = MovementFormState::new(day(10));
        form.description_input = TextInput::new().content("Sale deposit");
        form.amount_input = TextInput::new().content("2500.00");
        form
    }

    #[test]
    fn test_build_input() {
        let input = filled_form().build_input().unwrap();
        assert_eq!(input.description, "Sale deposit");
        assert_eq!(input.amount.cents(), 250_000);
        assert_eq!(input.date, day(10));
        assert!(input.check_detail.is_none());
    }

    #[test]
    fn test_empty_description_rejected() {
        let mut form = filled_form();
        form.description_input.clear();
        let err = form.build_input().unwrap_err();
        assert!(err.contains("Description"));
    }

    #[test]
    fn test_bad_amount_rejected() {
        let mut form = filled_form();
        form.amount_input = TextInput::new().content("abc");
        assert!(form.build_input().unwrap_err().contains("number"));

        form.amount_input = TextInput::new().content("0");
        assert!(form.build_input().unwrap_err().contains("greater than zero"));
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut form = filled_form();
        form.date_input = TextInput::new().content("10/03/2025");
        assert!(form.build_input().unwrap_err().contains("date"));
    }

    #[test]
    fn test_check_fields_travel_only_with_check() {
        let mut form = filled_form();
        form.payment_method = PaymentMethod::Check;
        form.check_number_input = TextInput::new().content("4471");

        let input = form.build_input().unwrap();
        assert_eq!(input.check_detail.unwrap().number, "4471");

        // Cycling away from check drops the metadata
        let mut form = filled_form();
        form.payment_method = PaymentMethod::Check;
        form.check_number_input = TextInput::new().content("4471");
        form.cycle_method(); // Check -> Other
        assert_eq!(form.payment_method, PaymentMethod::Other);
        assert_eq!(form.check_number_input.value(), "");
        assert!(form.build_input().unwrap().check_detail.is_none());
    }

    #[test]
    fn test_field_navigation_skips_check_fields_for_cash() {
        let mut form = MovementFormState::new(day(1));
        form.focused_field = MovementField::Method;
        form.next_field();
        assert_eq!(form.focused_field, MovementField::Date);

        form.payment_method = PaymentMethod::Check;
        form.focused_field = MovementField::Method;
        form.next_field();
        assert_eq!(form.focused_field, MovementField::CheckNumber);
    }

    #[test]
    fn test_toggle_kind() {
        let mut form = MovementFormState::new(day(1));
        assert_eq!(form.kind, MovementKind::Income);
        form.toggle_kind();
        assert_eq!(form.kind, MovementKind::Expense);
    }

    #[test]
    fn test_from_movement() {
        let mut movement = Movement::new(
            "Check payment",
            Money::from_cents(50_000),
            MovementKind::Expense,
            PaymentMethod::Check,
            day(8),
        );
        movement.check_detail = Some(CheckDetail {
            number: "4471".to_string(),
            issuer: "Banco Norte".to_string(),
            issue_date: Some(day(8)),
            due_date: None,
        });

        let form = MovementFormState::from_movement(&movement);
        assert!(form.is_edit);
        assert_eq!(form.description_input.value(), "Check payment");
        assert_eq!(form.amount_input.value(), "500.00");
        assert_eq!(form.check_number_input.value(), "4471");
        assert_eq!(form.check_issue_date_input.value(), "2025-03-08");
    }
}
