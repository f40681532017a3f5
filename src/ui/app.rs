use anyhow::Result;
use rust_decimal::Decimal;

use crate::ledger::{self, CategoryTotal, DailyTotal, LedgerMirror};
use crate::models::{Category, NewExpense};
use crate::store::ExpenseStore;
use crate::ui::util::format_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Entry,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Entry, Self::Expenses]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Entry => write!(f, "Add Expense"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
        }
    }
}

/// Form field currently focused on the Add Expense screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryField {
    Amount,
    Category,
    Description,
}

impl EntryField {
    pub(crate) fn all() -> &'static [EntryField] {
        &[Self::Amount, Self::Category, Self::Description]
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Live ledger view
    pub(crate) mirror: LedgerMirror,
    pub(crate) category_totals: Vec<CategoryTotal>,
    pub(crate) daily_totals: Vec<DailyTotal>,
    pub(crate) total_spent: Decimal,
    pub(crate) monthly_budget: Option<Decimal>,

    // Entry form
    pub(crate) entry_field: EntryField,
    pub(crate) amount_input: String,
    pub(crate) category_choice: Option<usize>,
    pub(crate) description_input: String,

    // Expenses list
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            mirror: LedgerMirror::new(),
            category_totals: Vec::new(),
            daily_totals: Vec::new(),
            total_spent: Decimal::ZERO,
            monthly_budget: None,

            entry_field: EntryField::Amount,
            amount_input: String::new(),
            category_choice: None,
            description_input: String::new(),

            expense_index: 0,
            expense_scroll: 0,

            visible_rows: 20,
        }
    }

    /// Open the live feed and load the persisted budget. Called once at startup.
    pub(crate) fn connect(&mut self, store: &ExpenseStore) -> Result<()> {
        self.mirror.attach(store.subscribe()?);
        self.monthly_budget = store.monthly_budget()?;
        self.pump();
        Ok(())
    }

    /// Drain queued ledger snapshots and recompute the derived totals.
    /// Returns true if the view changed.
    pub(crate) fn pump(&mut self) -> bool {
        if self.mirror.pump() {
            self.recompute();
            true
        } else {
            false
        }
    }

    fn recompute(&mut self) {
        let expenses = self.mirror.expenses();
        self.category_totals = ledger::category_totals(expenses);
        self.daily_totals = ledger::daily_totals(expenses);
        self.total_spent = ledger::total_spent(expenses);
        if self.expense_index >= expenses.len() {
            self.expense_index = expenses.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
    }

    pub(crate) fn remaining_budget(&self) -> Option<Decimal> {
        self.monthly_budget
            .map(|budget| ledger::remaining_budget(budget, self.total_spent))
    }

    pub(crate) fn selected_category(&self) -> Option<Category> {
        self.category_choice
            .and_then(|i| Category::all().get(i).copied())
    }

    pub(crate) fn cycle_category(&mut self, forward: bool) {
        let len = Category::all().len();
        self.category_choice = Some(match self.category_choice {
            None => {
                if forward {
                    0
                } else {
                    len - 1
                }
            }
            Some(i) if forward => (i + 1) % len,
            Some(0) => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Validate the form and append the expense. Bad input writes nothing;
    /// the reason lands in the status bar instead.
    pub(crate) fn submit_expense(&mut self, store: &ExpenseStore) -> Result<()> {
        let category = self
            .selected_category()
            .map(|c| c.as_str().to_string())
            .unwrap_or_default();
        let entry =
            match NewExpense::from_input(&self.amount_input, &category, &self.description_input) {
                Ok(entry) => entry,
                Err(e) => {
                    self.set_status(format!("Cannot save: {e}"));
                    return Ok(());
                }
            };

        let saved = store.insert_expense(&entry)?;
        self.clear_entry_form();
        self.pump();
        self.set_status(format!(
            "Saved {} - {}",
            format_amount(saved.amount),
            saved.category
        ));
        Ok(())
    }

    pub(crate) fn clear_entry_form(&mut self) {
        self.amount_input.clear();
        self.category_choice = None;
        self.description_input.clear();
        self.entry_field = EntryField::Amount;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
