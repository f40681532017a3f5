use ratatui::style::Color;
use rust_decimal::Decimal;

use crate::models::{Category, Expense};

/// Per-category running sum with its chart color. Derived from the mirror,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    pub(crate) color: Color,
}

/// Per-calendar-day running sum in local time. Derived from the mirror,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DailyTotal {
    pub(crate) date: String,
    pub(crate) total: Decimal,
}

/// Fixed chart palette. The picker categories own the first five slots, in
/// `Category::all()` order; other labels cycle through the palette by
/// first-seen position. Colors depend only on the list contents, never on
/// render timing.
pub(crate) const PALETTE: [Color; 8] = [
    Color::Rgb(243, 139, 168), // Food
    Color::Rgb(137, 180, 250), // Travel
    Color::Rgb(249, 226, 175), // Bills
    Color::Rgb(203, 166, 247), // Shopping
    Color::Rgb(148, 226, 213), // Other
    Color::Rgb(250, 179, 135),
    Color::Rgb(166, 227, 161),
    Color::Rgb(116, 199, 236),
];

pub(crate) fn display_color(category: &str, first_seen: usize) -> Color {
    match Category::parse(category) {
        Some(cat) => PALETTE[cat as usize],
        None => PALETTE[first_seen % PALETTE.len()],
    }
}

/// One total per distinct category, in the order categories first appear
/// while scanning the newest-first list. Categories only show up once a
/// record exists, so no entry is ever zero.
pub(crate) fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for exp in expenses {
        match totals.iter_mut().find(|t| t.category == exp.category) {
            Some(entry) => entry.total += exp.amount,
            None => {
                let color = display_color(&exp.category, totals.len());
                totals.push(CategoryTotal {
                    category: exp.category.clone(),
                    total: exp.amount,
                    color,
                });
            }
        }
    }
    totals
}

/// One total per local calendar day, in the order days first appear while
/// scanning the newest-first list - most recent day first, not calendar
/// order.
pub(crate) fn daily_totals(expenses: &[Expense]) -> Vec<DailyTotal> {
    let mut totals: Vec<DailyTotal> = Vec::new();
    for exp in expenses {
        let date = exp.local_date();
        match totals.iter_mut().find(|t| t.date == date) {
            Some(entry) => entry.total += exp.amount,
            None => totals.push(DailyTotal {
                date,
                total: exp.amount,
            }),
        }
    }
    totals
}

/// Sum of every amount in the list, all time.
pub(crate) fn total_spent(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Budget minus total spend. Negative means over budget and is displayed
/// as-is, without enforcement.
pub(crate) fn remaining_budget(budget: Decimal, spent: Decimal) -> Decimal {
    budget - spent
}
