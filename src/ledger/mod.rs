mod aggregate;

pub(crate) use aggregate::{
    category_totals, daily_totals, remaining_budget, total_spent, CategoryTotal, DailyTotal,
    PALETTE,
};

use crate::models::Expense;
use crate::store::ExpenseSubscription;

/// The view model's in-memory copy of the expense collection, kept current
/// by a snapshot subscription. Each incoming snapshot replaces the whole
/// list; there is no diffing and no merging.
pub(crate) struct LedgerMirror {
    expenses: Vec<Expense>,
    subscription: Option<ExpenseSubscription>,
}

impl LedgerMirror {
    pub(crate) fn new() -> Self {
        Self {
            expenses: Vec::new(),
            subscription: None,
        }
    }

    /// Attach a live subscription, replacing (and thereby releasing) any
    /// previous one.
    pub(crate) fn attach(&mut self, subscription: ExpenseSubscription) {
        self.subscription = Some(subscription);
    }

    /// Release the subscription. The mirror keeps its last contents but
    /// stops receiving updates.
    pub(crate) fn detach(&mut self) {
        self.subscription = None;
    }

    pub(crate) fn is_live(&self) -> bool {
        self.subscription.is_some()
    }

    /// Drain queued snapshots and keep the newest one. Returns true if the
    /// mirror contents were replaced.
    pub(crate) fn pump(&mut self) -> bool {
        let Some(subscription) = &self.subscription else {
            return false;
        };
        match subscription.latest() {
            Some(snapshot) => {
                self.expenses = snapshot;
                true
            }
            None => false,
        }
    }

    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn len(&self) -> usize {
        self.expenses.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
