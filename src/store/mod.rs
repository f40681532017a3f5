mod schema;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::path::Path;
use std::rc::{Rc, Weak};
use std::str::FromStr;
use std::sync::mpsc;

use crate::models::{Expense, NewExpense};

/// Snapshot listeners registered on the expense collection. Senders are
/// pruned when their handle is dropped or their receiver hangs up.
#[derive(Default)]
struct Listeners {
    next_token: u64,
    senders: Vec<(u64, mpsc::Sender<Vec<Expense>>)>,
}

/// A live snapshot listener on the expense collection.
///
/// The store delivers the full current result set once on subscribe and
/// again after every insert. Dropping the handle unregisters the listener,
/// so a subscription held by a view is released when the view goes away and
/// no further snapshots arrive after that point.
pub(crate) struct ExpenseSubscription {
    token: u64,
    rx: mpsc::Receiver<Vec<Expense>>,
    listeners: Weak<RefCell<Listeners>>,
}

impl ExpenseSubscription {
    /// The most recent queued snapshot, if any arrived since the last call.
    /// Intermediate snapshots are discarded; the last one wins.
    pub(crate) fn latest(&self) -> Option<Vec<Expense>> {
        let mut latest = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            latest = Some(snapshot);
        }
        latest
    }
}

impl Drop for ExpenseSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .senders
                .retain(|(token, _)| *token != self.token);
        }
    }
}

pub(crate) struct ExpenseStore {
    conn: Connection,
    listeners: Rc<RefCell<Listeners>>,
}

impl ExpenseStore {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut store = Self {
            conn,
            listeners: Rc::new(RefCell::new(Listeners::default())),
        };
        store.migrate().context("Database migration failed")?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut store = Self {
            conn,
            listeners: Rc::new(RefCell::new(Listeners::default())),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    /// Append a validated expense. The identifier and timestamp are
    /// assigned here, and every live subscription receives a fresh snapshot
    /// before this returns. There is no update or delete counterpart.
    pub(crate) fn insert_expense(&self, entry: &NewExpense) -> Result<Expense> {
        let timestamp = Utc::now();
        self.conn.execute(
            "INSERT INTO expenses (amount, category, description, timestamp)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.amount.to_string(),
                entry.category,
                entry.description,
                timestamp,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.notify_listeners()?;
        Ok(Expense {
            id: Some(id),
            amount: entry.amount,
            category: entry.category.clone(),
            description: entry.description.clone(),
            timestamp,
        })
    }

    /// The full collection, newest first. Ties on timestamp fall back to
    /// insertion order.
    pub(crate) fn expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, category, description, timestamp
             FROM expenses ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(1)?;
            Ok(Expense {
                id: Some(row.get(0)?),
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                category: row.get(2)?,
                description: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    #[cfg(test)]
    pub(crate) fn expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    // ── Snapshot subscriptions ────────────────────────────────

    /// Register a listener on the expense collection. The current contents
    /// are delivered immediately; after that, every insert pushes a full
    /// fresh snapshot. Drop the returned handle to unsubscribe.
    pub(crate) fn subscribe(&self) -> Result<ExpenseSubscription> {
        let (tx, rx) = mpsc::channel();
        // The receiver can't have hung up yet, so this send can't fail.
        tx.send(self.expenses()?).ok();
        let token = {
            let mut listeners = self.listeners.borrow_mut();
            let token = listeners.next_token;
            listeners.next_token += 1;
            listeners.senders.push((token, tx));
            token
        };
        Ok(ExpenseSubscription {
            token,
            rx,
            listeners: Rc::downgrade(&self.listeners),
        })
    }

    fn notify_listeners(&self) -> Result<()> {
        if self.listeners.borrow().senders.is_empty() {
            return Ok(());
        }
        let snapshot = self.expenses()?;
        self.listeners
            .borrow_mut()
            .senders
            .retain(|(_, tx)| tx.send(snapshot.clone()).is_ok());
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().senders.len()
    }

    // ── Budget setting ────────────────────────────────────────

    /// The persisted monthly budget, if one has been set.
    pub(crate) fn monthly_budget(&self) -> Result<Option<Decimal>> {
        let result = self.conn.query_row(
            "SELECT value FROM settings WHERE key = 'monthly_budget'",
            [],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(value) => Ok(Some(Decimal::from_str(&value).unwrap_or_default())),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the monthly budget. Last write wins; no history is kept.
    pub(crate) fn set_monthly_budget(&self, amount: Decimal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES ('monthly_budget', ?1)
             ON CONFLICT(key) DO UPDATE SET value = ?1",
            params![amount.to_string()],
        )?;
        Ok(())
    }

    // ── Export ────────────────────────────────────────────────

    /// Write the full ledger, newest first, to a CSV file.
    /// Returns the number of rows written.
    pub(crate) fn export_to_csv(&self, path: &Path) -> Result<usize> {
        let expenses = self.expenses()?;
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        writer.write_record(["timestamp", "category", "description", "amount"])?;
        for exp in &expenses {
            writer.write_record([
                exp.timestamp.to_rfc3339(),
                exp.category.clone(),
                exp.description.clone(),
                exp.amount.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(expenses.len())
    }
}

#[cfg(test)]
mod tests;
