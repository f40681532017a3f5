#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

fn add(store: &ExpenseStore, amount: Decimal, category: &str) -> Expense {
    store
        .insert_expense(&NewExpense {
            amount,
            category: category.into(),
            description: String::new(),
        })
        .unwrap()
}

// ── Insert and query ──────────────────────────────────────────

#[test]
fn test_insert_assigns_id_and_timestamp() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let before = Utc::now();
    let stored = store
        .insert_expense(&NewExpense {
            amount: dec!(200),
            category: "Food".into(),
            description: "lunch".into(),
        })
        .unwrap();

    assert!(stored.id.unwrap() > 0);
    assert!(stored.timestamp >= before);
    assert_eq!(stored.amount, dec!(200));
    assert_eq!(stored.category, "Food");
    assert_eq!(stored.description, "lunch");
}

#[test]
fn test_insert_exactly_one_row() {
    let store = ExpenseStore::open_in_memory().unwrap();
    assert_eq!(store.expense_count().unwrap(), 0);

    add(&store, dec!(200), "Food");
    assert_eq!(store.expense_count().unwrap(), 1);

    let all = store.expenses().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, dec!(200));
    assert_eq!(all[0].category, "Food");
}

#[test]
fn test_repeated_submission_not_deduplicated() {
    // No duplicate guard: the same input twice produces two records.
    let store = ExpenseStore::open_in_memory().unwrap();
    add(&store, dec!(50), "Travel");
    add(&store, dec!(50), "Travel");
    assert_eq!(store.expense_count().unwrap(), 2);
}

#[test]
fn test_expenses_newest_first() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let first = add(&store, dec!(10), "Food");
    let second = add(&store, dec!(20), "Travel");
    let third = add(&store, dec!(30), "Bills");

    let all = store.expenses().unwrap();
    assert_eq!(all.len(), 3);
    // Inserts land in the same instant in tests; the id tiebreak keeps
    // newest-first deterministic.
    assert_eq!(all[0].id, third.id);
    assert_eq!(all[1].id, second.id);
    assert_eq!(all[2].id, first.id);
}

#[test]
fn test_timestamp_roundtrip() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let stored = add(&store, dec!(5), "Food");
    let fetched = &store.expenses().unwrap()[0];
    assert_eq!(fetched.timestamp, stored.timestamp);
}

#[test]
fn test_decimal_precision_preserved() {
    let store = ExpenseStore::open_in_memory().unwrap();
    add(&store, dec!(1234.5678), "Shopping");
    let fetched = &store.expenses().unwrap()[0];
    assert_eq!(fetched.amount, dec!(1234.5678));
}

#[test]
fn test_unlisted_category_stored_as_is() {
    let store = ExpenseStore::open_in_memory().unwrap();
    add(&store, dec!(75), "Pets");
    assert_eq!(store.expenses().unwrap()[0].category, "Pets");
}

// ── Snapshot subscriptions ────────────────────────────────────

#[test]
fn test_subscribe_delivers_current_contents() {
    let store = ExpenseStore::open_in_memory().unwrap();
    add(&store, dec!(10), "Food");

    let sub = store.subscribe().unwrap();
    let snapshot = sub.latest().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].amount, dec!(10));
}

#[test]
fn test_insert_pushes_fresh_snapshot() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let sub = store.subscribe().unwrap();
    sub.latest(); // drain the initial snapshot

    add(&store, dec!(20), "Travel");
    let snapshot = sub.latest().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].category, "Travel");
}

#[test]
fn test_latest_returns_last_queued_snapshot() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let sub = store.subscribe().unwrap();
    sub.latest();

    add(&store, dec!(10), "Food");
    add(&store, dec!(20), "Travel");
    add(&store, dec!(30), "Bills");

    // Three snapshots queued; only the last one matters.
    let snapshot = sub.latest().unwrap();
    assert_eq!(snapshot.len(), 3);
    assert!(sub.latest().is_none());
}

#[test]
fn test_latest_none_when_quiet() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let sub = store.subscribe().unwrap();
    sub.latest();
    assert!(sub.latest().is_none());
}

#[test]
fn test_multiple_subscribers_all_notified() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let sub_a = store.subscribe().unwrap();
    let sub_b = store.subscribe().unwrap();
    sub_a.latest();
    sub_b.latest();

    add(&store, dec!(5), "Food");
    assert_eq!(sub_a.latest().unwrap().len(), 1);
    assert_eq!(sub_b.latest().unwrap().len(), 1);
}

#[test]
fn test_drop_unregisters_listener() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let sub_a = store.subscribe().unwrap();
    let sub_b = store.subscribe().unwrap();
    assert_eq!(store.listener_count(), 2);

    drop(sub_a);
    assert_eq!(store.listener_count(), 1);

    // The surviving subscription still receives snapshots.
    sub_b.latest();
    add(&store, dec!(5), "Food");
    assert_eq!(sub_b.latest().unwrap().len(), 1);

    drop(sub_b);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn test_insert_with_no_listeners() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let sub = store.subscribe().unwrap();
    drop(sub);
    // Notification with an empty registry is a no-op, not an error.
    add(&store, dec!(5), "Food");
    assert_eq!(store.expense_count().unwrap(), 1);
}

// ── Budget setting ────────────────────────────────────────────

#[test]
fn test_budget_unset_by_default() {
    let store = ExpenseStore::open_in_memory().unwrap();
    assert!(store.monthly_budget().unwrap().is_none());
}

#[test]
fn test_budget_set_and_get() {
    let store = ExpenseStore::open_in_memory().unwrap();
    store.set_monthly_budget(dec!(1000)).unwrap();
    assert_eq!(store.monthly_budget().unwrap(), Some(dec!(1000)));
}

#[test]
fn test_budget_last_write_wins() {
    let store = ExpenseStore::open_in_memory().unwrap();
    store.set_monthly_budget(dec!(1000)).unwrap();
    store.set_monthly_budget(dec!(2500.50)).unwrap();
    assert_eq!(store.monthly_budget().unwrap(), Some(dec!(2500.50)));

    // Still a single row; no history is kept.
    let rows: i64 = store
        .conn
        .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_budget_does_not_notify_expense_listeners() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let sub = store.subscribe().unwrap();
    sub.latest();
    store.set_monthly_budget(dec!(1000)).unwrap();
    assert!(sub.latest().is_none());
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_to_csv() {
    let store = ExpenseStore::open_in_memory().unwrap();
    add(&store, dec!(200), "Food");
    add(&store, dec!(49.50), "Travel");

    let file = NamedTempFile::new().unwrap();
    let count = store.export_to_csv(file.path()).unwrap();
    assert_eq!(count, 2);

    let contents = std::fs::read_to_string(file.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3); // header + 2 rows
    assert_eq!(lines[0], "timestamp,category,description,amount");
    // Newest first
    assert!(lines[1].contains("Travel"));
    assert!(lines[2].contains("Food"));
}

#[test]
fn test_export_empty_ledger() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let file = NamedTempFile::new().unwrap();
    let count = store.export_to_csv(file.path()).unwrap();
    assert_eq!(count, 0);

    let contents = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(contents.lines().count(), 1); // header only
}

// ── Schema migration ──────────────────────────────────────────

#[test]
fn test_schema_version_set() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let version: i32 = store
        .conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_double_migrate_idempotent() {
    let mut store = ExpenseStore::open_in_memory().unwrap();
    // Running migrate again should not fail
    store.migrate().unwrap();
    let version: i32 = store
        .conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}
