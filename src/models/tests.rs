#![allow(clippy::unwrap_used)]

use chrono::Utc;
use rust_decimal_macros::dec;

use super::*;

// ── NewExpense validation ─────────────────────────────────────

#[test]
fn test_rejects_empty_amount() {
    assert!(NewExpense::from_input("", "Food", "lunch").is_err());
}

#[test]
fn test_rejects_blank_amount() {
    assert!(NewExpense::from_input("   ", "Food", "").is_err());
}

#[test]
fn test_rejects_empty_category() {
    assert!(NewExpense::from_input("200", "", "").is_err());
    assert!(NewExpense::from_input("200", "  ", "").is_err());
}

#[test]
fn test_rejects_non_numeric_amount() {
    assert!(NewExpense::from_input("abc", "Food", "").is_err());
    assert!(NewExpense::from_input("12.3.4", "Food", "").is_err());
    assert!(NewExpense::from_input("₹200", "Food", "").is_err());
}

#[test]
fn test_accepts_valid_input() {
    let entry = NewExpense::from_input("200", "Food", "lunch").unwrap();
    assert_eq!(entry.amount, dec!(200));
    assert_eq!(entry.category, "Food");
    assert_eq!(entry.description, "lunch");
}

#[test]
fn test_trims_fields() {
    let entry = NewExpense::from_input(" 49.50 ", " Travel ", "  bus fare  ").unwrap();
    assert_eq!(entry.amount, dec!(49.50));
    assert_eq!(entry.category, "Travel");
    assert_eq!(entry.description, "bus fare");
}

#[test]
fn test_description_may_be_empty() {
    let entry = NewExpense::from_input("10", "Bills", "").unwrap();
    assert!(entry.description.is_empty());
}

#[test]
fn test_accepts_unlisted_category() {
    // The storage set is open; only the picker is closed.
    let entry = NewExpense::from_input("75", "Pets", "kibble").unwrap();
    assert_eq!(entry.category, "Pets");
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_local_date_shape() {
    let exp = Expense {
        id: Some(1),
        amount: dec!(5),
        category: "Food".into(),
        description: String::new(),
        timestamp: Utc::now(),
    };
    let date = exp.local_date();
    assert_eq!(date.len(), 10);
    assert_eq!(&date[4..5], "-");
    assert_eq!(&date[7..8], "-");
}

#[test]
fn test_local_time_shape() {
    let exp = Expense {
        id: None,
        amount: dec!(5),
        category: "Food".into(),
        description: String::new(),
        timestamp: Utc::now(),
    };
    let time = exp.local_time();
    assert_eq!(time.len(), 5);
    assert_eq!(&time[2..3], ":");
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("food"), Some(Category::Food));
    assert_eq!(Category::parse("FOOD"), Some(Category::Food));
    assert_eq!(Category::parse(" travel "), Some(Category::Travel));
    assert_eq!(Category::parse("bills"), Some(Category::Bills));
    assert_eq!(Category::parse("shopping"), Some(Category::Shopping));
    assert_eq!(Category::parse("other"), Some(Category::Other));
    assert_eq!(Category::parse("rent"), None);
}

#[test]
fn test_category_normalize() {
    assert_eq!(Category::normalize("food"), "Food");
    assert_eq!(Category::normalize("SHOPPING"), "Shopping");
    assert_eq!(Category::normalize(" Pets "), "Pets");
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", Category::Food), "Food");
    assert_eq!(format!("{}", Category::Shopping), "Shopping");
}

#[test]
fn test_category_roundtrip() {
    // Every picker entry should roundtrip through as_str -> parse
    for cat in Category::all() {
        assert_eq!(Category::parse(cat.as_str()), Some(*cat));
    }
}

#[test]
fn test_category_all() {
    let all = Category::all();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0], Category::Food);
    assert_eq!(all[4], Category::Other);
}
