use anyhow::Result;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::ledger;
use crate::models::{Category, NewExpense};
use crate::store::ExpenseStore;

pub(crate) fn as_cli(args: &[String], store: &mut ExpenseStore) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], store),
        "list" | "ls" => cli_list(store),
        "summary" | "s" => cli_summary(store),
        "budget" => cli_budget(&args[2..], store),
        "export" => cli_export(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendtui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendTUI - live expense ledger and budget tracker");
    println!();
    println!("Usage: spendtui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <amount> <category> [description]");
    println!("                                Record an expense");
    println!("  list                          List all expenses, newest first");
    println!("  summary                       Print spending summary");
    println!("  budget [amount]               Show or set the monthly budget");
    println!("  export [path]                 Export expenses to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_add(args: &[String], store: &mut ExpenseStore) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: spendtui add <amount> <category> [description]");
    }

    let category = Category::normalize(&args[1]);
    let description = args[2..].join(" ");
    let entry = NewExpense::from_input(&args[0], &category, &description)?;

    let saved = store.insert_expense(&entry)?;
    println!(
        "Saved ₹{:.2} - {} ({})",
        saved.amount,
        saved.category,
        saved.local_date()
    );
    Ok(())
}

fn cli_list(store: &mut ExpenseStore) -> Result<()> {
    let expenses = store.expenses()?;
    if expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<12} {:<6} {:<12} {:<30} Amount",
        "Date", "Time", "Category", "Description"
    );
    println!("{}", "─".repeat(72));
    for exp in &expenses {
        println!(
            "{:<12} {:<6} {:<12} {:<30} ₹{:.2}",
            exp.local_date(),
            exp.local_time(),
            exp.category,
            exp.description,
            exp.amount,
        );
    }
    Ok(())
}

fn cli_summary(store: &mut ExpenseStore) -> Result<()> {
    let expenses = store.expenses()?;
    let spent = ledger::total_spent(&expenses);
    let by_category = ledger::category_totals(&expenses);
    let by_day = ledger::daily_totals(&expenses);

    println!("SpendTUI - all time");
    println!("{}", "─".repeat(40));
    println!("  Spent:      ₹{spent:.2}");
    match store.monthly_budget()? {
        Some(budget) => {
            println!("  Budget:     ₹{budget:.2}");
            println!(
                "  Remaining:  ₹{:.2}",
                ledger::remaining_budget(budget, spent)
            );
        }
        None => println!("  Budget:     not set"),
    }
    println!("  Entries:    {}", expenses.len());

    if !by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for t in &by_category {
            println!("  {:<24} ₹{:.2}", t.category, t.total);
        }
    }

    if !by_day.is_empty() {
        println!();
        println!("Spending by Day (most recent first):");
        for d in by_day.iter().take(14) {
            println!("  {:<24} ₹{:.2}", d.date, d.total);
        }
    }

    Ok(())
}

fn cli_budget(args: &[String], store: &mut ExpenseStore) -> Result<()> {
    match args.first() {
        Some(raw) => {
            let amount =
                Decimal::from_str(raw).map_err(|_| anyhow::anyhow!("Invalid amount: {raw}"))?;
            store.set_monthly_budget(amount)?;
            println!("Monthly budget set to ₹{amount:.2}");
        }
        None => match store.monthly_budget()? {
            Some(budget) => println!("Monthly budget: ₹{budget:.2}"),
            None => println!("No budget set. Usage: spendtui budget <amount>"),
        },
    }
    Ok(())
}

fn cli_export(args: &[String], store: &mut ExpenseStore) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/spendtui-export.csv")
        });

    let count = store.export_to_csv(Path::new(&output_path))?;
    if count == 0 {
        println!("No expenses to export");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
