use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::{App, Screen};
use crate::store::ExpenseStore;
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut ExpenseStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SpendTUI", cmd_quit, r);
    register_command!("quit", "Quit SpendTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("a", "Go to Add Expense", cmd_add, r);
    register_command!("add", "Go to Add Expense", cmd_add, r);
    register_command!("x", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget 10000)",
        cmd_budget,
        r
    );
    register_command!("save", "Save the expense form", cmd_save, r);
    register_command!("clear", "Clear the expense form", cmd_clear, r);
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!("live", "Pause or resume live updates", cmd_live, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &mut ExpenseStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.screen = Screen::Entry;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    if args.is_empty() {
        match app.monthly_budget {
            Some(budget) => app.set_status(format!("Monthly budget: {}", format_amount(budget))),
            None => app.set_status("No budget set. Usage: :budget <amount>"),
        }
        return Ok(());
    }

    let amount = match Decimal::from_str(args) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {args}"));
            return Ok(());
        }
    };

    store.set_monthly_budget(amount)?;
    app.monthly_budget = Some(amount);
    app.screen = Screen::Dashboard;
    app.set_status(format!("Monthly budget set to {}", format_amount(amount)));
    Ok(())
}

fn cmd_save(_args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.submit_expense(store)
}

fn cmd_clear(_args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.clear_entry_form();
    app.set_status("Form cleared");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/spendtui-export.csv")
    } else {
        crate::run::shellexpand(args)
    };

    let count = store.export_to_csv(std::path::Path::new(&path))?;
    if count == 0 {
        app.set_status("No expenses to export");
    } else {
        app.set_status(format!("Exported {count} expenses to {path}"));
    }
    Ok(())
}

fn cmd_live(_args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    if app.mirror.is_live() {
        app.mirror.detach();
        app.set_status("Live updates paused. :live to resume");
    } else {
        app.mirror.attach(store.subscribe()?);
        app.pump();
        app.set_status("Live updates resumed");
    }
    Ok(())
}
