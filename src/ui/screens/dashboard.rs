use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Category chart + legend
            Constraint::Length(3), // Daily spending sparkline
            Constraint::Length(3), // Budget progress
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_breakdown(f, chunks[1], app);
    render_daily_sparkline(f, chunks[2], app);
    render_budget_bar(f, chunks[3], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Spent",
        format_amount(app.total_spent),
        theme::RED,
        Some("all time".into()),
    );

    match app.monthly_budget {
        Some(budget) => render_card(
            f,
            cards[1],
            "Budget",
            format_amount(budget),
            theme::ACCENT,
            Some("monthly".into()),
        ),
        None => render_card(
            f,
            cards[1],
            "Budget",
            "not set".into(),
            theme::TEXT_DIM,
            Some(":budget <amount>".into()),
        ),
    }

    match app.remaining_budget() {
        Some(remaining) => render_card(
            f,
            cards[2],
            "Remaining",
            format_amount(remaining),
            if remaining >= Decimal::ZERO {
                theme::GREEN
            } else {
                theme::RED
            },
            Some("all time".into()),
        ),
        None => render_card(f, cards[2], "Remaining", "—".into(), theme::TEXT_DIM, None),
    }

    render_card(
        f,
        cards[3],
        "Entries",
        app.mirror.len().to_string(),
        theme::TEXT,
        None,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_category_breakdown(f: &mut Frame, area: Rect, app: &App) {
    if app.category_totals.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Spending by Category ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with :a",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_category_chart(f, halves[0], app);
    render_category_legend(f, halves[1], app);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .category_totals
        .iter()
        .take(12)
        .map(|t| {
            let val = t.total.to_u64().unwrap_or(0);
            let label = truncate(&t.category, 10);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .style(Style::default().fg(t.color))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Spending by Category ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_category_legend(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .category_totals
        .iter()
        .map(|t| {
            let pct = if app.total_spent.is_zero() {
                0.0
            } else {
                (t.total / app.total_spent).to_f64().unwrap_or(0.0) * 100.0
            };
            let name = truncate(&t.category, 14);
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(t.color)),
                Span::styled(format!("{name:<15}"), theme::normal_style()),
                Span::styled(format_amount(t.total), theme::normal_style()),
                Span::styled(format!("  {pct:.0}%"), theme::dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Totals ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_daily_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<u64> = app
        .daily_totals
        .iter()
        .map(|d| d.total.to_u64().unwrap_or(0))
        .collect();

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Daily Spending (most recent first) ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}

fn render_budget_bar(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Monthly Budget ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let Some(budget) = app.monthly_budget else {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No budget set. :budget <amount> to track what's left",
            theme::dim_style(),
        )))
        .block(block);
        f.render_widget(msg, area);
        return;
    };

    let ratio = if budget > Decimal::ZERO {
        (app.total_spent / budget).to_f64().unwrap_or(0.0).min(1.0)
    } else {
        0.0
    };

    let color = if ratio > 0.9 {
        theme::RED
    } else if ratio > 0.7 {
        theme::YELLOW
    } else {
        theme::GREEN
    };

    let bar = create_progress_bar(ratio.max(0.0), 30);
    let tail = match app.remaining_budget() {
        Some(remaining) if remaining < Decimal::ZERO => {
            format!("over by {}", format_amount(remaining.abs()))
        }
        Some(remaining) => format!("{} left", format_amount(remaining)),
        None => String::new(),
    };

    let line = Line::from(vec![
        Span::styled(bar, Style::default().fg(color)),
        Span::styled(
            format!(
                " {} of {} ({:.0}%) ",
                format_amount(app.total_spent),
                format_amount(budget),
                ratio * 100.0
            ),
            theme::normal_style(),
        ),
        Span::styled(tail, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
