use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.mirror.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :a or press 2",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Expenses (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Time", "Category", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .mirror
        .expenses()
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, exp)| {
            let cat_color = app
                .category_totals
                .iter()
                .find(|t| t.category == exp.category)
                .map(|t| t.color)
                .unwrap_or(theme::TEXT_DIM);

            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(exp.local_date()),
                Cell::from(exp.local_time()),
                Cell::from(Span::styled(
                    exp.category.clone(),
                    Style::default().fg(cat_color),
                )),
                Cell::from(truncate(&exp.description, 40)),
                Cell::from(Span::styled(
                    format_amount(exp.amount),
                    theme::amount_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Expenses ({}) {}",
                    app.mirror.len(),
                    if app.mirror.is_live() {
                        ""
                    } else {
                        "[paused] "
                    }
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
