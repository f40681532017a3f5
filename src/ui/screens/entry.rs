use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ledger::PALETTE;
use crate::models::Category;
use crate::ui::app::{App, EntryField, InputMode};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Amount
            Constraint::Length(3), // Category picker
            Constraint::Length(3), // Description
            Constraint::Length(2), // Hint
            Constraint::Min(0),
        ])
        .split(area);

    render_text_field(
        f,
        chunks[0],
        "Amount (₹)",
        &app.amount_input,
        "e.g. 250",
        app.entry_field == EntryField::Amount,
        app.input_mode == InputMode::Editing,
    );
    render_category_picker(f, chunks[1], app);
    render_text_field(
        f,
        chunks[2],
        "Description",
        &app.description_input,
        "optional",
        app.entry_field == EntryField::Description,
        app.input_mode == InputMode::Editing,
    );

    let hint = Paragraph::new(vec![
        Line::from(Span::styled(
            "  j/k move between fields, Enter to edit, +/- to pick a category",
            theme::dim_style(),
        )),
        Line::from(Span::styled(
            "  s saves the expense, c clears the form",
            theme::dim_style(),
        )),
    ]);
    f.render_widget(hint, chunks[3]);
}

fn render_text_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    editing: bool,
) {
    let border = if focused { theme::ACCENT } else { theme::OVERLAY };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {label} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let content = if value.is_empty() {
        Span::styled(placeholder, theme::dim_style())
    } else {
        Span::styled(value, theme::normal_style())
    };
    f.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if focused && editing {
        f.set_cursor_position((area.x + 1 + value.chars().count() as u16, area.y + 1));
    }
}

fn render_category_picker(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.entry_field == EntryField::Category;
    let border = if focused { theme::ACCENT } else { theme::OVERLAY };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            " Category ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let mut spans: Vec<Span> = Vec::new();
    for (i, cat) in Category::all().iter().enumerate() {
        // Picker slots line up with the pinned palette entries
        let style = if app.category_choice == Some(i) {
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(PALETTE[i])
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        spans.push(Span::styled(format!(" {} ", cat.as_str()), style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
