use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::store::ExpenseStore;
use crate::ui::app::{App, EntryField, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut ExpenseStore) -> Result<()> {
    let mut app = App::new();
    app.connect(store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut ExpenseStore,
) -> Result<()> {
    while app.running {
        app.pump();

        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Editing => handle_editing_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut ExpenseStore) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, Screen::Entry),
        KeyCode::Char('3') => switch_screen(app, Screen::Expenses),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Enter => handle_enter(app),
        KeyCode::Esc => {
            app.status_message.clear();
        }
        KeyCode::Char('+') | KeyCode::Char('=') if app.screen == Screen::Entry => {
            app.entry_field = EntryField::Category;
            app.cycle_category(true);
        }
        KeyCode::Char('-') if app.screen == Screen::Entry => {
            app.entry_field = EntryField::Category;
            app.cycle_category(false);
        }
        KeyCode::Char('s') if app.screen == Screen::Entry => {
            app.submit_expense(store)?;
        }
        KeyCode::Char('c') if app.screen == Screen::Entry => {
            app.clear_entry_form();
            app.set_status("Form cleared");
        }
        KeyCode::Char('a') => switch_screen(app, Screen::Entry),
        KeyCode::Char('x') => switch_screen(app, Screen::Expenses),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &mut ExpenseStore) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            handle_move_down(app);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            if let Some(buf) = editing_buffer(app) {
                buf.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buf) = editing_buffer(app) {
                buf.push(c);
            }
        }
        _ => {}
    }
}

fn editing_buffer(app: &mut App) -> Option<&mut String> {
    match app.entry_field {
        EntryField::Amount => Some(&mut app.amount_input),
        EntryField::Description => Some(&mut app.description_input),
        EntryField::Category => None,
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.set_status(format!("{screen}"));
}

fn handle_enter(app: &mut App) {
    if app.screen != Screen::Entry {
        return;
    }
    match app.entry_field {
        EntryField::Amount | EntryField::Description => {
            app.input_mode = InputMode::Editing;
        }
        EntryField::Category => app.cycle_category(true),
    }
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Entry => {
            let fields = EntryField::all();
            let idx = fields
                .iter()
                .position(|f| *f == app.entry_field)
                .unwrap_or(0);
            if idx + 1 < fields.len() {
                app.entry_field = fields[idx + 1];
            }
        }
        Screen::Expenses => {
            scroll_down(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.mirror.len(),
                app.visible_rows,
            );
        }
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Entry => {
            let fields = EntryField::all();
            let idx = fields
                .iter()
                .position(|f| *f == app.entry_field)
                .unwrap_or(0);
            if idx > 0 {
                app.entry_field = fields[idx - 1];
            }
        }
        Screen::Expenses => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        _ => {}
    }
}

fn handle_goto_top(app: &mut App) {
    if app.screen == Screen::Expenses {
        scroll_to_top(&mut app.expense_index, &mut app.expense_scroll);
    }
}

fn handle_goto_bottom(app: &mut App) {
    if app.screen == Screen::Expenses {
        scroll_to_bottom(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.mirror.len(),
            app.visible_rows,
        );
    }
}
