use std::io;

use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    if app.picker.is_some() {
        app.picker_key(key);
        return;
    }

    match app.focus {
        Focus::Search => handle_search_key(app, key),
        Focus::Table => handle_table_key(app, key),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.commit_search(),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.move_home(),
        KeyCode::End => app.input.move_end(),
        KeyCode::Up => app.input.history_up(),
        KeyCode::Down => app.input.history_down(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.insert_char(c)
        }
        _ => {}
    }
}

fn handle_table_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Tab => app.next_section(),
        KeyCode::BackTab => app.prev_section(),
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(s) = app.sections.get_mut(app.active) {
                s.move_down();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(s) = app.sections.get_mut(app.active) {
                s.move_up();
            }
        }
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('t') => app.toggle_scope(),
        KeyCode::Char('a') => app.toggle_author_filter(),
        KeyCode::Char('p') => app.open_picker(),
        KeyCode::Char('u') => app.reset_filters(),
        KeyCode::Char('R') => app.refresh_active(),
        _ => {}
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/event_loop_tests.rs"]
mod tests;
