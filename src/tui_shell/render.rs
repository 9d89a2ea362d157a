use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    draw_tabs(frame, app, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_rows(frame, app, chunks[2]);
    draw_status(frame, app, chunks[3]);

    if let Some(picker) = &app.picker {
        draw_picker(frame, picker, area);
    }
}

fn draw_tabs(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "scopedash",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
    ];
    for (i, s) in app.sections.iter().enumerate() {
        let style = if i == app.active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("{} [{}]", s.title(), s.kind.label()), style));
        spans.push(Span::raw("  "));
    }
    let tabs = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, area);
}

fn draw_search_bar(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let line = match app.focus {
        Focus::Search => {
            let (before, after) = app.input.split_at_cursor();
            Line::from(vec![
                Span::styled("/ ", Style::default().fg(Color::Cyan)),
                Span::raw(before.to_string()),
                Span::styled("|", Style::default().fg(Color::Cyan)),
                Span::raw(after.to_string()),
            ])
        }
        Focus::Table => {
            let query = app.query_summary().map(|(q, _)| q).unwrap_or_default();
            Line::from(vec![
                Span::styled("  ", Style::default()),
                Span::raw(query),
            ])
        }
    };
    let bar = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("search"));
    frame.render_widget(bar, area);
}

fn draw_rows(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let Some(section) = app.section() else {
        let empty = Paragraph::new("(no sections configured)")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let now = OffsetDateTime::now_utc();
    let items: Vec<ListItem> = section
        .rows
        .iter()
        .map(|r| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{:<6}", r.number), Style::default().fg(Color::Green)),
                Span::raw(format!("{:<28} ", r.repo)),
                Span::raw(r.title.clone()),
                Span::styled(format!("  @{}", r.author), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("  {}", fmt_updated(&r.updated_at, now)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let title = format!("{} ({})", section.title(), section.rows.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if !section.rows.is_empty() {
        state.select(Some(section.cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if let Some((_, label)) = app.query_summary() {
        spans.push(Span::styled(
            format!("scope: {}", label),
            Style::default().fg(Color::Cyan),
        ));
    }
    if let Some(section) = app.section() {
        let author = if section.scope().author_filter_removed {
            "author:@me off"
        } else {
            "author:@me on"
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(author, Style::default().fg(Color::Magenta)));
        if let Some(row) = section.selected_row() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(row.url.as_str(), Style::default().fg(Color::DarkGray)));
        }
    }
    if let Some(status) = &app.status {
        let style = match status.kind {
            StatusKind::Info => Style::default().fg(Color::White),
            StatusKind::Error => Style::default().fg(Color::Red),
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.text.as_str(), style));
    }

    let hints = Line::from(Span::styled(
        "tab section  / search  t scope  a author  p repo  u reset  R refresh  q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(vec![Line::from(spans), hints]), area);
}

fn draw_picker(frame: &mut ratatui::Frame, picker: &RepoPicker, area: Rect) {
    let popup = centered(area, 50, 9);
    frame.render_widget(Clear, popup);

    if let Some(input) = &picker.custom {
        let (before, after) = input.split_at_cursor();
        let line = Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled("|", Style::default().fg(Color::Cyan)),
            Span::raw(after.to_string()),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("custom repo (owner/name)");
        frame.render_widget(Paragraph::new(line).block(block), popup);
        return;
    }

    let items: Vec<ListItem> = picker
        .options
        .iter()
        .map(|o| {
            let marker = if o.value == picker.current { "* " } else { "  " };
            ListItem::new(format!("{}{}", marker, o.label))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("repository  (c custom, esc cancel)"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    state.select(Some(picker.cursor));
    frame.render_stateful_widget(list, popup, &mut state);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
