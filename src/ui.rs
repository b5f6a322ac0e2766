use ratatui::{
    Frame,
    layout::{Layout, Direction, Constraint, Rect},
    widgets::{Block, Borders, BorderType, List, ListItem, ListState, Paragraph, Clear},
    style::{Style, Modifier},
    text::{Line, Span},
};
use crate::app::{App, InputMode, Screen, ToastKind};
use crate::util_text::{relative_time, truncate_hash};

// ===============================
// Top-level draw
// ===============================
/// Render the current screen. `now` is Unix seconds for relative times.
pub fn draw(f:&mut Frame, app:&App, now:i64){
    let search_expanded = app.screen() == Screen::Feed
        && (app.input_mode() == InputMode::Search || !app.feed().query().is_empty());

    let mut constraints: Vec<Constraint> = Vec::with_capacity(4);
    constraints.push(Constraint::Length(2));                                // header
    if search_expanded { constraints.push(Constraint::Length(3)); }         // search bar
    constraints.push(Constraint::Min(0));                                   // body
    constraints.push(Constraint::Length(2));                                // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut idx = 0usize;
    header(f, chunks[idx], app); idx += 1;
    if search_expanded {
        search_bar(f, chunks[idx], app); idx += 1;
    }
    match app.screen() {
        Screen::Feed => render_feed(f, chunks[idx], app, now),
        Screen::Detail => render_detail(f, chunks[idx], app, now),
    }
    idx += 1;
    footer(f, chunks[idx], app);

    if app.toast().is_some() {
        draw_toast_modal(f, app);
    }
}

// ===============================
// Header / Search
// ===============================
fn header(f:&mut Frame, area:Rect, app:&App){
    let theme = app.theme();
    let title = match app.screen() {
        Screen::Feed => "Recent Blocks".to_string(),
        Screen::Detail => app.detail_block()
            .map(|b| format!("Block #{}", b.block_number))
            .unwrap_or_else(|| "Details".to_string()),
    };

    let mut spans = vec![
        Span::styled(" solx ", Style::default().fg(theme.selection_fg).bg(theme.accent).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(title, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    ];
    if app.screen() == Screen::Feed {
        spans.push(Span::styled(format!("  limit {}", app.feed().limit()), Style::default().fg(theme.text_dim)));
        if app.feed().is_refreshing() {
            spans.push(Span::styled("  ⟳ refreshing…", Style::default().fg(theme.text)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM).border_type(BorderType::Plain).border_style(Style::default().fg(theme.border)));
    f.render_widget(paragraph, area);
}

fn search_bar(f:&mut Frame, area:Rect, app:&App){
    let theme = app.theme();
    let focused = app.input_mode() == InputMode::Search;
    let query = app.feed().query();
    let text = if query.is_empty() { "Search by Block # or Hash" } else { query };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(if query.is_empty() { theme.text_dim } else { theme.text }))
        .block(Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if focused { theme.accent } else { theme.border })));
    f.render_widget(paragraph, area);

    if focused && area.width > 2 {
        let x = area.x + 1 + (query.chars().count().min(area.width.saturating_sub(2) as usize) as u16);
        f.set_cursor_position((x, area.y + 1));
    }
}

// ===============================
// Feed
// ===============================
fn render_feed(f:&mut Frame, area:Rect, app:&App, now:i64){
    let theme = app.theme();
    let filtered = app.feed().filtered();
    let total = app.feed().blocks().len();

    let title = if filtered.len() < total {
        format!(" Blocks ({} / {}) ", filtered.len(), total)
    } else {
        format!(" Blocks ({}) ", total)
    };
    let frame = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if filtered.is_empty() {
        let msg = if app.feed().is_refreshing() {
            "Loading blocks…"
        } else if total > 0 {
            "No blocks match the search"
        } else {
            "No blocks yet. Press r to refresh."
        };
        f.render_widget(Paragraph::new(msg).style(Style::default().fg(theme.text_dim)).block(frame), area);
        return;
    }

    let items: Vec<ListItem> = filtered.iter().map(|b| {
        ListItem::new(Line::from(vec![
            Span::styled(format!("Block #{:<12}", b.block_number), Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(" Hash ", Style::default().fg(theme.text_dim)),
            Span::styled(format!("{:<14}", truncate_hash(&b.block_hash, 7, 4)), Style::default().fg(theme.text)),
            Span::styled(" Slot ", Style::default().fg(theme.text_dim)),
            Span::styled(format!("{:<12}", b.parent_slot), Style::default().fg(theme.text)),
            Span::styled(relative_time(b.block_time.absolute, now), Style::default().fg(theme.text_dim)),
        ]))
    }).collect();

    let mut state = ListState::default();
    state.select(Some(app.selection()));

    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.selection_bg).fg(theme.selection_fg).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ")
        .block(frame);
    f.render_stateful_widget(list, area, &mut state);
}

// ===============================
// Detail
// ===============================
fn render_detail(f:&mut Frame, area:Rect, app:&App, now:i64){
    let theme = app.theme();
    let fields = app.detail_fields(now);

    let items: Vec<ListItem> = fields.iter().map(|field| {
        let mut spans = vec![
            Span::styled(format!("{:<25}", format!("{}:", field.label)), Style::default().fg(theme.text_dim).add_modifier(Modifier::BOLD)),
            Span::styled(field.value.clone(), Style::default().fg(theme.text)),
        ];
        if field.is_copyable() {
            spans.push(Span::styled("  ⧉", Style::default().fg(theme.text_dim)));
        }
        ListItem::new(Line::from(spans))
    }).collect();

    let mut state = ListState::default();
    if !fields.is_empty() { state.select(Some(app.detail_selection())); }

    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.selection_bg).fg(theme.selection_fg))
        .highlight_symbol("▶ ")
        .block(Block::default()
            .title(" Details - c copies the selected field ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border)));
    f.render_stateful_widget(list, area, &mut state);
}

// ===============================
// Footer / Toast
// ===============================
fn footer(f:&mut Frame, area:Rect, app:&App){
    let theme = app.theme();
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));

    let spans: Vec<Span> = match (app.screen(), app.input_mode()) {
        (Screen::Feed, InputMode::Search) => vec![
            Span::raw("type to filter │ "),
            key("Enter"), Span::raw(" done │ "),
            key("Esc"), Span::raw(" clear"),
        ],
        (Screen::Feed, InputMode::Normal) => vec![
            key("↑/↓"), Span::raw(" select │ "),
            key("Enter"), Span::raw(" details │ "),
            key("/"), Span::raw(" search │ "),
            key("r"), Span::raw(" refresh │ "),
            key("R"), Span::raw(" reload │ "),
            key("+/-"), Span::raw(" limit │ "),
            key("c"), Span::raw(" copy hash │ "),
            key("C"), Span::raw(" copy JSON │ "),
            key("q"), Span::raw(" quit"),
        ],
        (Screen::Detail, _) => vec![
            key("↑/↓"), Span::raw(" select │ "),
            key("c"), Span::raw(" copy │ "),
            key("C"), Span::raw(" copy JSON │ "),
            key("Esc"), Span::raw(" back │ "),
            key("q"), Span::raw(" quit"),
        ],
    };

    let w = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::TOP).border_type(BorderType::Plain).border_style(Style::default().fg(theme.border)));
    f.render_widget(w, area);
}

fn draw_toast_modal(f: &mut Frame, app: &App) {
    let Some((message, kind)) = app.toast() else { return };
    let theme = app.theme();
    let (color, mark) = match kind {
        ToastKind::Success => (theme.toast_success, "✓"),
        ToastKind::Error => (theme.toast_error, "✗"),
    };

    // Small centered box (40% width, 3 lines height)
    let area = f.area();
    let width = ((area.width * 4) / 10).max((message.chars().count() as u16 + 6).min(area.width));
    let height = 3.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let overlay = Rect { x, y, width, height };

    f.render_widget(Clear, overlay);

    let text = Paragraph::new(format!("{mark} {message}"))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color)));
    f.render_widget(text, overlay);
}
