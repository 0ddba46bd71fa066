use crate::app::{AppState, LoadStatus, Screen};
use crate::input::FILTER_PLACEHOLDER;
use crate::models::*;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

/// Below this width the TYPE column is dropped.
pub const COMPACT_WIDTH: u16 = 90;

const LOG_PANEL_HEIGHT: u16 = 6;
const FILTER_PREFIX: &str = "Filter: ";

const OBJECT_STORAGE_PLANNED: &[&str] = &[
    "List buckets",
    "Browse objects",
    "Upload/Download",
    "Bucket management",
];

const KUBERNETES_PLANNED: &[&str] = &[
    "List clusters",
    "Configure kubectl",
    "Node group info",
    "Cluster details",
];

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let editing = state.screen == Screen::Compute && state.compute.filter_editing;

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(5)];
    if editing {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(LOG_PANEL_HEIGHT));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    draw_header(f, state, chunks[0]);

    match state.screen {
        Screen::Compute => draw_compute(f, state, chunks[1]),
        Screen::ObjectStorage => draw_planned(f, "S3 Buckets", OBJECT_STORAGE_PLANNED, chunks[1]),
        Screen::Kubernetes => draw_planned(f, "EKS Clusters", KUBERNETES_PLANNED, chunks[1]),
    }

    let mut next = 2;
    if editing {
        draw_filter_input(f, state, chunks[next]);
        next += 1;
    }
    draw_logs(f, state, chunks[next]);
    draw_help_line(f, chunks[next + 1]);
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(44)])
        .split(area);

    let titles: Vec<Line> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, screen)| Line::from(format!("{}. {}", i + 1, screen.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.screen.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" ")
        .block(Block::default().borders(Borders::ALL).title("AWS Dashboard"));
    f.render_widget(tabs, chunks[0]);

    let region_style = if state.is_connected() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::raw("Region: "),
        Span::styled(state.current_region().to_string(), region_style),
    ];
    if let Some(account) = state.compute.client.as_ref().and_then(|c| c.account()) {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            account.to_string(),
            Style::default().fg(Color::Cyan),
        ));
    }
    let info = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Info"));
    f.render_widget(info, chunks[1]);
}

fn draw_compute(f: &mut Frame, state: &mut AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("EC2");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut title = vec![Span::styled(
        "EC2 Instances",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if !state.compute.filter_text.is_empty() {
        title.push(Span::styled(
            format!(" (filtered by: {})", state.compute.filter_text),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let title = Line::from(title);

    let status_line = match &state.compute.load_status {
        LoadStatus::Loading => Some(Line::from(Span::styled(
            "Loading instances...",
            Style::default().fg(Color::Yellow),
        ))),
        LoadStatus::Failed(error) => Some(Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        ))),
        LoadStatus::Ready if state.visible_instances().is_empty() => Some(Line::from(
            Span::styled("No instances found", Style::default().fg(Color::DarkGray)),
        )),
        LoadStatus::Ready => None,
    };

    if let Some(status_line) = status_line {
        let paragraph = Paragraph::new(vec![title, Line::from(""), status_line])
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(Paragraph::new(title), chunks[0]);

    let width = if state.viewport.width > 0 {
        state.viewport.width
    } else {
        area.width
    };
    let compact = width < COMPACT_WIDTH;

    let (rows, total) = {
        let visible = state.visible_instances();
        let rows: Vec<Row> = visible
            .iter()
            .map(|inst| instance_row(inst, compact))
            .collect();
        (rows, visible.len())
    };

    let mut headers = vec!["INSTANCE ID", "NAME", "STATE"];
    let mut widths = vec![
        Constraint::Length(20),
        Constraint::Min(12),
        Constraint::Length(15),
    ];
    if !compact {
        headers.push("TYPE");
        widths.push(Constraint::Length(15));
    }
    headers.push("IP");
    widths.push(Constraint::Length(16));

    let header_cells = headers.into_iter().map(|h| {
        Cell::from(h).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, chunks[1], &mut state.compute.table_state);

    let footer = Paragraph::new(format!("Total: {} instances", total))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[2]);
}

fn instance_row(inst: &Instance, compact: bool) -> Row<'static> {
    let name = match &inst.name {
        Some(name) => Cell::from(truncate(name, 30)),
        None => Cell::from("-").style(Style::default().fg(Color::DarkGray)),
    };

    let mut cells = vec![
        Cell::from(inst.id.clone()),
        name,
        Cell::from(inst.state.clone()).style(Style::default().fg(state_color(&inst.state))),
    ];
    if !compact {
        cells.push(Cell::from(inst.instance_type.clone()));
    }
    cells.push(Cell::from(inst.display_ip().to_string()));
    Row::new(cells).height(1)
}

pub fn state_color(state: &str) -> Color {
    match state.to_lowercase().as_str() {
        "running" => Color::Green,
        "stopped" => Color::Yellow,
        "terminated" | "terminating" | "shutting-down" => Color::Red,
        "pending" | "stopping" => Color::Blue,
        _ => Color::DarkGray,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn draw_planned(f: &mut Frame, title: &'static str, planned: &'static [&'static str], area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Coming soon:"),
    ];
    lines.extend(planned.iter().map(|item| Line::from(format!("  • {}", item))));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn draw_filter_input(f: &mut Frame, state: &AppState, area: Rect) {
    let input = &state.compute.filter_input;
    let text = if input.value().is_empty() {
        Span::styled(FILTER_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(input.value().to_string(), Style::default().fg(Color::Yellow))
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::raw(FILTER_PREFIX), text])).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Filter (Enter: apply, Esc: cancel)"),
    );
    f.render_widget(paragraph, area);

    let x = area.x + 1 + FILTER_PREFIX.len() as u16 + input.cursor() as u16;
    f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
}

fn draw_logs(f: &mut Frame, state: &AppState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let logs: Vec<Line> = state
        .log
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let (label, level_style) = match entry.level {
                LogLevel::Info => ("[INFO]", Style::default().fg(Color::Cyan)),
                LogLevel::Warning => ("[WARN]", Style::default().fg(Color::Yellow)),
                LogLevel::Error => ("[ERROR]", Style::default().fg(Color::Red)),
            };
            Line::from(vec![
                Span::styled(entry.timestamp.clone(), Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(label, level_style),
                Span::raw(" "),
                Span::raw(entry.message.clone()),
            ])
        })
        .collect();

    let paragraph =
        Paragraph::new(logs).block(Block::default().borders(Borders::ALL).title("Logs"));
    f.render_widget(paragraph, area);
}

fn draw_help_line(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "Tab: Next | 1/2/3: Switch | c: Change Region | r: Refresh | f: Filter | ↑/↓: Select | y: Copy ID | q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
