//! Board rendering: three status columns, the create prompt, the delete
//! confirmation, and the footer.
//!
//! The view is a pure function of the store and the UI state; it never
//! mutates either.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::net::types::{Task, TaskId, TaskStatus};
use crate::state::tasks::TaskStore;
use crate::state::ui::{ConnectionStatus, DeleteConfirm, Prompt, UiState};

pub fn render(frame: &mut Frame, store: &TaskStore, ui: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    render_columns(frame, rows[0], store, ui);
    render_footer(frame, rows[1], ui);

    if let Some(prompt) = &ui.prompt {
        render_prompt(frame, prompt);
    }
    if let DeleteConfirm::Pending(id) = ui.confirm {
        render_confirm(frame, store, id);
    }
}

fn render_columns(frame: &mut Frame, area: Rect, store: &TaskStore, ui: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    for (i, status) in TaskStatus::COLUMNS.iter().enumerate() {
        render_column(frame, chunks[i], store, ui, *status);
    }
}

fn render_column(
    frame: &mut Frame,
    area: Rect,
    store: &TaskStore,
    ui: &UiState,
    status: TaskStatus,
) {
    // The store still holds a carried task at its source position; display
    // it at the carry position instead, the way a drag preview would.
    let mut tasks: Vec<&Task> = store.by_status(status);
    if let Some(grab) = ui.grab {
        tasks.retain(|task| task.id != grab.task_id);
        if grab.carry.0 == status {
            if let Some(task) = store.get(grab.task_id) {
                let row = grab.carry.1.min(tasks.len());
                tasks.insert(row, task);
            }
        }
    }

    let highlight = ui.grab.map_or(ui.focus, |grab| grab.carry);

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(row, task)| {
            let carried = ui.grab.is_some_and(|grab| grab.task_id == task.id);
            let mut title_style = Style::default().add_modifier(Modifier::BOLD);
            if carried {
                title_style = title_style.fg(Color::Magenta);
            }
            let mut spans = vec![Span::styled(task.title.clone(), title_style)];
            if !task.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", task.description),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let mut item = ListItem::new(Line::from(spans));
            if highlight == (status, row) {
                item = item.style(Style::default().add_modifier(Modifier::REVERSED));
            }
            item
        })
        .collect();

    let focused = highlight.0 == status;
    let list = List::new(items).block(
        Block::default()
            .title(format!("{} ({})", status.label(), tasks.len()))
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect, ui: &UiState) {
    let (label, color) = match ui.connection {
        ConnectionStatus::Connected => ("live", Color::Green),
        ConnectionStatus::Disconnected => ("offline", Color::Red),
    };

    let help = if ui.prompt.is_some() {
        "enter next  esc cancel"
    } else if ui.confirm.pending().is_some() {
        "y confirm  n cancel"
    } else if ui.grab.is_some() {
        "arrows carry  enter drop  esc cancel"
    } else {
        "a add  d delete  g grab  arrows move  q quit"
    };

    let mut spans = vec![
        Span::styled(format!("[{label}]"), Style::default().fg(color)),
        Span::raw("  "),
    ];
    match &ui.notice {
        Some(notice) => spans.push(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => spans.push(Span::styled(help, Style::default().fg(Color::DarkGray))),
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_prompt(frame: &mut Frame, prompt: &Prompt) {
    let area = centered_rect(60, 3, frame.area());
    frame.render_widget(Clear, area);

    let line = Line::from(vec![
        Span::styled(
            format!("{}: ", prompt.label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(prompt.buffer().to_owned()),
        Span::styled("_", Style::default().fg(Color::DarkGray)),
    ]);
    let block = Block::default().title("New task").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_confirm(frame: &mut Frame, store: &TaskStore, id: TaskId) {
    let title = store.get(id).map_or_else(|| format!("#{id}"), |task| task.title.clone());
    let area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(format!("Delete \"{title}\"?")),
        Line::from(""),
        Line::from(Span::styled(
            "[y] delete    [n] cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .title("Delete task")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
}

fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_pct) / 2),
            Constraint::Percentage(width_pct),
            Constraint::Percentage((100 - width_pct) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
