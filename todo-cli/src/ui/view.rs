use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use todo_core::{Status, Task, color};

use super::app::{App, Message, Screen};

const HELP_TEXT: &str = r#"Navigation:
  j/k or arrows: move up/down
  enter/l: open workspace or list (or pick the move destination)
  h/esc/backspace: back

Actions:
  a: add workspace, list or task
  e/r: rename selected item
  d: delete selected item
  c: set color (workspaces and lists; empty clears)
  /: filter lists or tasks by name (empty clears)

Tasks:
  s: cycle status (todo, in_progress, done)
  p: cycle priority (none, low, medium, high)
  u: set due date (empty clears)
  m: move task to another list

New task:
  enter: create from title
  tab: fill due date, priority and status first

  ?: show/hide this help
  q: quit

Press any key to close"#;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = match &app.filter {
        Some(needle) => format!("{}[/{needle}] ", screen_title(&app.screen)),
        None => screen_title(&app.screen),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    match &app.screen {
        Screen::Workspaces => {
            let items: Vec<ListItem> = if app.workspaces.is_empty() {
                vec![ListItem::new(Span::styled(
                    "(none yet, press 'a' to add one)",
                    Style::default().fg(Color::DarkGray),
                ))]
            } else {
                app.workspaces
                    .iter()
                    .map(|w| ListItem::new(colored(&w.name, w.color.as_deref())))
                    .collect()
            };
            f.render_stateful_widget(list(items, block), chunks[0], &mut app.workspace_state);
        }
        Screen::Projects { .. } => {
            let mut items = vec![ListItem::new(Span::styled(
                "Default",
                Style::default().add_modifier(Modifier::ITALIC),
            ))];
            items.extend(
                app.projects
                    .iter()
                    .map(|p| ListItem::new(colored(&p.name, p.color.as_deref()))),
            );
            f.render_stateful_widget(list(items, block), chunks[0], &mut app.project_state);
        }
        Screen::Tasks { .. } => {
            let items: Vec<ListItem> = app.tasks.iter().map(task_item).collect();
            f.render_stateful_widget(list(items, block), chunks[0], &mut app.task_state);
        }
    }

    let status = match &app.message {
        Some(Message::Info(text)) => {
            Paragraph::new(text.as_str()).style(Style::default().fg(Color::Green))
        }
        Some(Message::Error(text)) => Paragraph::new(format!("Error: {text}"))
            .style(Style::default().fg(Color::Red)),
        None => Paragraph::new(""),
    };
    f.render_widget(status, chunks[1]);

    let footer = format!("{} | DB: {}", key_hints(&app.screen), app.db.path().display());
    let footer =
        Paragraph::new(footer).style(Style::default().fg(Color::White).bg(Color::DarkGray));
    f.render_widget(footer, chunks[2]);

    if let Some(overlay) = &app.overlay {
        let popup_area = centered_rect(60, 20, f.area());
        f.render_widget(Clear, popup_area);

        let text = if overlay.buffer.is_empty() {
            Line::from(Span::styled(
                overlay.placeholder(),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(overlay.buffer.as_str())
        };
        let input = Paragraph::new(vec![
            text,
            Line::default(),
            Line::from(Span::styled(
                overlay.hint(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().title(overlay.title()).borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));
        f.render_widget(input, popup_area);

        let typed = u16::try_from(overlay.buffer.chars().count()).unwrap_or(u16::MAX);
        f.set_cursor_position(Position::new(
            popup_area
                .x
                .saturating_add(1)
                .saturating_add(typed)
                .min(popup_area.right().saturating_sub(2)),
            popup_area.y.saturating_add(1),
        ));
    }

    if app.show_help {
        let popup_area = centered_rect(80, 80, f.area());
        f.render_widget(Clear, popup_area);
        let help = Paragraph::new(HELP_TEXT)
            .block(Block::default().title("help").borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(help, popup_area);
    }
}

fn list<'a>(items: Vec<ListItem<'a>>, block: Block<'a>) -> List<'a> {
    List::new(items)
        .block(block)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ")
}

fn screen_title(screen: &Screen) -> String {
    match screen {
        Screen::Workspaces => " workspaces ".to_string(),
        Screen::Projects {
            pending_move: Some(pending),
            ..
        } => format!(" move \"{}\" to which list? ", pending.title),
        Screen::Projects { workspace, .. } => format!(" {} → lists ", workspace.name),
        Screen::Tasks { workspace, project } => {
            let list = project.as_ref().map_or("Default", |p| p.name.as_str());
            format!(" {} → {list} → tasks ", workspace.name)
        }
    }
}

fn key_hints(screen: &Screen) -> &'static str {
    match screen {
        Screen::Workspaces => {
            "enter: open | a: add | e: rename | c: color | d: delete | ?: help | q: quit"
        }
        Screen::Projects {
            pending_move: Some(_),
            ..
        } => "enter: move here | /: filter | esc: cancel move",
        Screen::Projects { .. } => {
            "enter: open | a: add | e: rename | c: color | d: delete | /: filter | esc: back | ?: help"
        }
        Screen::Tasks { .. } => {
            "a: add | s: status | p: priority | u: due | m: move | e: edit | d: delete | /: filter | esc: back"
        }
    }
}

fn colored<'a>(name: &'a str, color_value: Option<&str>) -> Span<'a> {
    match color_value.and_then(color::rgb) {
        Some((r, g, b)) => Span::styled(name, Style::default().fg(Color::Rgb(r, g, b))),
        None => Span::raw(name),
    }
}

fn task_item(task: &Task) -> ListItem<'_> {
    let checkbox = match task.status {
        Status::Todo => "[ ]",
        Status::InProgress => "[~]",
        Status::Done => "[x]",
    };

    let title_style = if task.status == Status::Done {
        Style::default()
            .add_modifier(Modifier::CROSSED_OUT)
            .fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::raw(format!("{checkbox} "))];
    if let Some(priority) = task.priority {
        spans.push(Span::styled(
            format!("{priority} "),
            Style::default().fg(Color::Magenta),
        ));
    }
    spans.push(Span::styled(task.title.as_str(), title_style));
    if let Some(due) = task.due_date {
        spans.push(Span::styled(
            format!(" (due {})", due.format("%Y-%m-%d")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(Line::from(spans))
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
