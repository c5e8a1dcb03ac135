/*
[INPUT]:  AppState, DashboardState loading flag and notification
[OUTPUT]: Header bar and hotkey footer
[POS]:    TUI UI frame chrome
[UPDATE]: When keybindings or header contents change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use maintenance_dashboard::dashboard::{DashboardState, NotificationLevel};

use crate::tui::app::{AppState, Panel};
use crate::tui::runtime::{border_style, header_style, key_style};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub(in crate::tui) fn draw_header(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &AppState,
    state: &DashboardState,
) {
    let mut spans = vec![
        Span::styled(" Maintenance Dashboard ", header_style()),
        Span::raw("  "),
        Span::styled(app.base_url.as_str(), Style::default().fg(Color::DarkGray)),
    ];
    if state.is_loading() {
        let frame_index = app.ticks % SPINNER.len();
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} Loading...", SPINNER[frame_index]),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let widget = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(border_style()));
    frame.render_widget(widget, area);
}

pub(in crate::tui) fn draw_footer(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &AppState,
    state: &DashboardState,
) {
    let key = |label: &'static str| Span::styled(label, key_style());
    let mut keys = vec![
        key("[Tab]"),
        Span::raw(" Panel  "),
        key("[Up/Down]"),
        Span::raw(" Move  "),
    ];
    match app.focus {
        Panel::Machines => {
            keys.push(key("[Enter]"));
            keys.push(Span::raw(" Select  "));
        }
        Panel::Tasks => {
            keys.push(key("[1-4]"));
            keys.push(Span::raw(" Scheduled/In progress/Completed/Cancelled  "));
        }
    }
    keys.extend([
        key("[m]"),
        Span::raw(" Machine  "),
        key("[t]"),
        Span::raw(" Task  "),
        key("[r]"),
        Span::raw(" Reload  "),
        key("[L]"),
        Span::raw(" Logs  "),
        key("[q]"),
        Span::raw(" Quit"),
    ]);

    let status = match state.notification() {
        Some(notification) => {
            let color = match notification.level {
                NotificationLevel::Info => Color::LightGreen,
                NotificationLevel::Error => Color::LightRed,
            };
            Line::from(Span::styled(
                notification.message.as_str(),
                Style::default().fg(color),
            ))
        }
        None => Line::from(Span::raw("Ready")),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(vec![Line::from(keys), status]))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
