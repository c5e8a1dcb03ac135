/*
[INPUT]:  Dashboard handle, log buffer, crossterm input, operation completions
[OUTPUT]: Ratatui run loop and frame composition
[POS]:    TUI runtime loop and shared styles
[UPDATE]: When changing TUI layout or the event loop
*/

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use maintenance_dashboard::config::DashboardConfig;
use maintenance_dashboard::dashboard::{Dashboard, DashboardState};
use maintenance_dashboard::logging::LogBufferHandle;

use super::app::{ActiveModal, AppState, Completion};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::modal::draw_modal;
use super::ui::*;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
const LOG_PANEL_HEIGHT: u16 = 10;

pub(crate) async fn run_tui(
    dashboard: Dashboard,
    log_buffer: LogBufferHandle,
    config: &DashboardConfig,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<CrosstermEvent>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<Completion>();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = event_tx.send(event);
                }
            }
        }
    });

    let mut app = AppState::new(
        dashboard,
        log_buffer,
        config.api.base_url.clone(),
        completion_tx,
    );
    app.reload_machines();

    let mut tick = tokio::time::interval(config.ui.tick_interval());
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {
                app.ticks = app.ticks.wrapping_add(1);
            }
            Some(completion) = completion_rx.recv() => {
                app.handle_completion(completion);
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        should_quit = handle_key_event(&mut app, key.code);
                    }
                    Some(_) => {}
                    None => should_quit = true,
                }
            }
        }

        app.clamp_cursors();
        let state = app.dashboard.snapshot();
        terminal.draw(|frame| draw_ui(frame, &mut app, &state))?;
    }

    input_shutdown.cancel();
    info!("dashboard closed");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState, state: &DashboardState) {
    let area = frame.area();
    let log_height = if app.show_logs { LOG_PANEL_HEIGHT } else { 0 };
    let [header, body, logs, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(log_height),
        Constraint::Length(4),
    ])
    .areas(area);
    let [machines, tasks] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);

    draw_header(frame, header, app, state);
    draw_machine_list(frame, machines, app, state);
    draw_task_list(frame, tasks, app, state);
    if app.show_logs {
        draw_logs(frame, logs, &app.log_buffer);
    }
    draw_footer(frame, footer, app, state);

    if let Some(active_modal) = app.active_modal.as_ref() {
        let modal = match active_modal {
            ActiveModal::CreateMachine(modal) => modal.to_modal(),
            ActiveModal::CreateTask(modal) => modal.to_modal(),
        };
        draw_modal(frame, centered_rect(area, 60, 50), &modal);
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn focused_border_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn highlight_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn key_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
