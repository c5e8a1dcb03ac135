/*
[INPUT]:  DashboardState task list and selection, task cursor, display zone
[OUTPUT]: Task panel rendered into Ratatui frame
[POS]:    TUI UI task list rendering
[UPDATE]: When task row contents change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};

use maintenance_adapter::{MaintenanceTask, TaskStatus};
use maintenance_dashboard::dashboard::{DashboardState, DueDateZone, Operation};

use crate::tui::app::{AppState, Panel};
use crate::tui::runtime::{border_style, focused_border_style, highlight_style};

pub(in crate::tui) fn draw_task_list(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &mut AppState,
    state: &DashboardState,
) {
    let title = match state.selected() {
        Some(machine) => format!("Tasks for {}", machine.name),
        None => String::from("Tasks (no machine selected)"),
    };

    let zone = app.dashboard.zone();
    let items = match (state.selected(), state.tasks().is_empty()) {
        (None, _) => vec![ListItem::new("Select a machine to see its tasks.")],
        (Some(_), true) => {
            let message = match state.error(Operation::LoadTasks) {
                Some(err) => format!("Could not load tasks: {err}"),
                None => String::from("No tasks for this machine yet."),
            };
            vec![ListItem::new(message)]
        }
        (Some(_), false) => state
            .tasks()
            .iter()
            .map(|task| task_item(task, zone))
            .collect(),
    };

    let border = if app.focus == Panel::Tasks {
        focused_border_style()
    } else {
        border_style()
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.task_list);
}

fn task_item(task: &MaintenanceTask, zone: DueDateZone) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("  Due: {} · Status: ", zone.format(&task.due_date)),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(task.status.to_string(), status_style(task.status)),
        ]),
    ])
}

fn status_style(status: TaskStatus) -> Style {
    let color = match status {
        TaskStatus::Scheduled => Color::LightBlue,
        TaskStatus::InProgress => Color::Yellow,
        TaskStatus::Completed => Color::LightGreen,
        TaskStatus::Cancelled => Color::DarkGray,
    };
    Style::default().fg(color)
}
