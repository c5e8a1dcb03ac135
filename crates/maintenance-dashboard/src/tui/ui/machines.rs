/*
[INPUT]:  DashboardState machine list and selection, machine cursor
[OUTPUT]: Machine panel rendered into Ratatui frame
[POS]:    TUI UI machine list rendering
[UPDATE]: When machine row contents change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};

use maintenance_adapter::Machine;
use maintenance_dashboard::dashboard::{DashboardState, Operation};

use crate::tui::app::{AppState, Panel};
use crate::tui::runtime::{border_style, focused_border_style, highlight_style};

pub(in crate::tui) fn draw_machine_list(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &mut AppState,
    state: &DashboardState,
) {
    let items = if state.machines().is_empty() {
        let message = match state.error(Operation::LoadMachines) {
            Some(err) => format!("Could not load machines: {err}"),
            None => String::from("No machines yet. Press [m] to add one."),
        };
        vec![ListItem::new(message)]
    } else {
        state
            .machines()
            .iter()
            .map(|machine| machine_item(machine, state.is_selected(&machine.id)))
            .collect()
    };

    let border = if app.focus == Panel::Machines {
        focused_border_style()
    } else {
        border_style()
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Machines"),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.machine_list);
}

fn machine_item(machine: &Machine, selected: bool) -> ListItem<'static> {
    let name_style = if selected {
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let marker = if selected { "* " } else { "  " };
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(marker, name_style),
            Span::styled(machine.name.clone(), name_style),
        ]),
        Line::from(Span::styled(
            format!("  {}", machine_detail(machine)),
            Style::default().fg(Color::Gray),
        )),
    ])
}

fn machine_detail(machine: &Machine) -> String {
    let location = machine
        .location
        .as_deref()
        .filter(|location| !location.is_empty())
        .unwrap_or("No location");
    let activity = if machine.is_active { "Active" } else { "Inactive" };
    format!("{location} · {activity}")
}
