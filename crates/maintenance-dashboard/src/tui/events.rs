/*
[INPUT]:  Crossterm key codes
[OUTPUT]: AppState mutations and spawned dashboard operations
[POS]:    TUI key routing
[UPDATE]: When changing keybindings
*/

use crossterm::event::KeyCode;
use maintenance_adapter::TaskStatus;

use super::app::{ActiveModal, AppState, Panel};
use super::ui::modal::ModalAction;

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    if app.active_modal.is_some() {
        handle_modal_key_event(app, key);
        return false;
    }

    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('r') => app.reload_machines(),
        KeyCode::Char('m') => app.open_create_machine(),
        KeyCode::Char('t') => app.open_create_task(),
        KeyCode::Char('L') => app.show_logs = !app.show_logs,
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Up => app.move_cursor(-1),
        KeyCode::Down => app.move_cursor(1),
        KeyCode::Enter if app.focus == Panel::Machines => {
            if let Some(machine) = app.machine_under_cursor() {
                app.select_machine(machine);
            }
        }
        KeyCode::Char(ch) if app.focus == Panel::Tasks => {
            let target = status_for_key(ch).zip(app.task_under_cursor());
            if let Some((status, task)) = target {
                app.set_task_status(&task, status);
            }
        }
        _ => {}
    }
    false
}

fn handle_modal_key_event(app: &mut AppState, key: KeyCode) {
    let action = match app.active_modal.as_mut() {
        Some(ActiveModal::CreateMachine(modal)) => modal.handle_key(key),
        Some(ActiveModal::CreateTask(modal)) => modal.handle_key(key),
        None => return,
    };
    app.sync_draft();

    match action {
        ModalAction::Cancel => app.close_modal(),
        ModalAction::Submit => app.submit_modal(),
        ModalAction::None => {}
    }
}

/// `1`-`4` map to the status order shown in the footer
fn status_for_key(ch: char) -> Option<TaskStatus> {
    let index = ch.to_digit(10)?.checked_sub(1)? as usize;
    TaskStatus::ALL.get(index).copied()
}
