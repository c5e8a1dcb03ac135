/*
[INPUT]:  TUI app state and dashboard state snapshots
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding panels
*/

mod layout;
mod logs;
mod machines;
mod tasks;

pub mod modal;

pub(in crate::tui) use layout::{draw_footer, draw_header};
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use machines::draw_machine_list;
pub(in crate::tui) use tasks::draw_task_list;
