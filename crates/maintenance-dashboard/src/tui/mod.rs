/*
[INPUT]:  Dashboard handle, log buffer, UI configuration
[OUTPUT]: Ratatui terminal dashboard for machines and their tasks
[POS]:    TUI module for the maintenance-dashboard binary
[UPDATE]: When adding TUI submodules
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub(crate) use runtime::run_tui;
