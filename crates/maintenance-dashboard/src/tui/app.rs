/*
[INPUT]:  Dashboard handle, log buffer, completion channel
[OUTPUT]: AppState holding focus, cursors, and modals; spawns dashboard operations
[POS]:    TUI app state
[UPDATE]: When adding panels, modals, or user actions
*/

use std::future::Future;

use maintenance_adapter::{Machine, MaintenanceTask, TaskStatus};
use maintenance_dashboard::dashboard::{Dashboard, DashboardError, Operation};
use maintenance_dashboard::logging::LogBufferHandle;
use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tracing::debug;

use crate::tui::ui::modal::{CreateMachineModal, CreateTaskModal};

pub(super) enum ActiveModal {
    CreateMachine(CreateMachineModal),
    CreateTask(CreateTaskModal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Panel {
    Machines,
    Tasks,
}

/// Outcome of a spawned dashboard operation
#[derive(Debug)]
pub(super) struct Completion {
    pub(super) operation: Operation,
    pub(super) outcome: Result<String, String>,
}

pub(super) struct AppState {
    pub(super) dashboard: Dashboard,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) base_url: String,
    pub(super) focus: Panel,
    pub(super) machine_list: ListState,
    pub(super) task_list: ListState,
    pub(super) show_logs: bool,
    pub(super) active_modal: Option<ActiveModal>,
    pub(super) ticks: usize,
    completions: mpsc::UnboundedSender<Completion>,
}

impl AppState {
    pub(super) fn new(
        dashboard: Dashboard,
        log_buffer: LogBufferHandle,
        base_url: String,
        completions: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        Self {
            dashboard,
            log_buffer,
            base_url,
            focus: Panel::Machines,
            machine_list: ListState::default(),
            task_list: ListState::default(),
            show_logs: false,
            active_modal: None,
            ticks: 0,
            completions,
        }
    }

    /// Run `future` in the background and report its outcome to the UI loop
    fn spawn<F>(&self, operation: Operation, future: F)
    where
        F: Future<Output = Result<String, DashboardError>> + Send + 'static,
    {
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = future.await.map_err(|err| err.to_string());
            let _ = completions.send(Completion { operation, outcome });
        });
    }

    pub(super) fn reload_machines(&self) {
        let dashboard = self.dashboard.clone();
        self.spawn(Operation::LoadMachines, async move {
            let machines = dashboard.load_machines().await;
            machines.map(|machines| format!("{} machines loaded", machines.len()))
        });
    }

    pub(super) fn select_machine(&self, machine: Machine) {
        let dashboard = self.dashboard.clone();
        self.spawn(Operation::LoadTasks, async move {
            let name = machine.name.clone();
            let tasks = dashboard.select_machine(Some(machine)).await;
            tasks.map(|tasks| format!("{} tasks for {name}", tasks.len()))
        });
    }

    pub(super) fn set_task_status(&self, task: &MaintenanceTask, status: TaskStatus) {
        let dashboard = self.dashboard.clone();
        let task_id = task.id.clone();
        self.spawn(Operation::UpdateTaskStatus, async move {
            let task = dashboard.set_task_status(&task_id, status).await;
            task.map(|task| format!("{} is now {}", task.title, task.status))
        });
    }

    pub(super) fn open_create_machine(&mut self) {
        let draft = self.dashboard.read(|state| state.machine_draft().clone());
        self.active_modal = Some(ActiveModal::CreateMachine(CreateMachineModal::new(draft)));
    }

    pub(super) fn open_create_task(&mut self) {
        let opened = self.dashboard.read(|state| {
            state
                .selected()
                .map(|machine| (machine.name.clone(), state.task_draft().clone()))
        });
        match opened {
            Some((machine_name, draft)) => {
                self.active_modal = Some(ActiveModal::CreateTask(CreateTaskModal::new(
                    machine_name,
                    draft,
                )));
            }
            None => self
                .dashboard
                .update(|state| state.notify("Select a machine before adding tasks")),
        }
    }

    pub(super) fn close_modal(&mut self) {
        self.active_modal = None;
    }

    /// Copy the open form's values into the dashboard drafts
    pub(super) fn sync_draft(&self) {
        match &self.active_modal {
            Some(ActiveModal::CreateMachine(modal)) => {
                let draft = modal.draft().clone();
                self.dashboard.update(|state| state.set_machine_draft(draft));
            }
            Some(ActiveModal::CreateTask(modal)) => {
                let draft = modal.draft().clone();
                self.dashboard.update(|state| state.set_task_draft(draft));
            }
            None => {}
        }
    }

    pub(super) fn submit_modal(&mut self) {
        match &mut self.active_modal {
            Some(ActiveModal::CreateMachine(modal)) if !modal.is_pending() => {
                modal.set_pending(true);
                let draft = modal.draft().clone();
                let dashboard = self.dashboard.clone();
                self.spawn(Operation::CreateMachine, async move {
                    let machine = dashboard.submit_machine(draft).await;
                    machine.map(|machine| format!("machine {} created", machine.id))
                });
            }
            Some(ActiveModal::CreateTask(modal)) if !modal.is_pending() => {
                modal.set_pending(true);
                let draft = modal.draft().clone();
                let dashboard = self.dashboard.clone();
                self.spawn(Operation::CreateTask, async move {
                    let task = dashboard.submit_task(draft).await;
                    task.map(|task| format!("task {} created", task.id))
                });
            }
            _ => {}
        }
    }

    /// Close the form on success; keep it open with its values on failure
    pub(super) fn handle_completion(&mut self, completion: Completion) {
        let Completion { operation, outcome } = completion;
        match &outcome {
            Ok(message) => debug!(%operation, "{message}"),
            Err(err) => debug!(%operation, error = %err, "operation failed"),
        }

        let form_done = match (&mut self.active_modal, operation) {
            (Some(ActiveModal::CreateMachine(modal)), Operation::CreateMachine) => {
                modal.set_pending(false);
                outcome.is_ok()
            }
            (Some(ActiveModal::CreateTask(modal)), Operation::CreateTask) => {
                modal.set_pending(false);
                outcome.is_ok()
            }
            _ => false,
        };
        if form_done {
            self.close_modal();
        }
    }

    pub(super) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Panel::Machines => Panel::Tasks,
            Panel::Tasks => Panel::Machines,
        };
    }

    pub(super) fn move_cursor(&mut self, delta: isize) {
        let (len, list) = match self.focus {
            Panel::Machines => (
                self.dashboard.read(|state| state.machines().len()),
                &mut self.machine_list,
            ),
            Panel::Tasks => (
                self.dashboard.read(|state| state.tasks().len()),
                &mut self.task_list,
            ),
        };
        move_list_cursor(list, len, delta);
    }

    pub(super) fn machine_under_cursor(&self) -> Option<Machine> {
        let index = self.machine_list.selected()?;
        self.dashboard
            .read(|state| state.machines().get(index).cloned())
    }

    pub(super) fn task_under_cursor(&self) -> Option<MaintenanceTask> {
        let index = self.task_list.selected()?;
        self.dashboard.read(|state| state.tasks().get(index).cloned())
    }

    /// Keep cursors inside lists that may have shrunk since the last frame
    pub(super) fn clamp_cursors(&mut self) {
        let (machines, tasks) = self
            .dashboard
            .read(|state| (state.machines().len(), state.tasks().len()));
        clamp_list_cursor(&mut self.machine_list, machines);
        clamp_list_cursor(&mut self.task_list, tasks);
    }
}

fn move_list_cursor(list: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        list.select(None);
        return;
    }
    let current = list.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
    list.select(Some(next));
}

fn clamp_list_cursor(list: &mut ListState, len: usize) {
    match (list.selected(), len) {
        (_, 0) => list.select(None),
        (None, _) => list.select(Some(0)),
        (Some(index), len) if index >= len => list.select(Some(len - 1)),
        _ => {}
    }
}
