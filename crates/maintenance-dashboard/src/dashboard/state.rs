/*
[INPUT]:  Results of dashboard operations (machine lists, task lists, errors)
[OUTPUT]: DashboardState snapshot consumed by renderers and tests
[POS]:    Dashboard layer - pure state container, no I/O
[UPDATE]: When adding state fields or changing selection rules
[UPDATE]: 2026-10-09 Discard task loads superseded by a newer selection
*/

use std::collections::BTreeMap;
use std::fmt;

use maintenance_adapter::{Machine, MaintenanceTask};
use serde::Serialize;

use super::draft::{MachineDraft, TaskDraft};

/// Dashboard operations that can fail independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    LoadMachines,
    LoadTasks,
    CreateMachine,
    CreateTask,
    UpdateTaskStatus,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::LoadMachines => "load machines",
            Operation::LoadTasks => "load tasks",
            Operation::CreateMachine => "create machine",
            Operation::CreateTask => "create task",
            Operation::UpdateTaskStatus => "update task status",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Latest user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Identifies one task load; only the newest ticket may write the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTicket {
    generation: u64,
    machine_id: String,
}

impl TaskTicket {
    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    machines: Vec<Machine>,
    tasks: Vec<MaintenanceTask>,
    selected: Option<Machine>,
    #[serde(rename = "requests_in_flight")]
    in_flight: usize,
    machine_draft: MachineDraft,
    task_draft: TaskDraft,
    errors: BTreeMap<Operation, String>,
    notification: Option<Notification>,
    #[serde(skip)]
    task_generation: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn tasks(&self) -> &[MaintenanceTask] {
        &self.tasks
    }

    pub fn selected(&self) -> Option<&Machine> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|machine| machine.id.as_str())
    }

    pub fn is_selected(&self, machine_id: &str) -> bool {
        self.selected_id() == Some(machine_id)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn machine_draft(&self) -> &MachineDraft {
        &self.machine_draft
    }

    pub fn task_draft(&self) -> &TaskDraft {
        &self.task_draft
    }

    pub fn errors(&self) -> &BTreeMap<Operation, String> {
        &self.errors
    }

    pub fn error(&self, operation: Operation) -> Option<&str> {
        self.errors.get(&operation).map(String::as_str)
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn begin_load(&mut self) {
        self.in_flight += 1;
    }

    pub fn end_load(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Replace the machine list.
    ///
    /// With nothing selected, the first machine becomes the selection and is
    /// returned so the caller can load its tasks. An existing selection is
    /// refreshed to the reloaded record with the same id, if any.
    pub fn apply_machines(&mut self, machines: Vec<Machine>) -> Option<Machine> {
        self.machines = machines;
        match self.selected.as_ref() {
            None => {
                let first = self.machines.first().cloned();
                self.selected = first.clone();
                first
            }
            Some(current) => {
                if let Some(fresh) = self.machines.iter().find(|m| m.id == current.id) {
                    self.selected = Some(fresh.clone());
                }
                None
            }
        }
    }

    /// Change the selection; clearing it also clears the task list
    pub fn select(&mut self, machine: Option<Machine>) {
        self.selected = machine;
        if self.selected.is_none() {
            self.clear_tasks();
        }
    }

    /// Start a task load, superseding any load still in flight
    pub fn begin_task_load(&mut self, machine_id: &str) -> TaskTicket {
        self.task_generation += 1;
        TaskTicket {
            generation: self.task_generation,
            machine_id: machine_id.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &TaskTicket) -> bool {
        ticket.generation == self.task_generation && self.is_selected(&ticket.machine_id)
    }

    /// Store a task load result; returns `false` when the ticket is stale
    pub fn apply_tasks(&mut self, ticket: &TaskTicket, tasks: Vec<MaintenanceTask>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.tasks = tasks;
        true
    }

    pub fn clear_tasks(&mut self) {
        self.task_generation += 1;
        self.tasks.clear();
    }

    pub fn set_machine_draft(&mut self, draft: MachineDraft) {
        self.machine_draft = draft;
    }

    pub fn set_task_draft(&mut self, draft: TaskDraft) {
        self.task_draft = draft;
    }

    pub fn reset_machine_draft(&mut self) {
        self.machine_draft = MachineDraft::default();
    }

    pub fn reset_task_draft(&mut self) {
        self.task_draft = TaskDraft::default();
    }

    pub fn record_success(&mut self, operation: Operation) {
        self.errors.remove(&operation);
    }

    pub fn record_failure(&mut self, operation: Operation, message: impl Into<String>) {
        let message = message.into();
        self.notification = Some(Notification {
            level: NotificationLevel::Error,
            message: format!("{operation} failed: {message}"),
        });
        self.errors.insert(operation, message);
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification {
            level: NotificationLevel::Info,
            message: message.into(),
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use maintenance_adapter::TaskStatus;

    fn machine(id: &str, name: &str) -> Machine {
        Machine {
            id: id.to_string(),
            name: name.to_string(),
            location: None,
            description: None,
            is_active: true,
        }
    }

    fn task(id: &str, machine_id: &str) -> MaintenanceTask {
        MaintenanceTask {
            id: id.to_string(),
            machine_id: machine_id.to_string(),
            title: format!("task {id}"),
            description: None,
            due_date: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            status: TaskStatus::Scheduled,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_machine_list_selects_nothing() {
        let mut state = DashboardState::new();
        assert_eq!(state.apply_machines(Vec::new()), None);
        assert!(state.selected().is_none());
        assert!(state.tasks().is_empty());
    }

    #[test]
    fn test_first_machine_auto_selected() {
        let mut state = DashboardState::new();
        let selected = state.apply_machines(vec![machine("a", "A"), machine("b", "B")]);
        assert_eq!(selected.map(|m| m.id), Some("a".to_string()));
        assert_eq!(state.selected_id(), Some("a"));
    }

    #[test]
    fn test_existing_selection_kept_and_refreshed() {
        let mut state = DashboardState::new();
        state.select(Some(machine("b", "B")));

        let mut renamed = machine("b", "B (rebuilt)");
        renamed.is_active = false;
        let auto = state.apply_machines(vec![machine("a", "A"), renamed.clone()]);

        assert_eq!(auto, None);
        assert_eq!(state.selected(), Some(&renamed));
    }

    #[test]
    fn test_selection_survives_when_machine_missing_from_reload() {
        let mut state = DashboardState::new();
        state.select(Some(machine("gone", "Gone")));
        assert_eq!(state.apply_machines(vec![machine("a", "A")]), None);
        assert_eq!(state.selected_id(), Some("gone"));
    }

    #[test]
    fn test_stale_task_load_discarded() {
        let mut state = DashboardState::new();
        state.select(Some(machine("a", "A")));
        let first = state.begin_task_load("a");

        state.select(Some(machine("b", "B")));
        let second = state.begin_task_load("b");

        assert!(state.apply_tasks(&second, vec![task("t-b", "b")]));
        assert!(!state.apply_tasks(&first, vec![task("t-a", "a")]));
        assert_eq!(state.tasks()[0].id, "t-b");
    }

    #[test]
    fn test_clearing_selection_clears_tasks_and_invalidates_loads() {
        let mut state = DashboardState::new();
        state.select(Some(machine("a", "A")));
        let ticket = state.begin_task_load("a");
        assert!(state.apply_tasks(&ticket, vec![task("t1", "a")]));

        let pending = state.begin_task_load("a");
        state.select(None);

        assert!(state.tasks().is_empty());
        assert!(!state.apply_tasks(&pending, vec![task("t2", "a")]));
        assert!(state.tasks().is_empty());
    }

    #[test]
    fn test_loading_counter_saturates() {
        let mut state = DashboardState::new();
        state.begin_load();
        state.begin_load();
        state.end_load();
        assert!(state.is_loading());
        state.end_load();
        state.end_load();
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failure_recorded_then_cleared_by_success() {
        let mut state = DashboardState::new();
        state.record_failure(Operation::LoadTasks, "connection refused");

        assert_eq!(state.error(Operation::LoadTasks), Some("connection refused"));
        let notification = state.notification().unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert_eq!(notification.message, "load tasks failed: connection refused");

        state.record_success(Operation::LoadTasks);
        assert_eq!(state.error(Operation::LoadTasks), None);
    }

    #[test]
    fn test_snapshot_serializes_without_generation() {
        let mut state = DashboardState::new();
        state.apply_machines(vec![machine("a", "A")]);
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["selected"]["id"], "a");
        assert_eq!(value["requests_in_flight"], 0);
        assert!(value.get("task_generation").is_none());
    }
}
