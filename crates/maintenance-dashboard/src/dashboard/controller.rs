/*
[INPUT]:  MaintenanceApi implementation, user intents (select, submit, set status)
[OUTPUT]: Dashboard handle that runs operations and keeps DashboardState in sync
[POS]:    Dashboard layer - operation orchestration and reload-after-mutation
[UPDATE]: When adding operations or changing what a mutation reloads
[UPDATE]: 2026-10-09 Track loading with a guard so failures cannot leave it set
[UPDATE]: 2026-10-16 Loading indicator covers list loads only
[UPDATE]: 2026-10-16 Reload tasks after a machine load only for a new auto-selection
*/

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maintenance_adapter::{
    Machine, MaintenanceApi, MaintenanceTask, TaskQuery, TaskStatus, UpdateTaskRequest,
};
use tracing::{debug, info, warn};

use super::draft::{DueDateZone, MachineDraft, TaskDraft};
use super::error::{DashboardError, Result};
use super::invalidation::{Mutation, Query};
use super::state::{DashboardState, Operation};

/// Cheaply cloneable handle shared by the UI and background operations.
///
/// The state lock is never held across an await point.
#[derive(Clone)]
pub struct Dashboard {
    api: Arc<dyn MaintenanceApi>,
    state: Arc<Mutex<DashboardState>>,
    zone: DueDateZone,
}

impl Dashboard {
    pub fn new(api: Arc<dyn MaintenanceApi>) -> Self {
        Self::with_zone(api, DueDateZone::default())
    }

    pub fn with_zone(api: Arc<dyn MaintenanceApi>, zone: DueDateZone) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(DashboardState::new())),
            zone,
        }
    }

    pub fn zone(&self) -> DueDateZone {
        self.zone
    }

    pub fn snapshot(&self) -> DashboardState {
        self.lock().clone()
    }

    /// Run `f` against the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.lock())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Fetch all machines.
    ///
    /// When nothing was selected yet the first machine becomes the selection
    /// and its tasks are loaded. An existing selection keeps its task list.
    pub async fn load_machines(&self) -> Result<Vec<Machine>> {
        let result = {
            let _loading = LoadGuard::new(self);
            self.api.list_machines().await
        };

        let machines = match result {
            Ok(machines) => machines,
            Err(err) => {
                warn!(error = %err, "failed to load machines");
                self.lock().record_failure(Operation::LoadMachines, err.to_string());
                return Err(err.into());
            }
        };

        info!(count = machines.len(), "machines loaded");
        let auto_selected = {
            let mut state = self.lock();
            state.record_success(Operation::LoadMachines);
            state.apply_machines(machines.clone())
        };

        if let Some(machine) = auto_selected {
            // Failures are recorded in state; the machine list itself loaded fine.
            if let Err(err) = self.load_tasks(Some(&machine.id)).await {
                debug!(machine_id = %machine.id, error = %err, "initial task load failed");
            }
        }
        Ok(machines)
    }

    /// Fetch tasks for `machine_id`.
    ///
    /// `None` clears the task list without a request. Results for a machine
    /// that is no longer selected, or superseded by a newer load, are dropped.
    pub async fn load_tasks(&self, machine_id: Option<&str>) -> Result<Vec<MaintenanceTask>> {
        let Some(machine_id) = machine_id else {
            self.lock().clear_tasks();
            return Ok(Vec::new());
        };

        let ticket = self.lock().begin_task_load(machine_id);
        let result = {
            let _loading = LoadGuard::new(self);
            self.api.list_tasks(&TaskQuery::for_machine(machine_id)).await
        };

        let mut state = self.lock();
        match result {
            Ok(tasks) => {
                if state.apply_tasks(&ticket, tasks.clone()) {
                    state.record_success(Operation::LoadTasks);
                    debug!(machine_id, count = tasks.len(), "tasks loaded");
                } else {
                    debug!(machine_id, "discarding stale task list");
                }
                Ok(tasks)
            }
            Err(err) => {
                if state.is_current(&ticket) {
                    warn!(machine_id, error = %err, "failed to load tasks");
                    state.record_failure(Operation::LoadTasks, err.to_string());
                }
                Err(err.into())
            }
        }
    }

    /// Make `machine` the selection and reload its tasks, even if unchanged
    pub async fn select_machine(&self, machine: Option<Machine>) -> Result<Vec<MaintenanceTask>> {
        let machine_id = machine.as_ref().map(|m| m.id.clone());
        self.lock().select(machine);
        self.load_tasks(machine_id.as_deref()).await
    }

    pub async fn submit_machine(&self, draft: MachineDraft) -> Result<Machine> {
        let operation = Mutation::CreateMachine.operation();
        let request = draft.to_request().inspect_err(|err| {
            self.lock().record_failure(operation, err.to_string());
        })?;

        let result = self.api.create_machine(&request).await;
        let machine = self.finish(operation, result)?;

        {
            let mut state = self.lock();
            state.reset_machine_draft();
            state.notify(format!("Machine {} created", machine.name));
        }
        info!(id = %machine.id, name = %machine.name, "machine created");

        self.refetch(Mutation::CreateMachine).await;
        Ok(machine)
    }

    /// Create a task for the selected machine
    pub async fn submit_task(&self, draft: TaskDraft) -> Result<MaintenanceTask> {
        let operation = Mutation::CreateTask.operation();
        let request = {
            let mut state = self.lock();
            let prepared = match state.selected_id() {
                Some(machine_id) => draft.to_request(machine_id, &self.zone),
                None => Err(DashboardError::NoMachineSelected),
            };
            prepared.inspect_err(|err| state.record_failure(operation, err.to_string()))?
        };

        let result = self.api.create_task(&request).await;
        let task = self.finish(operation, result)?;

        {
            let mut state = self.lock();
            state.reset_task_draft();
            state.notify(format!("Task {} created", task.title));
        }
        info!(id = %task.id, machine_id = %task.machine_id, "task created");

        self.refetch(Mutation::CreateTask).await;
        Ok(task)
    }

    pub async fn set_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<MaintenanceTask> {
        let operation = Mutation::UpdateTaskStatus.operation();
        let request = UpdateTaskRequest::status(status);

        let result = self.api.update_task(task_id, &request).await;
        let task = self.finish(operation, result)?;

        self.lock()
            .notify(format!("Task {} marked {}", task.title, task.status));
        info!(id = %task.id, status = %task.status, "task status updated");

        self.refetch(Mutation::UpdateTaskStatus).await;
        Ok(task)
    }

    /// Record the outcome of a mutation request
    fn finish<T>(&self, operation: Operation, result: maintenance_adapter::Result<T>) -> Result<T> {
        let mut state = self.lock();
        match result {
            Ok(value) => {
                state.record_success(operation);
                Ok(value)
            }
            Err(err) => {
                warn!(%operation, error = %err, "mutation failed");
                state.record_failure(operation, err.to_string());
                Err(err.into())
            }
        }
    }

    async fn refetch(&self, mutation: Mutation) {
        for query in mutation.invalidates() {
            let outcome = match query {
                Query::Machines => self.load_machines().await.map(|_| ()),
                Query::Tasks => {
                    let selected = self.read(|state| state.selected_id().map(str::to_string));
                    self.load_tasks(selected.as_deref()).await.map(|_| ())
                }
            };
            if let Err(err) = outcome {
                debug!(?query, error = %err, "reload after {} failed", mutation.operation());
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks one list load in flight for as long as it lives
struct LoadGuard<'a> {
    dashboard: &'a Dashboard,
}

impl<'a> LoadGuard<'a> {
    fn new(dashboard: &'a Dashboard) -> Self {
        dashboard.lock().begin_load();
        Self { dashboard }
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.dashboard.lock().end_load();
    }
}
