/*
[INPUT]:  Dashboard test scenarios
[OUTPUT]: In-memory maintenance backend and fixtures
[POS]:    Test infrastructure - shared across dashboard test modules
[UPDATE]: When MaintenanceApi gains methods or tests need new hooks
*/

//! Common test utilities for maintenance-dashboard tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use maintenance_adapter::{
    CreateMachineRequest, CreateTaskRequest, Machine, MaintenanceApi, MaintenanceError,
    MaintenanceTask, Result, TaskQuery, TaskStatus, UpdateTaskRequest,
};
use maintenance_dashboard::dashboard::{Dashboard, DueDateZone};
use tokio::sync::Notify;

/// Backend calls that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    ListMachines,
    CreateMachine,
    ListTasks,
    CreateTask,
    UpdateTask,
}

#[derive(Default)]
struct Store {
    machines: Vec<Machine>,
    tasks: Vec<MaintenanceTask>,
    next_id: u64,
    failing: HashSet<Call>,
    calls: Vec<Call>,
    created_machines: Vec<CreateMachineRequest>,
    created_tasks: Vec<CreateTaskRequest>,
    updates: Vec<(String, UpdateTaskRequest)>,
    task_queries: Vec<TaskQuery>,
    held_updates: usize,
}

/// Maintenance backend kept in memory, with failure injection and
/// per-machine gates that hold task list responses back
#[derive(Default)]
pub struct InMemoryApi {
    store: Mutex<Store>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl InMemoryApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_machines(machines: Vec<Machine>) -> Arc<Self> {
        let api = Self::default();
        api.store.lock().unwrap().machines = machines;
        Arc::new(api)
    }

    pub fn add_task(&self, task: MaintenanceTask) {
        self.store.lock().unwrap().tasks.push(task);
    }

    pub fn fail(&self, call: Call) {
        self.store.lock().unwrap().failing.insert(call);
    }

    pub fn recover(&self, call: Call) {
        self.store.lock().unwrap().failing.remove(&call);
    }

    /// Hold task list responses for `machine_id` until the returned handle is notified
    pub fn gate_tasks(&self, machine_id: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(machine_id.to_string(), notify.clone());
        notify
    }

    /// Hold updates of `task_id` until the returned handle is notified
    pub fn gate_update(&self, task_id: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(update_gate_key(task_id), notify.clone());
        notify
    }

    /// Updates currently waiting on a gate
    pub fn held_updates(&self) -> usize {
        self.store.lock().unwrap().held_updates
    }

    pub fn calls(&self) -> Vec<Call> {
        self.store.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().into_iter().filter(|c| *c == call).count()
    }

    pub fn created_machines(&self) -> Vec<CreateMachineRequest> {
        self.store.lock().unwrap().created_machines.clone()
    }

    pub fn created_tasks(&self) -> Vec<CreateTaskRequest> {
        self.store.lock().unwrap().created_tasks.clone()
    }

    pub fn updates(&self) -> Vec<(String, UpdateTaskRequest)> {
        self.store.lock().unwrap().updates.clone()
    }

    pub fn task_queries(&self) -> Vec<TaskQuery> {
        self.store.lock().unwrap().task_queries.clone()
    }

    fn enter(&self, call: Call) -> Result<std::sync::MutexGuard<'_, Store>> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(call);
        if store.failing.contains(&call) {
            return Err(MaintenanceError::Api {
                status: 500,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(store)
    }

    fn next_id(store: &mut Store, prefix: &str) -> String {
        store.next_id += 1;
        format!("{prefix}-{}", store.next_id)
    }
}

#[async_trait]
impl MaintenanceApi for InMemoryApi {
    async fn list_machines(&self) -> Result<Vec<Machine>> {
        let store = self.enter(Call::ListMachines)?;
        Ok(store.machines.clone())
    }

    async fn create_machine(&self, request: &CreateMachineRequest) -> Result<Machine> {
        let mut store = self.enter(Call::CreateMachine)?;
        store.created_machines.push(request.clone());
        let machine = Machine {
            id: Self::next_id(&mut store, "m"),
            name: request.name.clone(),
            location: request.location.clone(),
            description: request.description.clone(),
            is_active: true,
        };
        store.machines.push(machine.clone());
        Ok(machine)
    }

    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<MaintenanceTask>> {
        let gate = query
            .machine_id
            .as_ref()
            .and_then(|id| self.gates.lock().unwrap().get(id).cloned());
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut store = self.enter(Call::ListTasks)?;
        store.task_queries.push(query.clone());
        Ok(store
            .tasks
            .iter()
            .filter(|task| query.machine_id.as_ref().is_none_or(|id| &task.machine_id == id))
            .filter(|task| query.status.is_none_or(|status| task.status == status))
            .cloned()
            .collect())
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<MaintenanceTask> {
        let mut store = self.enter(Call::CreateTask)?;
        store.created_tasks.push(request.clone());
        let task = MaintenanceTask {
            id: Self::next_id(&mut store, "t"),
            machine_id: request.machine_id.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            due_date: request.due_date,
            status: TaskStatus::Scheduled,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        store.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &str, request: &UpdateTaskRequest) -> Result<MaintenanceTask> {
        let gate = self.gates.lock().unwrap().get(&update_gate_key(id)).cloned();
        if let Some(gate) = gate {
            self.store.lock().unwrap().held_updates += 1;
            gate.notified().await;
            self.store.lock().unwrap().held_updates -= 1;
        }

        let mut store = self.enter(Call::UpdateTask)?;
        store.updates.push((id.to_string(), request.clone()));
        let task = store
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| MaintenanceError::Api {
                status: 404,
                message: "Task not found".to_string(),
            })?;
        if let Some(status) = request.status {
            task.status = status;
        }
        Ok(task.clone())
    }
}

fn update_gate_key(task_id: &str) -> String {
    format!("update:{task_id}")
}

pub fn machine(id: &str, name: &str) -> Machine {
    Machine {
        id: id.to_string(),
        name: name.to_string(),
        location: None,
        description: None,
        is_active: true,
    }
}

pub fn task(id: &str, machine_id: &str, title: &str, status: TaskStatus) -> MaintenanceTask {
    MaintenanceTask {
        id: id.to_string(),
        machine_id: machine_id.to_string(),
        title: title.to_string(),
        description: None,
        due_date: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        status,
        created_at: None,
        updated_at: None,
    }
}

/// Dashboard reading due dates as UTC+02:00
pub fn dashboard_for(api: Arc<InMemoryApi>) -> Dashboard {
    let offset = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
    Dashboard::with_zone(api, DueDateZone::Fixed(offset))
}
