/*
[INPUT]:  Dashboard-facing operations on machines and tasks
[OUTPUT]: Object-safe async trait implemented by MaintenanceClient
[POS]:    API seam - lets callers swap the HTTP client for another backend
[UPDATE]: When the dashboard needs a new endpoint
*/

use async_trait::async_trait;

use crate::http::{MaintenanceClient, Result};
use crate::types::{
    CreateMachineRequest, CreateTaskRequest, Machine, MaintenanceTask, TaskQuery,
    UpdateTaskRequest,
};

/// Operations the dashboard performs against the maintenance backend
#[async_trait]
pub trait MaintenanceApi: Send + Sync {
    async fn list_machines(&self) -> Result<Vec<Machine>>;

    async fn create_machine(&self, req: &CreateMachineRequest) -> Result<Machine>;

    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<MaintenanceTask>>;

    async fn create_task(&self, req: &CreateTaskRequest) -> Result<MaintenanceTask>;

    async fn update_task(
        &self,
        task_id: &str,
        req: &UpdateTaskRequest,
    ) -> Result<MaintenanceTask>;
}

#[async_trait]
impl MaintenanceApi for MaintenanceClient {
    async fn list_machines(&self) -> Result<Vec<Machine>> {
        MaintenanceClient::list_machines(self).await
    }

    async fn create_machine(&self, req: &CreateMachineRequest) -> Result<Machine> {
        MaintenanceClient::create_machine(self, req).await
    }

    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<MaintenanceTask>> {
        MaintenanceClient::list_tasks(self, query).await
    }

    async fn create_task(&self, req: &CreateTaskRequest) -> Result<MaintenanceTask> {
        MaintenanceClient::create_task(self, req).await
    }

    async fn update_task(
        &self,
        task_id: &str,
        req: &UpdateTaskRequest,
    ) -> Result<MaintenanceTask> {
        MaintenanceClient::update_task(self, task_id, req).await
    }
}
