/*
[INPUT]:  Machine ids and machine request bodies
[OUTPUT]: Machine records from the backend
[POS]:    HTTP layer - machine endpoints
[UPDATE]: When adding machine endpoints or changing request bodies
*/

use reqwest::Method;

use crate::http::{MaintenanceClient, Result};
use crate::types::{CreateMachineRequest, HealthResponse, Machine, UpdateMachineRequest};

impl MaintenanceClient {
    /// Backend liveness probe
    ///
    /// GET /health
    pub async fn health(&self) -> Result<HealthResponse> {
        let builder = self.request(Method::GET, "/health")?;
        self.send_json(builder).await
    }

    /// List all machines
    ///
    /// GET /machines/
    pub async fn list_machines(&self) -> Result<Vec<Machine>> {
        let builder = self.request(Method::GET, "/machines/")?;
        self.send_json(builder).await
    }

    /// Create a machine
    ///
    /// POST /machines/
    pub async fn create_machine(&self, req: &CreateMachineRequest) -> Result<Machine> {
        let builder = self.request(Method::POST, "/machines/")?.json(req);
        self.send_json(builder).await
    }

    /// Fetch a single machine
    ///
    /// GET /machines/{machine_id}
    pub async fn get_machine(&self, machine_id: &str) -> Result<Machine> {
        let endpoint = format!("/machines/{machine_id}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Partially update a machine
    ///
    /// PUT /machines/{machine_id}
    pub async fn update_machine(
        &self,
        machine_id: &str,
        req: &UpdateMachineRequest,
    ) -> Result<Machine> {
        let endpoint = format!("/machines/{machine_id}");
        let builder = self.request(Method::PUT, &endpoint)?.json(req);
        self.send_json(builder).await
    }

    /// Delete a machine
    ///
    /// DELETE /machines/{machine_id}
    pub async fn delete_machine(&self, machine_id: &str) -> Result<()> {
        let endpoint = format!("/machines/{machine_id}");
        let builder = self.request(Method::DELETE, &endpoint)?;
        self.send_empty(builder).await
    }
}
