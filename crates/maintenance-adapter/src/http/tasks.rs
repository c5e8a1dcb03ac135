/*
[INPUT]:  Task queries, task ids, and task request bodies
[OUTPUT]: Maintenance task records from the backend
[POS]:    HTTP layer - maintenance task endpoints
[UPDATE]: When adding task endpoints or changing query parameters
*/

use reqwest::Method;

use crate::http::{MaintenanceClient, MaintenanceError, Result};
use crate::types::{CreateTaskRequest, MaintenanceTask, TaskQuery, UpdateTaskRequest};

impl MaintenanceClient {
    /// List tasks, optionally filtered by machine and status
    ///
    /// GET /tasks/?machine_id={machine_id}&status_filter={status}
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<MaintenanceTask>> {
        let builder = self.request(Method::GET, "/tasks/")?.query(query);
        self.send_json(builder).await
    }

    /// Create a task
    ///
    /// POST /tasks/
    pub async fn create_task(&self, req: &CreateTaskRequest) -> Result<MaintenanceTask> {
        let builder = self.request(Method::POST, "/tasks/")?.json(req);
        self.send_json(builder).await
    }

    /// Partially update a task
    ///
    /// PUT /tasks/{task_id}
    pub async fn update_task(
        &self,
        task_id: &str,
        req: &UpdateTaskRequest,
    ) -> Result<MaintenanceTask> {
        if req.is_empty() {
            return Err(MaintenanceError::Config(
                "task update has no fields to send".to_string(),
            ));
        }
        let endpoint = format!("/tasks/{task_id}");
        let builder = self.request(Method::PUT, &endpoint)?.json(req);
        self.send_json(builder).await
    }

    /// Delete a task
    ///
    /// DELETE /tasks/{task_id}
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let endpoint = format!("/tasks/{task_id}");
        let builder = self.request(Method::DELETE, &endpoint)?;
        self.send_empty(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, MaintenanceClient, MaintenanceError};
    use crate::types::{CreateTaskRequest, TaskQuery, TaskStatus, UpdateTaskRequest};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> MaintenanceClient {
        MaintenanceClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    fn task_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "machine_id": "m1",
            "title": "Oil change",
            "description": null,
            "due_date": "2024-06-01T08:00:00",
            "status": status,
            "created_at": "2024-05-20T09:00:00",
            "updated_at": "2024-05-20T09:00:00"
        })
    }

    #[tokio::test]
    async fn test_list_tasks_for_machine() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("GET"))
            .and(path("/tasks/"))
            .and(query_param("machine_id", "m1"))
            .and(query_param_is_missing("status_filter"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                task_json("t1", "scheduled"),
                task_json("t2", "completed")
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = client_for(&server)
            .list_tasks(&TaskQuery::for_machine("m1"))
            .await
            .expect("list_tasks failed");

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, TaskStatus::Scheduled);
        assert_eq!(tasks[1].status, TaskStatus::Completed);
        assert_eq!(
            tasks[0].due_date,
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_list_tasks_with_status_filter() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("GET"))
            .and(path("/tasks/"))
            .and(query_param("machine_id", "m1"))
            .and(query_param("status_filter", "in_progress"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([task_json("t3", "in_progress")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tasks = client_for(&server)
            .list_tasks(&TaskQuery::for_machine("m1").with_status(TaskStatus::InProgress))
            .await
            .expect("list_tasks failed");

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "t3");
    }

    #[tokio::test]
    async fn test_create_task_posts_utc_due_date() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("POST"))
            .and(path("/tasks/"))
            .and(body_json(json!({
                "title": "Oil change",
                "description": "Use 5W-30",
                "due_date": "2024-06-01T08:00:00.000Z",
                "machine_id": "m1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(task_json("t1", "scheduled")))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .create_task(&CreateTaskRequest {
                title: "Oil change".to_string(),
                description: Some("Use 5W-30".to_string()),
                due_date: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
                machine_id: "m1".to_string(),
            })
            .await
            .expect("create_task failed");

        assert_eq!(created.status, TaskStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_update_task_status() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("PUT"))
            .and(path("/tasks/t1"))
            .and(body_json(json!({ "status": "cancelled" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(task_json("t1", "cancelled")))
            .expect(1)
            .mount(&server)
            .await;

        let updated = client_for(&server)
            .update_task("t1", &UpdateTaskRequest::status(TaskStatus::Cancelled))
            .await
            .expect("update_task failed");

        assert_eq!(updated.status, TaskStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_empty_update_not_sent() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .update_task("t1", &UpdateTaskRequest::default())
            .await
            .expect_err("empty update should fail");

        assert!(matches!(err, MaintenanceError::Config(_)));
    }

    #[tokio::test]
    async fn test_delete_task_missing() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("DELETE"))
            .and(path("/tasks/t9"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "detail": "Task not found" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .delete_task("t9")
            .await
            .expect_err("expected 404");

        assert!(err.is_not_found());
    }
}
