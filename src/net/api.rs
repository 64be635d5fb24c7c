//! REST client for the task service.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-success statuses, and decode failures all
//! surface as `ApiError`. Callers log and abandon the operation; there is
//! no retry or backoff anywhere in this client.

use crate::net::types::{NewTask, Task, TaskId, TaskStatus};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Client for the task service under `{base_url}/api/tasks`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// `GET /api/tasks` — fetch the full task list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a body
    /// that does not decode as a task list.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let url = format!("{}/api/tasks", self.base_url);
        let response = self.client.get(url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// `GET /api/tasks/{id}` — fetch a single task.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a body
    /// that does not decode as a task.
    pub async fn get(&self, id: TaskId) -> Result<Task, ApiError> {
        let url = format!("{}/api/tasks/{id}", self.base_url);
        let response = self.client.get(url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// `POST /api/tasks` — create a task. New tasks always start in TODO;
    /// the server assigns the id and returns the stored task.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a body
    /// that does not decode as a task.
    pub async fn create(&self, title: &str, description: &str) -> Result<Task, ApiError> {
        let body = NewTask {
            title: title.to_owned(),
            description: description.to_owned(),
            status: TaskStatus::Todo,
        };
        let url = format!("{}/api/tasks", self.base_url);
        let response = self.client.post(url).json(&body).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// `PUT /api/tasks/{id}` — send the full task as the new state for its
    /// id. The response body is unused.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn update(&self, task: &Task) -> Result<(), ApiError> {
        let url = format!("{}/api/tasks/{}", self.base_url, task.id);
        let response = self.client.put(url).json(task).send().await?;
        check(response).await?;
        Ok(())
    }

    /// `DELETE /api/tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        let url = format!("{}/api/tasks/{id}", self.base_url);
        let response = self.client.delete(url).send().await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status: status.as_u16(), body })
}
