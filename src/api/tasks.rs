//! HTTP client for the task service.
//!
//! Talks JSON to the `/tasks` resource under the configured base URL:
//!
//! | Method | Path | Body | Response |
//! |---|---|---|---|
//! | GET | /tasks | - | array of Task |
//! | POST | /tasks | NewTask | created Task |
//! | PUT | /tasks/{id} | TaskPatch | updated Task |
//! | DELETE | /tasks/{id} | - | ignored |
//! | POST | /tasks/optimize | - | array of Task |

use super::{ApiError, TaskService};
use crate::libs::config::ServerConfig;
use crate::libs::task::{NewTask, Task, TaskPatch};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const TASKS_PATH: &str = "tasks";
const OPTIMIZE_PATH: &str = "tasks/optimize";

/// Prefix of the error message the service wraps a missing-id lookup in.
/// Such failures arrive as 400 rather than 404.
const WRAPPED_NOT_FOUND: &str = "404 Not Found";

/// Body shape of an optimize call.
///
/// When no task is pending the service answers with a bare message object
/// instead of an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptimizeResponse {
    Tasks(Vec<Task>),
    Message {
        #[allow(dead_code)]
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Task service client over HTTP.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct TaskApi {
    client: Client,
    base_url: String,
}

impl TaskApi {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn task_url(&self, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, TASKS_PATH, id)
    }

    /// Maps non-success responses to [`ApiError`].
    ///
    /// On id routes a 404, or a 400 carrying a wrapped 404 message, becomes `NotFound`.
    async fn check(response: Response, id: Option<i64>) -> Result<Response, ApiError> {
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "task service response");
        if status.is_success() {
            return Ok(response);
        }
        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(ApiError::NotFound { id });
        }
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) => error,
            Err(_) if body.trim().is_empty() => status.canonical_reason().unwrap_or("request failed").to_string(),
            Err(_) => body,
        };
        if let (StatusCode::BAD_REQUEST, Some(id)) = (status, id) {
            if message.trim_start().starts_with(WRAPPED_NOT_FOUND) {
                return Err(ApiError::NotFound { id });
            }
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl TaskService for TaskApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        debug!("GET /{}", TASKS_PATH);
        let response = self.client.get(self.url(TASKS_PATH)).send().await?;
        Self::decode(Self::check(response, None).await?).await
    }

    async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        debug!(title = %task.title, "POST /{}", TASKS_PATH);
        let response = self.client.post(self.url(TASKS_PATH)).json(task).send().await?;
        Self::decode(Self::check(response, None).await?).await
    }

    async fn update(&self, id: i64, patch: &TaskPatch) -> Result<Task, ApiError> {
        debug!(id, "PUT /{}/{}", TASKS_PATH, id);
        let response = self.client.put(self.task_url(id)).json(patch).send().await?;
        Self::decode(Self::check(response, Some(id)).await?).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        debug!(id, "DELETE /{}/{}", TASKS_PATH, id);
        let response = self.client.delete(self.task_url(id)).send().await?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }

    async fn optimize(&self) -> Result<Vec<Task>, ApiError> {
        debug!("POST /{}", OPTIMIZE_PATH);
        let response = self.client.post(self.url(OPTIMIZE_PATH)).send().await?;
        match Self::decode::<OptimizeResponse>(Self::check(response, None).await?).await? {
            OptimizeResponse::Tasks(tasks) => Ok(tasks),
            OptimizeResponse::Message { .. } => Ok(Vec::new()),
        }
    }
}
