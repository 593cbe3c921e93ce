//! Typed HTTP client for the task store REST API.
//!
//! One method per endpoint. Non-2xx responses are decoded into the wire
//! [`ErrorBody`] so the server's own message (validation detail included)
//! reaches the UI.

use reqwest::StatusCode;
use uuid::Uuid;

use taskdeck_api::error::ErrorBody;
use taskdeck_api::task::{Task, TaskDraft, TaskPatch};

/// Errors from a task API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    /// Transport-level failure (connection refused, timeout, bad URL).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("{message}")]
    Server {
        /// HTTP status of the response.
        status: StatusCode,
        /// Message from the wire error body, or a fallback.
        message: String,
    },
}

/// Client for one task store server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the server at `base_url`
    /// (e.g. `http://127.0.0.1:3000`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: Uuid) -> String {
        format!("{}/api/tasks/{id}", self.base_url)
    }

    /// Fetches all tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError`] on transport failure or an error status.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiClientError> {
        let res = self.http.get(self.collection_url()).send().await?;
        Ok(expect_ok(res).await?.json().await?)
    }

    /// Fetches a single task by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Server`] with a 404 status when absent.
    pub async fn get_task(&self, id: Uuid) -> Result<Task, ApiClientError> {
        let res = self.http.get(self.task_url(id)).send().await?;
        Ok(expect_ok(res).await?.json().await?)
    }

    /// Creates a task from the draft and returns the persisted record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Server`] with the validation message on 400.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiClientError> {
        let res = self
            .http
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        Ok(expect_ok(res).await?.json().await?)
    }

    /// Applies a partial update and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError`] on transport failure or an error status.
    pub async fn update_task(&self, id: Uuid, patch: &TaskPatch) -> Result<Task, ApiClientError> {
        let res = self.http.put(self.task_url(id)).json(patch).send().await?;
        Ok(expect_ok(res).await?.json().await?)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError`] on transport failure or an error status.
    pub async fn delete_task(&self, id: Uuid) -> Result<(), ApiClientError> {
        let res = self.http.delete(self.task_url(id)).send().await?;
        expect_ok(res).await?;
        Ok(())
    }
}

/// Passes success responses through; decodes the error body otherwise.
async fn expect_ok(res: reqwest::Response) -> Result<reqwest::Response, ApiClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = res
        .json::<ErrorBody>()
        .await
        .map_or_else(|_| format!("server returned {status}"), |body| body.message);
    Err(ApiClientError::Server { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.collection_url(), "http://localhost:3000/api/tasks");
    }

    #[test]
    fn task_url_embeds_id() {
        let client = ApiClient::new("http://localhost:3000");
        let id = Uuid::nil();
        assert_eq!(
            client.task_url(id),
            format!("http://localhost:3000/api/tasks/{id}")
        );
    }
}
