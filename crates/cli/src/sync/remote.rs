// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote task collection client.
//!
//! Provides a trait-based client layer that enables:
//! - A real HTTP/JSON client for production
//! - Mock remotes for unit testing the sync engine

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tq_core::{ServerId, Task};

/// Error type for remote operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("remote returned {status} for {method} {url}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    /// The create response carried no usable identifier.
    #[error("create response did not contain an id")]
    MissingId,

    /// The remote cannot be reached right now.
    #[error("remote unavailable: {0}")]
    Unavailable(String),
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by [`RemoteClient`] methods.
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = RemoteResult<T>> + Send + 'a>>;

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRemoteTask {
    pub title: String,
    pub completed: bool,
}

impl From<&Task> for NewRemoteTask {
    fn from(task: &Task) -> Self {
        NewRemoteTask {
            title: task.title.clone(),
            completed: task.completed,
        }
    }
}

/// Body of an update request. Absent fields are left unchanged remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl From<&Task> for RemotePatch {
    fn from(task: &Task) -> Self {
        RemotePatch {
            title: Some(task.title.clone()),
            completed: Some(task.completed),
        }
    }
}

/// CRUD access to the remote task collection.
///
/// Any `Err` is treated by the sync engine as "not applied": the operation
/// stays queued and is retried on the next drain.
pub trait RemoteClient: Send + Sync {
    /// Create a task and return the identifier the remote assigned.
    fn create(&self, task: NewRemoteTask) -> RemoteFuture<'_, ServerId>;

    /// Update the task with the given identifier.
    fn update(&self, id: ServerId, patch: RemotePatch) -> RemoteFuture<'_, ()>;

    /// Delete the task with the given identifier.
    fn delete(&self, id: ServerId) -> RemoteFuture<'_, ()>;
}

/// Reachability check used to drive the connectivity signal.
pub trait Probe: Send + Sync {
    /// Returns true if the remote answered at all.
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

/// Identifier as found in a create response; some servers send strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct CreatedResponse {
    id: Option<RawId>,
}

impl CreatedResponse {
    fn server_id(self) -> Option<ServerId> {
        match self.id? {
            RawId::Number(n) => Some(ServerId(n)),
            RawId::Text(s) => s.trim().parse().ok().map(ServerId),
        }
    }
}

/// HTTP/JSON implementation of [`RemoteClient`].
///
/// `POST {base}` creates, `PATCH {base}/{id}` updates, `DELETE {base}/{id}`
/// deletes.
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Create a client for the collection at `base_url`.
    ///
    /// `timeout` bounds every request, including the connect phase.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RemoteResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(HttpRemote { client, base_url })
    }

    /// Returns the collection URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: ServerId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

fn check_status(
    method: &'static str,
    response: reqwest::Response,
) -> RemoteResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status {
            method,
            url: response.url().to_string(),
            status: status.as_u16(),
        })
    }
}

impl RemoteClient for HttpRemote {
    fn create(&self, task: NewRemoteTask) -> RemoteFuture<'_, ServerId> {
        Box::pin(async move {
            let response = self.client.post(&self.base_url).json(&task).send().await?;
            let response = check_status("POST", response)?;
            let body: CreatedResponse = response.json().await?;
            body.server_id().ok_or(RemoteError::MissingId)
        })
    }

    fn update(&self, id: ServerId, patch: RemotePatch) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            let response = self
                .client
                .patch(self.item_url(id))
                .json(&patch)
                .send()
                .await?;
            check_status("PATCH", response)?;
            Ok(())
        })
    }

    fn delete(&self, id: ServerId) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            let response = self.client.delete(self.item_url(id)).send().await?;
            match response.status() {
                reqwest::StatusCode::OK | reqwest::StatusCode::NO_CONTENT => Ok(()),
                // Already gone remotely counts as deleted.
                reqwest::StatusCode::NOT_FOUND => {
                    tracing::debug!(%id, "remote delete: not found, treating as deleted");
                    Ok(())
                }
                status => Err(RemoteError::Status {
                    method: "DELETE",
                    url: response.url().to_string(),
                    status: status.as_u16(),
                }),
            }
        })
    }
}

impl Probe for HttpRemote {
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move {
            match self.client.head(&self.base_url).send().await {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!(error = %e, "reachability probe failed");
                    false
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
