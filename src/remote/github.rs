//! GitHub-shaped remote host client.
//!
//! Talks to the GitHub contents API over HTTPS with a personal access token.
//! Content arrives and leaves base64-encoded; decoding tolerates the
//! newline-wrapped form the API emits.

use crate::error::RemoteError;
use crate::remote::{EntryKind, RemoteEntry, RemoteHost, RemoteLocation, WritePayload};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Repository metadata as returned by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub default_branch: String,
    #[serde(default)]
    pub private: bool,
}

#[derive(Deserialize)]
struct ContentEntry {
    path: String,
    #[serde(rename = "type")]
    entry_type: String,
    sha: String,
    size: Option<u64>,
    content: Option<String>,
}

#[derive(Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Deserialize)]
struct WrittenContent {
    sha: String,
}

/// Token-authenticated client for the GitHub contents API.
pub struct GitHubClient {
    client: Client,
    token: String,
    api_base: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Result<Self, RemoteError> {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    pub fn with_api_base(
        token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RemoteError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: token.into(),
            api_base: api_base.into(),
        })
    }

    fn contents_url(&self, location: &RemoteLocation, path: &str) -> String {
        if path.is_empty() {
            format!(
                "{}/repos/{}/{}/contents",
                self.api_base, location.owner, location.repo
            )
        } else {
            format!(
                "{}/repos/{}/{}/contents/{}",
                self.api_base, location.owner, location.repo, path
            )
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "atelier")
    }

    /// Repositories of the authenticated user, most recently updated first.
    pub async fn list_repositories(&self) -> Result<Vec<Repository>, RemoteError> {
        let url = format!("{}/user/repos?sort=updated&per_page=100", self.api_base);
        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response, None).await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::BadResponse(format!("Failed to parse repositories: {}", e)))
    }

    /// Create a repository for the authenticated user, initialized with a
    /// first commit so the contents API has a branch to write against.
    pub async fn create_repository(
        &self,
        name: &str,
        description: &str,
        private: bool,
    ) -> Result<Repository, RemoteError> {
        let url = format!("{}/user/repos", self.api_base);
        let body = json!({
            "name": name,
            "description": description,
            "private": private,
            "auto_init": true,
        });

        let response = self
            .request(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response, None).await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::BadResponse(format!("Failed to parse repository: {}", e)))
    }
}

#[async_trait]
impl RemoteHost for GitHubClient {
    async fn list_directory(
        &self,
        location: &RemoteLocation,
        path: &str,
    ) -> Result<Vec<RemoteEntry>, RemoteError> {
        let url = format!("{}?ref={}", self.contents_url(location, path), location.branch);
        debug!(%url, "Listing remote directory");

        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = check_status(response, None).await?;

        let entries: Vec<ContentEntry> = response
            .json()
            .await
            .map_err(|e| RemoteError::BadResponse(format!("Failed to parse listing: {}", e)))?;

        Ok(entries
            .into_iter()
            .map(|entry| RemoteEntry {
                kind: if entry.entry_type == "dir" {
                    EntryKind::Dir
                } else {
                    EntryKind::File
                },
                path: entry.path,
                revision: entry.sha,
                size: entry.size,
            })
            .collect())
    }

    async fn get_file_content(
        &self,
        location: &RemoteLocation,
        path: &str,
    ) -> Result<String, RemoteError> {
        let url = format!("{}?ref={}", self.contents_url(location, path), location.branch);

        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = check_status(response, None).await?;

        let entry: ContentEntry = response
            .json()
            .await
            .map_err(|e| RemoteError::BadResponse(format!("Failed to parse file entry: {}", e)))?;

        let encoded = entry
            .content
            .ok_or_else(|| RemoteError::BadResponse(format!("No content for file: {}", path)))?;
        decode_base64(&encoded)
    }

    async fn write_file(
        &self,
        location: &RemoteLocation,
        path: &str,
        payload: WritePayload<'_>,
    ) -> Result<String, RemoteError> {
        let url = self.contents_url(location, path);
        let mut body = json!({
            "message": payload.message,
            "content": BASE64.encode(payload.content.as_bytes()),
            "branch": location.branch,
        });
        if let Some(revision) = payload.revision {
            body["sha"] = json!(revision);
        }

        let response = self
            .request(self.client.put(&url))
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = check_status(response, Some(path)).await?;

        let written: WriteResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::BadResponse(format!("Failed to parse write result: {}", e)))?;
        Ok(written.content.sha)
    }
}

/// Decode base64 content, tolerating the whitespace GitHub inserts.
fn decode_base64(encoded: &str) -> Result<String, RemoteError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| RemoteError::BadResponse(format!("Invalid base64 content: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| RemoteError::BadResponse(format!("Content is not UTF-8: {}", e)))
}

fn map_transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Unavailable(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        RemoteError::Unavailable(format!("Connection error: {}", error))
    } else {
        RemoteError::Unavailable(format!("HTTP error: {}", error))
    }
}

/// Map a non-success status to the error taxonomy. `write_path` marks the
/// request as a precondition-carrying write, where 409/422 mean the revision
/// token was rejected.
async fn check_status(
    response: reqwest::Response,
    write_path: Option<&str>,
) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(match status {
        StatusCode::UNAUTHORIZED => {
            RemoteError::AuthFailed(format!("Authentication failed: {}", detail))
        }
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            RemoteError::RateLimit(format!("Rate limit exceeded: {}", detail))
        }
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY if write_path.is_some() => {
            RemoteError::Conflict {
                path: write_path.unwrap_or_default().to_string(),
            }
        }
        _ => RemoteError::Unavailable(format!("Request failed with status {}: {}", status, detail)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64_plain() {
        let encoded = BASE64.encode("hello world");
        assert_eq!(decode_base64(&encoded).unwrap(), "hello world");
    }

    #[test]
    fn test_decode_base64_with_newlines() {
        // GitHub wraps encoded content at 60 columns
        let encoded = BASE64.encode("line one\nline two");
        let wrapped = format!("{}\n{}", &encoded[..8], &encoded[8..]);
        assert_eq!(decode_base64(&wrapped).unwrap(), "line one\nline two");
    }

    #[test]
    fn test_decode_base64_rejects_garbage() {
        assert!(matches!(
            decode_base64("!!not base64!!"),
            Err(RemoteError::BadResponse(_))
        ));
    }

    #[test]
    fn test_contents_url_root_and_nested() {
        let client = GitHubClient::new("t").unwrap();
        let loc = RemoteLocation::new("octo", "demo", "main");
        assert_eq!(
            client.contents_url(&loc, ""),
            "https://api.github.com/repos/octo/demo/contents"
        );
        assert_eq!(
            client.contents_url(&loc, "src/app.js"),
            "https://api.github.com/repos/octo/demo/contents/src/app.js"
        );
    }
}
