use crate::config::RepositoryConfig;
use crate::domain::ports::Repository;
use crate::utils::error::{AppError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

/// Writes files through the GitHub repository contents API.
#[derive(Clone)]
pub struct GitHubRepository {
    client: Client,
    api_base: String,
    web_base: String,
    owner: String,
    name: String,
    branch: String,
    token: String,
}

impl std::fmt::Debug for GitHubRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubRepository")
            .field("api_base", &self.api_base)
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("branch", &self.branch)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl GitHubRepository {
    pub fn new(config: &RepositoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            web_base: config.web_base.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            name: config.name.clone(),
            branch: config.branch.clone(),
            token: config.token.clone(),
        })
    }

    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.name, path
        )
    }

    /// Blob sha of the file currently at `path`, if any. Lookup failures are
    /// treated as "file does not exist".
    async fn existing_sha(&self, path: &str) -> Option<String> {
        let response = self
            .client
            .get(self.contents_url(path))
            .query(&[("ref", self.branch.as_str())])
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .send()
            .await;

        match response {
            Ok(response) if response.status() == StatusCode::OK => {
                match response.json::<ContentsEntry>().await {
                    Ok(entry) => Some(entry.sha),
                    Err(e) => {
                        tracing::debug!("No sha in contents of {}: {}", path, e);
                        None
                    }
                }
            }
            Ok(response) => {
                tracing::debug!("{} not present yet (HTTP {})", path, response.status());
                None
            }
            Err(e) => {
                tracing::debug!("Lookup of {} failed: {}", path, e);
                None
            }
        }
    }
}

impl Repository for GitHubRepository {
    async fn put_file(&self, path: &str, message: &str, content: &str) -> Result<()> {
        let payload = PutContentsRequest {
            message,
            content: STANDARD.encode(content.as_bytes()),
            branch: &self.branch,
            sha: self.existing_sha(path).await,
        };

        tracing::debug!("PUT {} (update: {})", self.contents_url(path), payload.sha.is_some());
        let response = self
            .client
            .put(self.contents_url(path))
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Commit {
                path: path.to_string(),
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            tracing::info!("📁 {} successfully created/updated in GitHub repo.", path);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GitHubErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        tracing::error!("Failed to create/update {}: HTTP {} {}", path, status, message);

        Err(AppError::Commit {
            path: path.to_string(),
            status: Some(status.as_u16()),
            message,
        })
    }

    fn blob_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/blob/{}/{}",
            self.web_base, self.owner, self.name, self.branch, path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn repository(server: &MockServer, timeout_seconds: u64) -> GitHubRepository {
        let config = RepositoryConfig {
            owner: "ebbsleo".to_string(),
            name: "customizations".to_string(),
            api_base: server.base_url(),
            timeout_seconds,
            token: "ghp_test".to_string(),
            ..RepositoryConfig::default()
        };
        GitHubRepository::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_put_file_creates_new_file() {
        let server = MockServer::start();
        let lookup = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/ebbsleo/customizations/contents/web-dev1/main.tf")
                .query_param("ref", "main");
            then.status(404).json_body(json!({"message": "Not Found"}));
        });
        let put = server.mock(|when, then| {
            when.method(PUT)
                .path("/repos/ebbsleo/customizations/contents/web-dev1/main.tf")
                .header("Authorization", "Bearer ghp_test")
                .header("Accept", "application/vnd.github.v3+json")
                .json_body(json!({
                    "message": "Add main.tf for dev1",
                    "content": "dGVycmFmb3JtIHt9",
                    "branch": "main"
                }));
            then.status(201).json_body(json!({"content": {"path": "web-dev1/main.tf"}}));
        });

        let repo = repository(&server, 20);
        repo.put_file("web-dev1/main.tf", "Add main.tf for dev1", "terraform {}")
            .await
            .unwrap();

        lookup.assert();
        put.assert();
    }

    #[tokio::test]
    async fn test_put_file_updates_existing_file_with_sha() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/ebbsleo/customizations/contents/web-dev1/README.md");
            then.status(200).json_body(json!({"sha": "abc123", "path": "web-dev1/README.md"}));
        });
        let put = server.mock(|when, then| {
            when.method(PUT)
                .path("/repos/ebbsleo/customizations/contents/web-dev1/README.md")
                .json_body_partial(r#"{"sha": "abc123"}"#);
            then.status(200).json_body(json!({}));
        });

        let repo = repository(&server, 20);
        repo.put_file("web-dev1/README.md", "Add README.md for dev1", "# Docs")
            .await
            .unwrap();

        put.assert();
    }

    #[tokio::test]
    async fn test_put_file_rejected_status_is_commit_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT);
            then.status(422)
                .json_body(json!({"message": "Invalid request.\n\n\"sha\" wasn't supplied."}));
        });

        let repo = repository(&server, 20);
        let result = repo.put_file("web-dev1/main.tf", "msg", "body").await;

        match result {
            Err(AppError::Commit {
                path,
                status,
                message,
            }) => {
                assert_eq!(path, "web-dev1/main.tf");
                assert_eq!(status, Some(422));
                assert!(message.starts_with("Invalid request."));
            }
            other => panic!("expected Commit error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_put_file_timeout_is_commit_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT);
            then.status(201).delay(Duration::from_secs(3));
        });

        let repo = repository(&server, 1);
        let result = repo.put_file("web-dev1/main.tf", "msg", "body").await;

        assert!(matches!(
            result,
            Err(AppError::Commit { status: None, .. })
        ));
    }

    #[test]
    fn test_urls() {
        let config = RepositoryConfig {
            owner: "ebbsleo".to_string(),
            name: "learn-terraform-aft-account-customizations".to_string(),
            api_base: "https://api.github.com/".to_string(),
            token: "t".to_string(),
            ..RepositoryConfig::default()
        };
        let repo = GitHubRepository::new(&config).unwrap();

        assert_eq!(
            repo.contents_url("web-dev1/main.tf"),
            "https://api.github.com/repos/ebbsleo/learn-terraform-aft-account-customizations/contents/web-dev1/main.tf"
        );
        assert_eq!(
            repo.blob_url("web-dev1/README.md"),
            "https://github.com/ebbsleo/learn-terraform-aft-account-customizations/blob/main/web-dev1/README.md"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = RepositoryConfig {
            token: "ghp_secret".to_string(),
            ..RepositoryConfig::default()
        };
        let repo = GitHubRepository::new(&config).unwrap();
        assert!(!format!("{:?}", repo).contains("ghp_secret"));
    }
}
