//! GitHub REST client for the create-issue operation.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::github_transport_helpers::{normalize_api_base, truncate_for_error};
use crate::issue_tracker::{CreatedIssue, IssueTracker, NewIssue};

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Clone)]
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl GithubApiClient {
    pub fn new(api_base: &str, token: &str, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("issuebot-github-bridge"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .context("invalid github authorization header")?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create github api client")?;
        Ok(Self {
            http,
            api_base: normalize_api_base(api_base),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn request_json<T>(&self, operation: &str, request: reqwest::RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .with_context(|| format!("github api {operation} request failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "github api {operation} failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 800)
            );
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode github {operation}"))
    }
}

#[async_trait]
impl IssueTracker for GithubApiClient {
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        let payload = json!({
            "title": issue.title,
            "body": issue.body,
            "labels": issue.labels,
        });
        let request = self
            .http
            .post(format!(
                "{}/repos/{}/{}/issues",
                self.api_base, issue.repo.owner, issue.repo.name
            ))
            .json(&payload);
        let created: CreatedIssue = self.request_json("create issue", request).await?;
        tracing::debug!(
            repo = %issue.repo,
            number = created.number,
            url = %created.html_url,
            "github issue created"
        );
        Ok(created)
    }
}
