#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::pulls_endpoint;
use crate::domain::pull_request::PullRequestDraft;
use crate::error::PiarError;

const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Pull request returned by the GitHub API
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPullRequest {
    pub number: u64,
    pub html_url: String,
}

/// Request body for `POST /repos/{owner}/{repo}/pulls`
#[derive(Debug, Serialize)]
pub struct CreatePullRequest<'a> {
    pub title: &'a str,
    pub head: String,
    pub base: &'a str,
    pub body: &'a str,
    pub draft: bool,
}

impl<'a> CreatePullRequest<'a> {
    pub fn from_draft(draft: &'a PullRequestDraft) -> Self {
        Self {
            title: &draft.title,
            head: draft.head_ref(),
            base: draft.base.as_str(),
            body: &draft.body,
            draft: draft.draft,
        }
    }
}

/// GitHub error payload
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Trait for creating pull requests on GitHub
pub trait GhClient {
    /// Open a pull request; called once per run
    fn create_pull_request(&self, draft: &PullRequestDraft) -> Result<CreatedPullRequest>;
}

/// Real implementation using the GitHub REST API
pub struct RealGhClient {
    http: Client,
    api_url: String,
    token: String,
    show_progress: bool,
}

impl RealGhClient {
    pub fn new(api_url: &str, token: &str, show_progress: bool) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("piar/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            api_url: api_url.to_string(),
            token: token.to_string(),
            show_progress,
        })
    }

    fn spinner(&self, draft: &PullRequestDraft) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!(
            "Creating pull request on {}/{}",
            draft.owner, draft.repo
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

impl GhClient for RealGhClient {
    fn create_pull_request(&self, draft: &PullRequestDraft) -> Result<CreatedPullRequest> {
        let url = pulls_endpoint(&self.api_url, &draft.owner, &draft.repo);
        let spinner = self.spinner(draft);

        let result = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&CreatePullRequest::from_draft(draft))
            .send();

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let response = result.with_context(|| format!("Failed to send request to {url}"))?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(PiarError::SubmissionFailure(describe_failure(status.as_u16(), &text)).into());
        }

        response
            .json::<CreatedPullRequest>()
            .context("Failed to parse pull request response")
    }
}

/// One-line description of a rejected request
pub fn describe_failure(status: u16, body: &str) -> String {
    let Ok(error) = serde_json::from_str::<ApiError>(body) else {
        let body = body.trim();
        return if body.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {body}")
        };
    };

    let details: Vec<String> = error
        .errors
        .iter()
        .filter_map(|detail| detail.message.clone().or_else(|| detail.code.clone()))
        .collect();

    if details.is_empty() {
        format!("HTTP {status}: {}", error.message)
    } else {
        format!("HTTP {status}: {} ({})", error.message, details.join("; "))
    }
}
