//! Run settings resolved from environment and configuration
//!
//! Everything the orchestrator needs is collected here once at startup and
//! validated before any git command runs.

use anyhow::{Context, Result};

use super::schema::Config;
use crate::domain::branch::BranchListing;
use crate::domain::pipeline::validate_extra;
use crate::domain::question::QuestionDescriptor;
use crate::domain::render::{ChecklistRenderer, PrRenderer, TemplateRenderer};
use crate::error::PiarError;

pub const OWNER_ENV: &str = "PIAR_OWNER";
pub const REPO_ENV: &str = "PIAR_REPO";
/// Token variables in lookup order
pub const TOKEN_ENVS: [&str; 3] = ["PIAR_GITHUB_TOKEN", "GITHUB_TOKEN", "GH_TOKEN"];

/// Validated settings for one run
pub struct Settings {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub api_url: String,
    pub listing: BranchListing,
    /// Configured questions replacing the built-in PR questions
    pub questions: Option<Vec<QuestionDescriptor>>,
    pub renderer: Box<dyn PrRenderer>,
}

impl Settings {
    /// Combine the environment with `config`
    ///
    /// Environment values win over config values. Empty values count as missing.
    ///
    /// # Errors
    /// - [`PiarError::MissingConfiguration`] for the first missing owner, repository or token
    /// - configured questions are invalid
    /// - the body template file cannot be read
    pub fn resolve(config: Config) -> Result<Self> {
        let owner = env_value(OWNER_ENV)
            .or_else(|| non_empty(config.repository.owner.clone()))
            .ok_or(PiarError::MissingConfiguration(
                "repository owner (PIAR_OWNER)",
            ))?;
        let repo = env_value(REPO_ENV)
            .or_else(|| non_empty(config.repository.name.clone()))
            .ok_or(PiarError::MissingConfiguration(
                "repository name (PIAR_REPO)",
            ))?;
        let token = TOKEN_ENVS
            .iter()
            .find_map(|name| env_value(name))
            .ok_or(PiarError::MissingConfiguration(
                "GitHub token (PIAR_GITHUB_TOKEN or GITHUB_TOKEN)",
            ))?;

        if let Some(questions) = &config.questions {
            validate_extra(questions).context("Invalid [[questions]] in config")?;
        }

        let renderer = build_renderer(&config)?;

        Ok(Self {
            owner,
            repo,
            token,
            api_url: config.github.api_url,
            listing: config.branches,
            questions: config.questions,
            renderer,
        })
    }
}

fn build_renderer(config: &Config) -> Result<Box<dyn PrRenderer>> {
    let checklist = ChecklistRenderer::new(&config.template.ticket_url);

    let body = match (&config.template.body, &config.template.body_file) {
        (Some(body), _) => Some(body.clone()),
        (None, Some(file)) => {
            let path = config.resolve_path(file);
            let body = std::fs::read_to_string(&path).with_context(|| {
                format!("Failed to read body template: {}", path.display())
            })?;
            Some(body)
        }
        (None, None) => None,
    };

    let title = config.template.title.clone();
    if title.is_none() && body.is_none() {
        return Ok(Box::new(checklist));
    }

    Ok(Box::new(TemplateRenderer::new(title, body, checklist)))
}

fn env_value(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
