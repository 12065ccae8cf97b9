//! Configuration schema and type definitions

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::branch::BranchListing;
use crate::domain::question::QuestionDescriptor;
use crate::domain::render::DEFAULT_TICKET_URL;
use crate::integrations::gh::DEFAULT_API_URL;

/// Configuration for piar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub branches: BranchListing,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub template: TemplateConfig,
    /// Questions asked after the draft/base/compare questions
    /// Replaces the built-in PR questions when present
    #[serde(default)]
    pub questions: Option<Vec<QuestionDescriptor>>,
    /// File this config was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Target repository; `PIAR_OWNER` / `PIAR_REPO` take precedence
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// GitHub API settings
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    /// REST API root, change for GitHub Enterprise
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Title/body rendering settings
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    /// Ticket link target
    /// Variables: {ticket}
    #[serde(default = "default_ticket_url")]
    pub ticket_url: String,
    /// Title template, answers are available as {key}
    #[serde(default)]
    pub title: Option<String>,
    /// Inline body template
    #[serde(default)]
    pub body: Option<String>,
    /// Body template file, relative paths are resolved from the config file's directory
    #[serde(default)]
    pub body_file: Option<PathBuf>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            ticket_url: default_ticket_url(),
            title: None,
            body: None,
            body_file: None,
        }
    }
}

fn default_ticket_url() -> String {
    DEFAULT_TICKET_URL.to_string()
}
