#![allow(clippy::missing_errors_doc)]
use anyhow::Result;

use crate::config::Settings;
use crate::domain::branch::BranchInventory;
use crate::domain::pipeline::build_pipeline;
use crate::domain::pull_request::PullRequestDraft;
use crate::domain::question::QuestionDescriptor;
use crate::error::PiarError;
use crate::integrations::gh::{CreatedPullRequest, GhClient};
use crate::integrations::git::BranchSource;
use crate::integrations::prompt::Prompter;

/// Pull request service that coordinates git, prompts and GitHub
pub struct PrService<B, P, G>
where
    B: BranchSource,
    P: Prompter,
    G: GhClient,
{
    branch_source: B,
    prompter: P,
    gh_client: G,
}

impl<B, P, G> PrService<B, P, G>
where
    B: BranchSource,
    P: Prompter,
    G: GhClient,
{
    /// Create a new pull request service
    pub const fn new(branch_source: B, prompter: P, gh_client: G) -> Self {
        Self {
            branch_source,
            prompter,
            gh_client,
        }
    }

    /// Inspect branches and build the question list
    pub fn questions(&self, settings: &Settings) -> Result<Vec<QuestionDescriptor>> {
        let raw = self.branch_source.list()?;
        let inventory = BranchInventory::parse(&raw, &settings.listing)?;
        build_pipeline(&inventory, settings.questions.as_deref())
    }

    /// Run the whole flow and open one pull request
    ///
    /// # Errors
    /// - git listing fails, or yields no usable branches
    /// - [`PiarError::Cancelled`] if the user cancels a prompt; GitHub is not called
    /// - the GitHub API rejects the request
    pub fn run(&self, settings: &Settings) -> Result<CreatedPullRequest> {
        let questions = self.questions(settings)?;

        let answers = self
            .prompter
            .collect(&questions)?
            .ok_or(PiarError::Cancelled)?;

        let draft = PullRequestDraft::from_answers(
            &settings.owner,
            &settings.repo,
            &answers,
            settings.renderer.as_ref(),
        )?;

        self.gh_client.create_pull_request(&draft)
    }
}
