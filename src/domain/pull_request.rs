//! Pull request ready for submission

use anyhow::{Context, Result};

use super::branch::BranchName;
use super::pipeline::{BASE, COMPARE, DRAFT};
use super::question::AnswerRecord;
use super::render::PrRenderer;

/// Everything the GitHub API needs to open one pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    pub owner: String,
    pub repo: String,
    pub base: BranchName,
    pub head: BranchName,
    pub draft: bool,
    pub title: String,
    pub body: String,
}

impl PullRequestDraft {
    /// Build the draft from a complete answer record
    ///
    /// # Errors
    /// Returns an error if the base or compare branch answer is missing
    pub fn from_answers(
        owner: &str,
        repo: &str,
        answers: &AnswerRecord,
        renderer: &dyn PrRenderer,
    ) -> Result<Self> {
        let base = BranchName::new(answers.text(BASE)).context("No base branch selected")?;
        let head = BranchName::new(answers.text(COMPARE)).context("No compare branch selected")?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            base,
            head,
            draft: answers.flag(DRAFT).unwrap_or(false),
            title: renderer.render_title(answers),
            body: renderer.render_body(answers),
        })
    }

    /// Head reference in `<owner>:<branch>` form
    #[must_use]
    pub fn head_ref(&self) -> String {
        format!("{}:{}", self.owner, self.head)
    }
}
