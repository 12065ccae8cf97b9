//! Fatal conditions that abort a run
//!
//! Every variant ends the process with exit status 1. Nothing here is retried.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PiarError {
    /// A required environment or config value is absent
    #[error("Missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// The git invocation could not run or exited non-zero
    #[error("Error executing command `{command}`: {stderr}")]
    CommandExecutionFailure { command: String, stderr: String },

    #[error("No branches found")]
    EmptyInventory,

    /// The branch listing had no `* <branch>` or `<remote>/HEAD -> ...` entry
    #[error("Could not determine the current branch: no HEAD marker in branch listing")]
    NoCurrentBranch,

    /// The user left a prompt with Esc or `q`
    #[error("Cancelled, no pull request was created")]
    Cancelled,

    #[error("GitHub rejected the pull request: {0}")]
    SubmissionFailure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failure_names_command() {
        let err = PiarError::CommandExecutionFailure {
            command: "git branch -r".to_string(),
            stderr: "fatal: not a git repository".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("git branch -r"));
        assert!(message.contains("not a git repository"));
    }

    #[test]
    fn test_missing_configuration_names_item() {
        let err = PiarError::MissingConfiguration("repository name (PIAR_REPO)");
        assert_eq!(
            err.to_string(),
            "Missing configuration: repository name (PIAR_REPO)"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = PiarError::NoCurrentBranch.into();
        assert_eq!(
            err.downcast_ref::<PiarError>(),
            Some(&PiarError::NoCurrentBranch)
        );
    }
}
