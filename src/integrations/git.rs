#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::Result;
use std::process::Command;

use crate::domain::branch::ListingMode;
use crate::error::PiarError;

/// Source of raw branch listing text
pub trait BranchSource {
    /// Raw output of the branch listing command
    fn list(&self) -> Result<String>;
}

/// Real git implementation
#[derive(Debug, Default)]
pub struct RealGitClient {
    mode: ListingMode,
}

impl RealGitClient {
    pub const fn new(mode: ListingMode) -> Self {
        Self { mode }
    }

    /// Arguments passed to `git`
    pub const fn args(&self) -> &'static [&'static str] {
        match self.mode {
            ListingMode::Remote => &["branch", "-r", "--no-color"],
            ListingMode::Local => &["branch", "--no-color"],
        }
    }

    /// Command line as shown in error messages
    pub fn command_line(&self) -> String {
        format!("git {}", self.args().join(" "))
    }
}

impl BranchSource for RealGitClient {
    fn list(&self) -> Result<String> {
        let output = Command::new("git").args(self.args()).output().map_err(|err| {
            PiarError::CommandExecutionFailure {
                command: self.command_line(),
                stderr: err.to_string(),
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PiarError::CommandExecutionFailure {
                command: self.command_line(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
