//! Branch inventory parsed from `git branch` output
#![allow(clippy::must_use_candidate)]

use std::fmt;

use serde::Deserialize;

use crate::error::PiarError;

/// Normalized branch name: no remote prefix, no surrounding whitespace,
/// no HEAD-pointer artifacts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// Returns `None` for empty names and names spanning multiple lines
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() || name.contains(['\n', '\r']) {
            return None;
        }
        Some(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for BranchName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Which branches are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    /// `git branch -r`: `<remote>/<name>` entries, `<remote>/HEAD -> <remote>/<name>` marker
    #[default]
    Remote,
    /// `git branch`: `* <name>` marks the checked-out branch
    Local,
}

/// Branch listing settings (`[branches]` in config)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BranchListing {
    #[serde(default)]
    pub source: ListingMode,
    /// Remote whose prefix is stripped; entries of other remotes are dropped
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for BranchListing {
    fn default() -> Self {
        Self {
            source: ListingMode::default(),
            remote: default_remote(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

/// One line of the listing after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchEntry {
    /// HEAD pointer, holding the branch it points at
    Head(BranchName),
    Branch(BranchName),
}

/// Ordered, deduplicated branch entries from a single listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInventory {
    entries: Vec<BranchEntry>,
}

impl BranchInventory {
    /// Parse raw `git branch` output
    ///
    /// Lines are trimmed and empty ones dropped. In remote mode, entries of
    /// other remotes are dropped and the configured remote prefix is stripped.
    /// Listing order is kept.
    ///
    /// # Errors
    /// Returns [`PiarError::EmptyInventory`] if no entry survives
    pub fn parse(raw: &str, listing: &BranchListing) -> Result<Self, PiarError> {
        let mut entries: Vec<BranchEntry> = Vec::new();

        for line in raw.split(['\n', '\r']) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let entry = match listing.source {
                ListingMode::Local => parse_local_line(line),
                ListingMode::Remote => parse_remote_line(line, &listing.remote),
            };

            if let Some(entry) = entry {
                if !entries.contains(&entry) {
                    entries.push(entry);
                }
            }
        }

        if entries.is_empty() {
            return Err(PiarError::EmptyInventory);
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[BranchEntry] {
        &self.entries
    }

    /// Branch the HEAD marker points at
    ///
    /// # Errors
    /// Returns [`PiarError::NoCurrentBranch`] if the listing had no HEAD marker
    pub fn current(&self) -> Result<&BranchName, PiarError> {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                BranchEntry::Head(name) => Some(name),
                BranchEntry::Branch(_) => None,
            })
            .ok_or(PiarError::NoCurrentBranch)
    }

    /// All entries except HEAD pointers, in listing order
    pub fn selectable(&self) -> Vec<BranchName> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                BranchEntry::Branch(name) => Some(name.clone()),
                BranchEntry::Head(_) => None,
            })
            .collect()
    }

    /// Selectable branches plus the current branch
    ///
    /// The current branch is put first when the listing does not already
    /// contain it as a regular entry (local mode).
    ///
    /// # Errors
    /// Returns [`PiarError::NoCurrentBranch`] if the listing had no HEAD marker
    pub fn compare_candidates(&self) -> Result<Vec<BranchName>, PiarError> {
        let current = self.current()?;
        let mut candidates = self.selectable();
        if !candidates.contains(current) {
            candidates.insert(0, current.clone());
        }
        Ok(candidates)
    }
}

fn parse_local_line(line: &str) -> Option<BranchEntry> {
    if let Some(rest) = line.strip_prefix('*') {
        let name = rest.trim();
        // "(HEAD detached at 1a2b3c4)"
        if name.starts_with('(') {
            return None;
        }
        return BranchName::new(name).map(BranchEntry::Head);
    }

    // "+" marks a branch checked out in another worktree
    let name = line.strip_prefix('+').unwrap_or(line);
    BranchName::new(name).map(BranchEntry::Branch)
}

fn parse_remote_line(line: &str, remote: &str) -> Option<BranchEntry> {
    if let Some((pointer, target)) = line.split_once(" -> ") {
        let pointer = pointer.trim();
        if pointer != remote && strip_remote(pointer, remote).is_none() {
            return None;
        }
        let target = strip_remote(target.trim(), remote)?;
        return BranchName::new(target).map(BranchEntry::Head);
    }

    strip_remote(line, remote)
        .and_then(BranchName::new)
        .map(BranchEntry::Branch)
}

fn strip_remote<'a>(name: &'a str, remote: &str) -> Option<&'a str> {
    name.strip_prefix(remote)?.strip_prefix('/')
}
