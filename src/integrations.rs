// External integrations module
// This module contains the collaborators that touch processes, terminals or the network

pub mod git;
pub mod prompt;

// GitHub integration
pub mod gh;
