// Export modules for testing
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod service;

// Integration modules
pub mod integrations;

// Command modules
pub mod commands;

// Domain modules
pub mod domain;
