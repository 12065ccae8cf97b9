use clap::Parser;

/// Interactive pull request assistant for GitHub
///
/// Lists branches with git, asks about the change, and opens one pull request
/// on the configured repository. Needs a token in
/// `PIAR_GITHUB_TOKEN` (or `GITHUB_TOKEN`), plus owner and repository from the
/// environment or a `.piar.toml`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// When to use colored output
    #[arg(long, value_name = "WHEN", ignore_case = true)]
    pub color: Option<crate::color::ColorMode>,
}
