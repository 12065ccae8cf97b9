//! Open command - ask about the current change and open one pull request

use anyhow::Result;

use crate::color;
use crate::config::{Config, Settings};
use crate::integrations::gh::RealGhClient;
use crate::integrations::git::RealGitClient;
use crate::integrations::prompt::DialoguerPrompter;
use crate::service::PrService;

/// Run the interactive flow against the real git, terminal and GitHub
///
/// The pull request URL is the only thing written to stdout.
///
/// # Errors
/// Returns an error if:
/// - Configuration is missing or invalid
/// - Git branch listing fails or yields no usable branches
/// - The user cancels a prompt
/// - GitHub rejects the pull request
pub fn cmd_open(color_mode: color::ColorMode) -> Result<()> {
    let settings = Settings::resolve(Config::load()?)?;
    let colorful = color_mode.should_colorize();

    let service = PrService::new(
        RealGitClient::new(settings.listing.source),
        DialoguerPrompter::new(colorful),
        RealGhClient::new(&settings.api_url, &settings.token, colorful)?,
    );
    let created = service.run(&settings)?;

    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!(
                "Created pull request #{} {}",
                created.number,
                color::dim(color_mode, format!("({}/{})", settings.owner, settings.repo))
            )
        )
    );
    println!("{}", created.html_url);

    Ok(())
}
