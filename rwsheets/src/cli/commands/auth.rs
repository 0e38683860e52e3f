//! Auth command handler

use anyhow::Result;
use colored::*;

use rwsheets::config::Config;

use crate::cli::connect;

/// Build the client once, running the consent flow when no token is cached yet
pub async fn handle_auth_command(config: &Config) -> Result<()> {
    let client = connect(config).await?;
    log::debug!("Authorized client: {:?}", client);

    println!("{}", "Authorization successful".green().bold());
    if let Some(token) = &config.token {
        println!("Token cached at: {}", token.display().to_string().cyan());
    }
    Ok(())
}
