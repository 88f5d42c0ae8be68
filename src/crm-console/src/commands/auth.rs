//! Session commands.

use clap::Subcommand;
use crm_api::CrmClient;

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Show the current session user
    Status,
    /// Clear the server session
    Logout,
}

pub async fn handle(action: AuthCommands, client: &CrmClient) -> anyhow::Result<()> {
    match action {
        AuthCommands::Status => match client.auth_status().await? {
            Some(user) => {
                let name = user.name.as_deref().unwrap_or("(unnamed)");
                let email = user.email.as_deref().unwrap_or("-");
                println!("Logged in as {name} <{email}>");
            }
            None => println!("Not logged in"),
        },
        AuthCommands::Logout => {
            client.logout().await?;
            println!("Logged out");
        }
    }
    Ok(())
}
