use clap::{Parser, Subcommand};

use crate::auth::{self, ROLE_ADMIN};
use crate::database::manager::DatabaseManager;
use crate::database::models::User;

#[derive(Parser)]
#[command(name = "agencyctl")]
#[command(about = "Operational CLI for the Agency API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "One-time admin user bootstrap")]
    Bootstrap {
        #[arg(long, help = "Admin login email")]
        email: String,

        #[arg(long, help = "Admin password (hashed before storage)")]
        password: String,
    },

    #[command(about = "Check database connectivity")]
    Health,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Bootstrap { email, password } => bootstrap(&email, &password).await,
        Commands::Health => health().await,
    }
}

/// Create the admin credential record. Safe to re-run: an existing email is
/// reported, never overwritten.
async fn bootstrap(email: &str, password: &str) -> anyhow::Result<()> {
    if !email.contains('@') {
        anyhow::bail!("'{}' does not look like an email address", email);
    }
    if password.len() < 8 {
        anyhow::bail!("password must be at least 8 characters");
    }

    let pool = DatabaseManager::new().pool().await?;

    let hash = auth::hash_password(password)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;

    match User::insert(&pool, email, &hash, ROLE_ADMIN).await? {
        Some(user) => println!("Created admin user {} ({})", user.email, user.id),
        None => println!("User {} already exists, nothing to do", email),
    }

    Ok(())
}

async fn health() -> anyhow::Result<()> {
    DatabaseManager::new().health_check().await?;
    println!("Database connection OK");
    Ok(())
}
