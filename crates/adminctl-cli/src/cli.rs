use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "adminctl")]
#[command(about = "Provision and maintain super admin accounts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Identity provider base URL
    #[arg(long, global = true, env = "ADMINCTL_PROVIDER_URL")]
    pub provider_url: Option<String>,

    /// Administrative service key for the identity provider
    #[arg(long, global = true, env = "ADMINCTL_SERVICE_KEY", hide_env_values = true)]
    pub service_key: Option<String>,

    /// PostgreSQL connection URL for the role-record store
    #[arg(long, global = true, env = "ADMINCTL_DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ensure a super admin exists with the given credential
    Provision(ProvisionArgs),
    /// Rotate the password of an existing super admin
    ResetPassword(ResetPasswordArgs),
}

#[derive(clap::Args, Debug)]
pub struct ProvisionArgs {
    /// Email address of the account
    pub email: String,
    /// Password to set (omit to leave an existing credential untouched)
    pub password: Option<String>,
    /// Display name (defaults to the part of the email before '@')
    pub name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ResetPasswordArgs {
    /// Email address of the account
    pub email: String,
    /// New password
    #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub new_password: String,
}

/// Resolve a required connection setting from its flag or env var.
/// Missing values abort before the core runs.
pub fn require(value: Option<String>, flag: &str, env: &str) -> Result<String> {
    value.ok_or_else(|| anyhow::anyhow!("missing {flag}: pass the flag or set the {env} env var"))
}
