//! Command line entry points
//!
//! `serve` (the default) runs the HTTP API, `remind` prints the expiry
//! reminder report, and `create-account` provisions an account with its
//! profile, e.g. the first administrator.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::{DatabaseConfig, EnvironmentConfig};
use crate::controllers::auth_controller::AuthController;
use crate::database::DatabaseConnection;
use crate::dto::auth_dto::CreateAccountRequest;
use crate::repositories::DocumentRepository;
use crate::server;
use crate::services::access_scope::Scope;
use crate::services::reminder_service::ReminderReport;

#[derive(Parser, Debug)]
#[command(
    name = "permit-tracker",
    about = "Track foreign-worker permits and their expiry",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print documents expiring within 30, 60 and 90 days
    Remind(RemindArgs),
    /// Create an account together with its profile
    CreateAccount(CreateAccountArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Override the configured host
    #[arg(long)]
    pub host: Option<String>,
    /// Override the configured port
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
struct RemindArgs {
    /// Reference date (YYYY-MM-DD); defaults to the current local date
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct CreateAccountArgs {
    #[arg(long)]
    username: String,
    #[arg(long, env = "ACCOUNT_PASSWORD", hide_env_values = true)]
    password: String,
    /// ADMIN or CLIENT
    #[arg(long, default_value = "ADMIN")]
    role: String,
    /// Company id a CLIENT is restricted to
    #[arg(long)]
    company: Option<i64>,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Remind(args) => remind(args).await,
        Command::CreateAccount(args) => create_account(args).await,
    }
}

async fn connect() -> anyhow::Result<DatabaseConnection> {
    let config = DatabaseConfig::from_env()?;
    DatabaseConnection::connect(&config)
        .await
        .context("could not connect to the database")
}

/// Unscoped: covers every company
async fn remind(args: RemindArgs) -> anyhow::Result<()> {
    let today = match args.today {
        Some(today) => today,
        None => EnvironmentConfig::from_env()?.today(),
    };

    let connection = connect().await?;
    let documents = DocumentRepository::new(connection.into_pool())
        .expiring(Scope::All, today)
        .await?;

    let report = ReminderReport::build(documents, today);
    print!("{}", report.render());
    Ok(())
}

async fn create_account(args: CreateAccountArgs) -> anyhow::Result<()> {
    let connection = connect().await?;
    let controller = AuthController::new(connection.into_pool());

    let account = controller
        .provision(CreateAccountRequest {
            username: args.username,
            password: args.password,
            role: Some(args.role),
            company: args.company,
        })
        .await?;

    println!(
        "Created {} ({}) with id {}",
        account.username, account.profile.role, account.id
    );
    Ok(())
}
