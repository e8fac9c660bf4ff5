use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, UserRole};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "bookkeeper_admin")]
#[command(about = "Admin utilities for the bookkeeper (bootstrap roles)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./bookkeeper.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Role(Role),
}

#[derive(Args, Debug)]
struct Role {
    #[command(subcommand)]
    command: RoleCommand,
}

#[derive(Subcommand, Debug)]
enum RoleCommand {
    /// Set the role of an identity, bypassing the admin check.
    Grant(RoleGrantArgs),
    /// Print the role of an identity, assigning the default on first sight.
    Show(RoleShowArgs),
}

#[derive(Args, Debug)]
struct RoleGrantArgs {
    #[arg(long)]
    identity: String,
    #[arg(long, value_parser = parse_role)]
    role: UserRole,
}

#[derive(Args, Debug)]
struct RoleShowArgs {
    #[arg(long)]
    identity: String,
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    UserRole::try_from(raw).map_err(|err| err.to_string())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Role(Role {
            command: RoleCommand::Grant(args),
        }) => {
            engine.grant_role(&args.identity, args.role).await?;
            println!("granted {} to {}", args.role.as_str(), args.identity.trim());
        }
        Command::Role(Role {
            command: RoleCommand::Show(args),
        }) => {
            let role = engine.caller_role(&args.identity).await?;
            println!("{}: {}", args.identity, role.as_str());
        }
    }

    Ok(())
}
