use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use sea_orm::Database;

#[derive(Clone, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Darts engine database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database URL; falls back to the DATABASE_URL environment variable
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let args = Args::parse();
    let url = match args.url {
        Some(url) => url,
        None => std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set (or pass --url)")?,
    };

    let db = Database::connect(&url).await?;
    migration::migrate(&db, args.command.into()).await?;
    Ok(())
}
