use anyhow::Context;
use application::UserApp;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "user-registry",
    version,
    about = "Administrative tool for the user registry store"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the number of stored users
    Count,
    /// Print every stored user as `id<TAB>name<TAB>email`
    List,
    /// Remove every stored user
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();
    config.log_summary();

    let app = UserApp::from_config(&config)?;
    let service = &app.user_service;

    match cli.command {
        Commands::Count => {
            let count = service.get_user_count().await.context("counting users")?;
            println!("{count}");
        }
        Commands::List => {
            for user in service.get_all_users().await.context("listing users")? {
                let id = user.id.map(|id| id.to_string()).unwrap_or_default();
                println!("{id}\t{}\t{}", user.name, user.email);
            }
        }
        Commands::Clear => {
            let before = service.get_user_count().await.context("counting users")?;
            service.clear_all().await.context("clearing users")?;
            println!("Removed {before} user(s)");
        }
    }

    Ok(())
}
