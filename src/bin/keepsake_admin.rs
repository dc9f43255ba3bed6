use anyhow::Result;
use clap::{Parser, Subcommand};
use keepsake_media::admin::{self, PUSH_DELAY};
use keepsake_media::client::MediaApiClient;
use keepsake_media::config::Config;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keepsake-admin")]
#[command(author, version, about = "Maintenance tasks for the keepsake media database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print where the server keeps its database
    DbPath,

    /// Replay a local database into a remote API
    Push {
        /// Base URL of the remote server
        #[arg(long, env = "KEEPSAKE_REMOTE_URL")]
        remote: String,

        /// Database file to read (defaults to api/media/db.json when present,
        /// otherwise the configured path)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Actually send the requests; without this only a dry run is shown
        #[arg(long)]
        send: bool,

        /// Value for the x-secret-key header
        #[arg(long, env = "MEDIA_SECRET_KEY")]
        secret_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let local_api_db = Path::new(admin::LOCAL_API_DB);

    match cli.command {
        Commands::DbPath => {
            let db_path = admin::resolve_db_path(config.db_path(), local_api_db);
            println!("Resolved DB path: {}", db_path.display());
            println!("Exists: {}", db_path.exists());
            println!("Local API DB exists: {}", local_api_db.is_file());
        }
        Commands::Push {
            remote,
            db,
            send,
            secret_key,
        } => {
            let db_path = db.unwrap_or_else(|| admin::resolve_db_path(config.db_path(), local_api_db));
            let media = admin::read_database(&db_path).await?;
            let items = admin::push_items(&media);

            if items.is_empty() {
                println!("No media to push.");
                return Ok(());
            }

            if !send {
                println!("DRY RUN: showing requests (use --send to actually send)");
                for (url, kind) in &items {
                    println!("{}", admin::item_line(url, *kind)?);
                }
                return Ok(());
            }

            println!("PUSH MODE: sending {} items to {}", items.len(), remote);
            let mut client = MediaApiClient::new(&remote)?;
            if let Some(secret_key) = secret_key {
                client = client.with_secret_key(secret_key);
            }
            let report = admin::push(&client, &items, PUSH_DELAY).await;
            println!("Sent {}, failed {}", report.sent, report.failed);
        }
    }

    Ok(())
}
