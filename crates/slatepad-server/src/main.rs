//! Slatepad drawing server binary.

use clap::Parser;
use slatepad_core::storage::{DrawingStore, FileStore, MemoryStore};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory for drawing files. Defaults to the user's local data directory.
    #[arg(long, env = "SLATEPAD_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3030)]
    port: u16,
    /// Keep drawings in memory only; nothing survives a restart.
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slatepad_server=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let store: Arc<dyn DrawingStore> = if args.memory {
        info!("Using in-memory drawing store");
        Arc::new(MemoryStore::new())
    } else {
        let dir = match args.data_dir {
            Some(dir) => dir,
            None => FileStore::default_path()?,
        };
        info!("Storing drawings in {}", dir.display());
        Arc::new(FileStore::new(dir)?)
    };

    let app = slatepad_server::router(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Slatepad drawing server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
