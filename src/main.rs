//! git-line-blame - who last touched this line, and where to read about it
//!
//! # Usage
//! ```bash
//! git-line-blame blame src/lib.rs --line 42   # Status text for one line
//! git-line-blame show src/lib.rs 1a2b3c4      # Commit tooltip
//! git-line-blame link src/lib.rs 1a2b3c4 -o   # Open the commit page
//! git-line-blame serve --port 3001            # JSON API for editor plugins
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_line_blame::format::{avatar_url, status_line, status_text, tooltip_text, NOT_COMMITTED};
use git_line_blame::routes::{self, AppState};
use git_line_blame::{AppError, Config};

/// Line-level git blame with links to the hosting service
#[derive(Parser)]
#[command(name = "git-line-blame")]
#[command(about = "Line-level git blame with links to the hosting service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// git executable to run
    #[arg(long, global = true, value_name = "BIN")]
    git: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the repository root enclosing a file
    Root { file: PathBuf },
    /// Print who last changed each line (or one line) of a file
    Blame {
        file: PathBuf,
        /// 1-based line number
        #[arg(short, long)]
        line: Option<usize>,
    },
    /// Print subject, author and message of a commit
    Show { file: PathBuf, rev: String },
    /// Print the web page of a commit
    Link {
        file: PathBuf,
        rev: String,
        /// Open the page in the browser
        #[arg(short, long)]
        open: bool,
    },
    /// Serve the JSON API
    Serve {
        /// Port to run the server on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(git) = &cli.git {
        config.git_binary = git.clone();
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli)?;
    let resolver = config.resolver();

    match cli.command {
        Commands::Root { file } => {
            let root = resolver.find_repo_root(&file)?;
            println!("{}", root.path().display());
        }
        Commands::Blame { file, line } => {
            let data = resolver.get_blame_data(&file).await;
            let now = Utc::now();
            match line {
                Some(line) => {
                    let row = line.saturating_sub(1);
                    let status = status_line(data.as_ref(), row, now, &config.display);
                    println!("{}", status.text);
                }
                None => match data {
                    Some(data) => {
                        for (row, line) in data.lines.iter().enumerate() {
                            println!("{:>5} {}", row + 1, status_text(line, now, &config.display));
                        }
                    }
                    None => println!("{}", NOT_COMMITTED),
                },
            }
        }
        Commands::Show { file, rev } => {
            let commit = resolver
                .get_commit(&file, &rev)
                .await?
                .ok_or_else(|| AppError::CommitNotFound(rev.clone()))?;
            let avatar = avatar_url(&commit.email, config.display.avatar_size);
            println!("{}", tooltip_text(&commit, &avatar));
        }
        Commands::Link { file, rev, open: launch } => {
            match resolver.get_commit_link(&file, &rev).await? {
                Some(url) => {
                    println!("{}", url);
                    if launch {
                        if let Err(e) = open::that(&url) {
                            eprintln!("  Warning: Could not open browser: {}", e);
                        }
                    }
                }
                None => println!("Unknown URL."),
            }
        }
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.resolver(), config.display.clone()));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", config.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!("  git-line-blame listening on http://{}", addr);
    println!("  Press Ctrl+C to stop");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing (quiet unless RUST_LOG says otherwise)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}
