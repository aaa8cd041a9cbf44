//! Tokio / Axum entry-point for the `RideSafe` demo site, plus a small CLI
//! that drives the session gate against a token file in the data directory.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ridesafe_backend::{
    auth::{GatePolicy, SessionGate, AFTER_LOGIN, AFTER_LOGOUT},
    config::Settings,
    router::create_router,
    storage::FlatFileStorage,
    AppState,
};
use ridesafe_common::Route;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "ridesafe-server", version, about = "RideSafe demo site and session gate")]
struct Cli {
    /// Extra TOML config file, layered over `ridesafe.toml`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the directory holding the CLI token store
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override the bind address
        #[arg(long)]
        bind: Option<std::net::SocketAddr>,
    },
    /// Validate a signup form (does not sign in)
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Remove the stored session token
    Logout,
    /// Print the identity of the stored session
    Whoami,
    /// Print the access decision for a page path
    Route { path: String },
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.to_ascii_lowercase()));
    let registry = tracing_subscriber::registry().with(filter);

    if settings.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(settings: Settings) -> Result<()> {
    let addr = settings.bind_addr;
    let state = Arc::new(AppState::new(settings));
    let app = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn cli_gate(settings: &Settings) -> Result<SessionGate<FlatFileStorage>> {
    let storage = FlatFileStorage::new(&settings.data_dir)
        .with_context(|| format!("failed to open data dir {}", settings.data_dir.display()))?;
    let state = AppState::new(settings.clone());
    Ok(SessionGate::new(storage, state.auth, GatePolicy::from(settings)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    init_tracing(&settings);

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                settings.bind_addr = bind;
            }
            serve(settings).await?;
        },
        Command::Signup {
            username,
            email,
            password,
            confirm_password,
        } => {
            let gate = cli_gate(&settings)?;
            match gate.signup(&username, &email, &password, &confirm_password).await {
                Ok(()) => println!("Account created (demo)."),
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                },
            }
        },
        Command::Login { email, password } => {
            let gate = cli_gate(&settings)?;
            match gate.login(&email, &password).await {
                Ok(_) => println!("Signed in. Continue at {}", AFTER_LOGIN.path()),
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                },
            }
        },
        Command::Logout => {
            let gate = cli_gate(&settings)?;
            gate.logout().await?;
            println!("Signed out. Continue at {}", AFTER_LOGOUT.path());
        },
        Command::Whoami => {
            let gate = cli_gate(&settings)?;
            match gate.current_identity().await? {
                Some(identity) => println!("{}", serde_json::to_string_pretty(&identity)?),
                None => {
                    eprintln!("Not signed in. Continue at {}", AFTER_LOGOUT.path());
                    std::process::exit(1);
                },
            }
        },
        Command::Route { path } => {
            let gate = cli_gate(&settings)?;
            let decision = gate.decide(&Route::from_path(&path)).await?;
            println!("{}", serde_json::to_string_pretty(&decision)?);
        },
    }

    Ok(())
}
