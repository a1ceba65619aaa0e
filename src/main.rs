// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Endomondo-Archive command line
//!
//! Logs in to Endomondo, lists workouts, and archives them for every account
//! in the import rotation.

use clap::{Parser, Subcommand};
use endomondo_archive::{
    config::{Config, ConfigError},
    db::{FirestoreDb, SummaryStore},
    models::{sport::SPORTS, ImportUser},
    services::{endomondo::DEFAULT_MAX_RESULTS, Before, EndomondoClient, Importer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "endomondo-archive", about = "Archive Endomondo workouts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the auth token for reuse via ENDOMONDO_AUTH_TOKEN
    Auth {
        /// Login email (defaults to ENDOMONDO_EMAIL)
        #[arg(short, long)]
        email: Option<String>,
        /// Login password (defaults to ENDOMONDO_PASSWORD)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Print workouts for the configured account as JSON lines
    List {
        #[arg(short, long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
        /// Only workouts before this time (RFC3339 or "YYYY-MM-DD HH:MM:SS UTC")
        #[arg(short, long)]
        before: Option<Before>,
    },
    /// Print the sport code table
    Sports,
    /// Add an account to the import rotation
    AddUser {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Import workouts for the next account in rotation
    Import {
        /// Import every account instead of just the next one
        #[arg(long)]
        all: bool,
        #[arg(short, long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
        #[arg(short, long)]
        before: Option<Before>,
    },
    /// Delete all archived workouts
    Purge {
        /// Also delete every account in the rotation
        #[arg(long)]
        users: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Auth { email, password } => {
            let email = email
                .or_else(|| config.email.clone())
                .ok_or(ConfigError::Missing("ENDOMONDO_EMAIL"))?;
            let password = password
                .or_else(|| config.password.clone())
                .ok_or(ConfigError::Missing("ENDOMONDO_PASSWORD"))?;

            let mut client = EndomondoClient::from_config(&config)?;
            let token = client.authenticate(&email, &password).await?;
            println!("{token}");
        }
        Commands::List {
            max_results,
            before,
        } => {
            let mut client = EndomondoClient::from_config(&config)?;
            for workout in client.list_workouts(max_results, before).await? {
                println!("{}", serde_json::to_string(&workout)?);
            }
        }
        Commands::Sports => {
            for (code, name) in SPORTS {
                println!("{code:>3}  {name}");
            }
        }
        Commands::AddUser {
            username,
            email,
            password,
        } => {
            let importer = build_importer(&config).await?;
            let user = ImportUser::new(&username, &email, &password);
            match importer.add_user(&user).await {
                Ok(()) => println!("Added {username}"),
                Err(e) if e.is_duplicate_key() => println!("{email} is already registered"),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Import {
            all,
            max_results,
            before,
        } => {
            let importer = build_importer(&config).await?;
            if all {
                let results = importer.import_all_users(max_results, before).await?;
                let failed = results.iter().filter(|(_, r)| r.is_err()).count();
                for (user, result) in results {
                    match result {
                        Ok(report) => println!("{}: {:?}", user.username, report),
                        Err(e) => println!("{}: failed: {}", user.username, e),
                    }
                }
                if failed > 0 {
                    anyhow::bail!("{failed} account(s) failed to import");
                }
            } else {
                match importer.import_next_user(max_results, before).await? {
                    Some((user, report)) => println!("{}: {:?}", user.username, report),
                    None => println!("No users registered"),
                }
            }
        }
        Commands::Purge { users } => {
            let importer = build_importer(&config).await?;
            let report = importer.purge(users).await?;
            println!("{report:?}");
        }
    }

    Ok(())
}

async fn build_importer(config: &Config) -> anyhow::Result<Importer> {
    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    let summaries = match &config.summary_database_url {
        Some(url) => Some(SummaryStore::connect(url).await?),
        None => None,
    };

    Ok(Importer::new(config.clone(), db, summaries))
}

/// Initialize structured JSON logging on stderr (stdout carries command output).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("endomondo_archive=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
