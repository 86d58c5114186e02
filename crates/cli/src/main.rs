//! SWAPI favorites CLI - Database migrations and user management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! swfav migrate
//!
//! # Create a user
//! swfav user create -e luke@rebellion.org -p 'use-the-force' -n Luke
//!
//! # List users
//! swfav user list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create a user
//! - `user list` - List users

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "swfav")]
#[command(author, version, about = "SWAPI favorites CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Plain-text password (stored hashed)
        #[arg(short, long)]
        password: String,

        /// Display name, also required at sign-in when set
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List every user
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                name,
            } => {
                commands::user::create(&email, &password, name.as_deref()).await?;
            }
            UserAction::List => commands::user::list().await?,
        },
    }
    Ok(())
}
