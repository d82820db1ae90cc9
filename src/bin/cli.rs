//! chirpdb CLI
//!
//! Command-line access to a database file, without the server.

use std::io::Write;
use std::process::ExitCode;

use chirpdb::storage::encode_pretty;
use chirpdb::{Config, DocumentStore, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

/// chirpdb CLI
#[derive(Parser, Debug)]
#[command(name = "chirpdb-cli")]
#[command(about = "CLI for a chirpdb database file")]
#[command(version)]
struct Args {
    /// Database file
    #[arg(short, long, default_value = "db.json")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database file if it is missing or unreadable
    Init,

    /// Print the whole dataset
    Dump,

    /// Create (or overwrite) a user
    CreateUser {
        email: String,
        password: String,
        name: String,
        age: i64,
    },

    /// Update an existing user
    UpdateUser {
        email: String,
        password: String,
        name: String,
        age: i64,
    },

    /// Show a user
    GetUser { email: String },

    /// Delete a user (posts are kept)
    DeleteUser { email: String },

    /// Create a post for an existing user
    CreatePost { user_email: String, text: String },

    /// List a user's posts
    Posts { user_email: String },

    /// Delete a post by id
    DeletePost { id: String },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder().db_path(&args.db).build();
    let store = DocumentStore::open(config)?;

    match args.command {
        Commands::Init => {
            if store.ensure_initialized()? {
                println!("database created at {}", args.db);
            } else {
                println!("database ensured!");
            }
        }
        Commands::Dump => {
            let bytes = encode_pretty(&store.load()?)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            writeln!(stdout)?;
        }
        Commands::CreateUser {
            email,
            password,
            name,
            age,
        } => print_json(&store.create_user(&email, &password, &name, age)?)?,
        Commands::UpdateUser {
            email,
            password,
            name,
            age,
        } => print_json(&store.update_user(&email, &password, &name, age)?)?,
        Commands::GetUser { email } => print_json(&store.get_user(&email)?)?,
        Commands::DeleteUser { email } => store.delete_user(&email)?,
        Commands::CreatePost { user_email, text } => {
            print_json(&store.create_post(&user_email, &text)?)?
        }
        Commands::Posts { user_email } => print_json(&store.get_posts(&user_email)?)?,
        Commands::DeletePost { id } => store.delete_post(&id)?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| chirpdb::ChirpError::Serialization(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
