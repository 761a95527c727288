use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Args;
use crate::db::{init_db, Database, PropertyStore};
use crate::search::session::Session;

mod config;
mod db;
mod domain;
mod errors;
mod output;
mod search;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout belongs to the prompts and results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into()),
        )
        .with_writer(io::stderr)
        .init();

    // 1️⃣ Open the database, creating it only when a schema is being applied
    let db = match &args.schema {
        Some(schema) => {
            let db = Database::open_or_create(&args.database)?;
            init_db(&db, schema)?;
            db
        }
        None => Database::open(&args.database)?,
    };

    // 2️⃣ Make sure it answers before asking the user anything
    db.ping()
        .with_context(|| format!("Database at {} is not usable", args.database.display()))?;
    println!("Connected!");

    // 3️⃣ Run the interactive session on stdin/stdout
    let stdin = io::stdin();
    let mut session = Session::new(&db, stdin.lock(), io::stdout(), args.session_options());
    let searches = session.run()?;

    tracing::info!(searches, "session finished");
    Ok(())
}
