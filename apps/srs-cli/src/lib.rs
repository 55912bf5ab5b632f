pub mod commands;
pub mod config;
pub mod deck_file;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use srs_core::Quality;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::deck_file::DeckFile;

#[derive(Parser)]
#[command(name = "srs")]
#[command(about = "Spaced-repetition scheduler for dictation cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON card file
    #[arg(long, global = true, default_value = "cards.json")]
    pub cards: PathBuf,

    /// Evaluate as of this RFC 3339 instant instead of the current time
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the next study plan, one JSON object per line
    Plan {
        /// Maximum number of cards (overrides settings)
        #[arg(long)]
        limit: Option<usize>,

        /// Only plan cards from this deck
        #[arg(long)]
        deck: Option<String>,
    },

    /// Rate one card and save its new schedule
    Review {
        #[arg(long)]
        card_id: i64,

        /// again, hard, good, easy or 0-3
        #[arg(long)]
        quality: Quality,

        /// How long the answer took
        #[arg(long)]
        response_ms: Option<u64>,
    },

    /// Print queue and review-history counts
    Stats {
        #[arg(long)]
        deck: Option<String>,
    },
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let env = config::settings_from_env()?;
    let now = cli.now.unwrap_or_else(Utc::now);

    match cli.command {
        Commands::Plan { limit, deck } => {
            let file = DeckFile::load(&cli.cards)?;
            for entry in commands::plan(&file, &env, deck.as_deref(), limit, now)? {
                print_json(&entry)?;
            }
        }
        Commands::Review {
            card_id,
            quality,
            response_ms,
        } => {
            let mut file = DeckFile::load(&cli.cards)?;
            let result = commands::review(&mut file, &env, card_id, quality, response_ms, now)?;
            file.save(&cli.cards)?;
            print_json(&result)?;
        }
        Commands::Stats { deck } => {
            let file = DeckFile::load(&cli.cards)?;
            print_json(&commands::stats(&file, deck.as_deref(), now))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let line = serde_json::to_string(value).context("failed to encode output")?;
    println!("{}", line);
    Ok(())
}
