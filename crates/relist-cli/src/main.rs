use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use relist_cli::commands;

#[derive(Parser)]
#[command(name = "relist-cli")]
#[command(about = "Inspect marketplace conversations from a fixture dataset")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short, global = true)]
    pretty: bool,

    /// Path to JSON config file (dataDir, fixtureFile, currency, typingIndicatorMs)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Conversation dataset to use instead of the configured one
    #[arg(long, short = 'f', global = true)]
    fixtures: Option<PathBuf>,

    /// Identity (email) to view conversations as
    #[arg(long, short = 'v', global = true, default_value = "")]
    viewer: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the viewer's conversations, most recent first
    Inbox {
        /// Filter by listing title or counterpart
        #[arg(long, short = 'q')]
        query: Option<String>,
        /// Only conversations with unread messages
        #[arg(long)]
        unread: bool,
    },

    /// Open a conversation (marks the counterpart's messages read)
    Thread {
        thread_id: String,
    },

    /// Show quick replies for a conversation
    QuickReplies {
        thread_id: String,
    },

    /// Send a message to a conversation
    Send {
        thread_id: String,
        /// Message content
        text: String,
        /// Send for moderation instead of directly
        #[arg(long)]
        for_approval: bool,
    },
}

fn run(cli: Cli) -> Result<serde_json::Value> {
    let config = commands::load_config(cli.config.as_deref(), cli.fixtures.as_deref())?;
    let mut session = commands::start_session(config, &cli.viewer)?;

    match cli.command {
        Commands::Inbox { query, unread } => commands::inbox(&session, query.as_deref(), unread),
        Commands::Thread { thread_id } => commands::open_thread(&mut session, &thread_id),
        Commands::QuickReplies { thread_id } => commands::quick_replies(&mut session, &thread_id),
        Commands::Send {
            thread_id,
            text,
            for_approval,
        } => commands::send(&mut session, &thread_id, &text, for_approval),
    }
}

fn main() {
    relist_core::tracing_setup::init_tracing_with_service("relist-cli");

    let cli = Cli::parse();
    let pretty = cli.pretty;

    match run(cli) {
        Ok(value) => {
            let output = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };
            match output {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
