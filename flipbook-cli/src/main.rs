//! Flipbook CLI - Create and edit flipbooks from the command line

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use flipbook_core::LayoutOptions;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse a TOC sheet size (must be at least 1)
fn parse_per_page(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("entries per page must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "flipbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding book lists and page images
    #[arg(long, env = "FLIPBOOK_DATA_DIR", default_value = "./flipbook_data")]
    data_dir: PathBuf,

    /// Email of the account to act as
    #[arg(long, env = "FLIPBOOK_USER")]
    user: String,

    /// Show a cover page before the table of contents
    #[arg(long, global = true)]
    cover: bool,

    /// Table of contents entries per page
    #[arg(long, global = true, default_value = "12", value_parser = parse_per_page)]
    toc_per_page: usize,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a book from image or PDF files
    Create {
        /// Book title
        title: String,

        /// Files to use as pages, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Caption for the next page (repeatable, applied in order)
        #[arg(short, long = "caption")]
        captions: Vec<String>,
    },

    /// List your books
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a book's pages and table of contents
    Show {
        /// Book id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set or clear the caption of a page
    Caption {
        /// Book id
        id: String,

        /// Zero-based page index
        index: usize,

        /// New caption; empty removes the page from the table of contents
        text: String,
    },

    /// Rename a book
    Rename {
        /// Book id
        id: String,

        /// New title
        title: String,
    },

    /// Append pages to a book
    Add {
        /// Book id
        id: String,

        /// Files to append, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Caption for the next new page (repeatable)
        #[arg(short, long = "caption")]
        captions: Vec<String>,
    },

    /// Remove one page from a book
    DeletePage {
        /// Book id
        id: String,

        /// Zero-based page index
        index: usize,
    },

    /// Delete a book and its images
    Delete {
        /// Book id
        id: String,
    },

    /// Write a page image to a file
    Export {
        /// Book id
        id: String,

        /// Image blob id, as shown by `show`
        blob: String,

        /// Output file path
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "flipbook_cli=debug,flipbook_core=debug"
    } else {
        "flipbook_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let layout = LayoutOptions {
        cover: cli.cover,
        toc_entries_per_page: cli.toc_per_page,
        ..LayoutOptions::default()
    };
    let session = commands::Session::open(&cli.data_dir, &cli.user, layout)?;

    match cli.command {
        Commands::Create {
            title,
            files,
            captions,
        } => commands::create(&session, &title, &files, &captions).await,

        Commands::List { json } => commands::list(&session, json).await,

        Commands::Show { id, json } => commands::show(&session, &id, json).await,

        Commands::Caption { id, index, text } => {
            commands::caption(&session, &id, index, &text).await
        }

        Commands::Rename { id, title } => commands::rename(&session, &id, &title).await,

        Commands::Add {
            id,
            files,
            captions,
        } => commands::add(&session, &id, &files, &captions).await,

        Commands::DeletePage { id, index } => commands::delete_page(&session, &id, index).await,

        Commands::Delete { id } => commands::delete(&session, &id).await,

        Commands::Export { id, blob, output } => {
            commands::export(&session, &id, &blob, &output).await
        }
    }
}
