//! List command implementation

use super::Session;
use anyhow::{Context, Result};
use serde::Serialize;

/// Book list entry output
#[derive(Serialize)]
struct BookListing {
    id: String,
    title: String,
    pages: usize,
    toc_entries: usize,
    updated_at: String,
}

/// List the user's books in creation order
pub async fn list(session: &Session, json: bool) -> Result<()> {
    let books = session
        .library
        .list_books(&session.user)
        .await
        .context("Failed to load books")?;

    let listings: Vec<BookListing> = books
        .iter()
        .map(|book| BookListing {
            id: book.id.to_string(),
            title: book.title.clone(),
            pages: book.len(),
            toc_entries: book.toc().len(),
            updated_at: book.updated_at.to_rfc3339(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if listings.is_empty() {
        println!("No books yet");
    }
    for listing in &listings {
        println!(
            "{}  {} ({} pages, {} in contents)",
            listing.id, listing.title, listing.pages, listing.toc_entries
        );
    }
    Ok(())
}
