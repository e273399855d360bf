//! Create and add commands

use super::{parse_id, read_uploads, spinner, Session};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Create a book from files, captioning pages in order
pub async fn create(
    session: &Session,
    title: &str,
    files: &[PathBuf],
    captions: &[String],
) -> Result<()> {
    let pb = spinner()?;

    pb.set_message("Reading files...");
    let uploads = read_uploads(files)?;

    pb.set_message(format!("Decoding {} files...", uploads.len()));
    let draft = session
        .library
        .ingest(uploads)
        .await
        .context("Failed to decode input files")?
        .with_title(title)
        .with_captions(captions);

    pb.set_message("Saving book...");
    let book = session
        .library
        .create_book(&session.user, draft)
        .await
        .context("Failed to create book")?;

    pb.finish_and_clear();
    tracing::info!("Created '{}' with {} pages", book.title, book.len());
    println!("{}", book.id);
    Ok(())
}

/// Append files to the end of a book
pub async fn add(
    session: &Session,
    id: &str,
    files: &[PathBuf],
    captions: &[String],
) -> Result<()> {
    let id = parse_id(id)?;
    let pb = spinner()?;

    pb.set_message("Reading files...");
    let uploads = read_uploads(files)?;

    pb.set_message(format!("Decoding {} files...", uploads.len()));
    let draft = session
        .library
        .ingest(uploads)
        .await
        .context("Failed to decode input files")?
        .with_captions(captions);
    let added = draft.pages.len();

    pb.set_message("Saving book...");
    let book = session
        .library
        .append_pages(&session.user, id, draft.pages)
        .await
        .with_context(|| format!("Failed to add pages to {}", id))?;

    pb.finish_and_clear();
    println!("Added {} pages to '{}' ({} total)", added, book.title, book.len());
    Ok(())
}
