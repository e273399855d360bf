//! Book editing commands

use super::{parse_id, Session};
use anyhow::{Context, Result};

pub async fn caption(session: &Session, id: &str, index: usize, text: &str) -> Result<()> {
    let id = parse_id(id)?;
    let book = session
        .library
        .set_caption(&session.user, id, index, text)
        .await
        .with_context(|| format!("Failed to caption page {} of {}", index, id))?;

    match book.pages.get(index) {
        Some(page) if page.has_caption() => {
            println!("Page {} captioned '{}'", index, page.caption)
        }
        _ => println!("Page {} caption cleared", index),
    }
    Ok(())
}

pub async fn rename(session: &Session, id: &str, title: &str) -> Result<()> {
    let id = parse_id(id)?;
    let book = session
        .library
        .rename_book(&session.user, id, title)
        .await
        .with_context(|| format!("Failed to rename {}", id))?;
    println!("Renamed to '{}'", book.title);
    Ok(())
}

/// Remove one page; later pages move down by one
pub async fn delete_page(session: &Session, id: &str, index: usize) -> Result<()> {
    let id = parse_id(id)?;
    let book = session
        .library
        .delete_page(&session.user, id, index)
        .await
        .with_context(|| format!("Failed to delete page {} of {}", index, id))?;
    println!("Deleted page {} ({} remaining)", index, book.len());
    Ok(())
}

pub async fn delete(session: &Session, id: &str) -> Result<()> {
    let id = parse_id(id)?;
    session
        .library
        .delete_book(&session.user, id)
        .await
        .with_context(|| format!("Failed to delete {}", id))?;
    println!("Deleted {}", id);
    Ok(())
}
