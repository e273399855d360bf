//! Show command implementation

use super::{parse_id, Session};
use anyhow::{Context, Result};
use flipbook_core::{PageSlot, TocTarget};
use serde::Serialize;

#[derive(Serialize)]
struct PageInfo {
    index: usize,
    physical_page: usize,
    caption: String,
    blob: String,
    mime_type: String,
    width: Option<u32>,
    height: Option<u32>,
    source: Option<String>,
}

/// Book detail output
#[derive(Serialize)]
struct BookInfo {
    id: String,
    title: String,
    total_pages: usize,
    front_matter: usize,
    pages: Vec<PageInfo>,
    toc: Vec<TocTarget>,
}

/// Display a book's pages and table of contents
pub async fn show(session: &Session, id: &str, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    let book = session
        .library
        .get_book(&session.user, id)
        .await
        .with_context(|| format!("Failed to load book {}", id))?;
    let layout = session.library.layout(&book)?;

    let pages = book
        .pages
        .iter()
        .enumerate()
        .map(|(index, page)| -> Result<PageInfo> {
            Ok(PageInfo {
                index,
                physical_page: layout.mapper().to_physical(index)?,
                caption: page.caption.clone(),
                blob: page.image.blob.to_string(),
                mime_type: page.image.mime_type.clone(),
                width: page.image.width,
                height: page.image.height,
                source: page.image.original_filename.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let info = BookInfo {
        id: book.id.to_string(),
        title: book.title.clone(),
        total_pages: layout.total_pages(),
        front_matter: layout.front_matter(),
        toc: layout.toc_targets(&book.toc())?,
        pages,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Title:       {}", info.title);
    println!("Id:          {}", info.id);
    println!("Pages:       {}", info.pages.len());
    println!("Total pages: {}", info.total_pages);

    println!();
    println!("Contents:");
    if info.toc.is_empty() {
        println!("  (no captioned pages)");
    }
    for target in &info.toc {
        println!(
            "  {:<40} page {}",
            target.entry.title,
            target.entry.content_index + 1
        );
    }

    println!();
    for physical in 0..layout.total_pages() {
        match layout.slot(physical) {
            Some(PageSlot::Cover) => println!("  [{physical:>3}] cover"),
            Some(PageSlot::TableOfContents { sheet }) => {
                println!("  [{physical:>3}] contents {}", sheet + 1)
            }
            Some(PageSlot::Content { index }) => {
                let page = &info.pages[index];
                let size = match (page.width, page.height) {
                    (Some(w), Some(h)) => format!("{w}x{h}"),
                    _ => "?".to_string(),
                };
                println!(
                    "  [{physical:>3}] {} {} {} {}",
                    page.blob, page.mime_type, size, page.caption
                );
            }
            Some(PageSlot::BackCover) => println!("  [{physical:>3}] end"),
            None => {}
        }
    }
    Ok(())
}
